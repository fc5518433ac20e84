//! Builder for client and collection configurations
//!
//! Collects connection options one call at a time and produces either a
//! single-database [`ClientConfig`] or a multi-database [`CollectionConfig`].

use super::models::{ClientConfig, CollectionConfig, DbConfig, TlsConfig};
use super::validation::Validate;
use crate::utils::error::{RedisKitError, Result};
use std::time::Duration;

/// Builder for connection options
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    base: ClientConfig,
    dbs: Vec<DbConfig>,
}

impl ClientOptions {
    /// Create a new builder with default connection settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the server address (`host:port`, or a socket path for unix)
    pub fn with_addr(mut self, addr: impl Into<String>) -> Self {
        self.base.addr = addr.into();
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.base.username = Some(username.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.base.password = Some(password.into());
        self
    }

    /// Add a logical database together with the key prefix used in it
    pub fn with_db(mut self, db: i64, prefix: impl Into<String>) -> Self {
        self.dbs.push(DbConfig::new(db, prefix));
        self
    }

    pub fn with_pool_size(mut self, size: usize) -> Self {
        self.base.pool_size = size;
        self
    }

    /// Set the dial, read and write timeouts
    pub fn with_timeouts(mut self, dial: Duration, read: Duration, write: Duration) -> Self {
        self.base.dial_timeout_ms = dial.as_millis() as u64;
        self.base.read_timeout_ms = read.as_millis() as u64;
        self.base.write_timeout_ms = write.as_millis() as u64;
        self
    }

    pub fn with_connect_attempts(mut self, attempts: usize) -> Self {
        self.base.connect_attempts = attempts;
        self
    }

    /// Enable TLS; `insecure` skips certificate verification
    pub fn with_tls(mut self, insecure: bool) -> Self {
        self.base.tls = Some(TlsConfig { insecure });
        self
    }

    /// Build a single-database client config.
    ///
    /// Without any `with_db` call this targets db 0 with no prefix.
    pub fn build_client(self) -> Result<ClientConfig> {
        let mut config = self.base;
        match self.dbs.as_slice() {
            [] => {}
            [db] => {
                config.db = db.db;
                config.prefix = db.prefix.clone();
            }
            _ => {
                return Err(RedisKitError::config(format!(
                    "{} databases configured; use build_collection",
                    self.dbs.len()
                )));
            }
        }
        config.check()?;
        Ok(config)
    }

    /// Build a collection config covering every database added with `with_db`
    pub fn build_collection(self) -> Result<CollectionConfig> {
        let config = CollectionConfig {
            base: self.base,
            dbs: self.dbs,
        };
        config.check()?;
        Ok(config)
    }
}
