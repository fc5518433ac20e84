//! Single-node client configuration

use super::*;
use crate::utils::error::{RedisKitError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Transport used to reach the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Tcp,
    Unix,
}

/// Transport security settings. TLS is negotiated only when this is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TlsConfig {
    /// Skip certificate verification
    #[serde(default)]
    pub insecure: bool,
}

/// Connection settings for one logical database on one server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// `host:port` for TCP, socket path for Unix
    #[serde(default = "default_addr")]
    pub addr: String,
    #[serde(default)]
    pub network: Network,
    /// ACL username
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Logical database index selected after connecting
    #[serde(default)]
    pub db: i64,
    /// Prepended (with a `:` separator) to every key issued by the client
    #[serde(default)]
    pub prefix: String,
    /// Number of multiplexed connections the client rotates through
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
    #[serde(default = "default_dial_timeout_ms")]
    pub dial_timeout_ms: u64,
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
    #[serde(default = "default_write_timeout_ms")]
    pub write_timeout_ms: u64,
    /// Attempts made to dial and PING before construction fails
    #[serde(default = "default_connect_attempts")]
    pub connect_attempts: usize,
    #[serde(default)]
    pub tls: Option<TlsConfig>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            network: Network::default(),
            username: None,
            password: None,
            db: 0,
            prefix: String::new(),
            pool_size: default_pool_size(),
            dial_timeout_ms: default_dial_timeout_ms(),
            read_timeout_ms: default_read_timeout_ms(),
            write_timeout_ms: default_write_timeout_ms(),
            connect_attempts: default_connect_attempts(),
            tls: None,
        }
    }
}

impl ClientConfig {
    /// Config for `addr` with every other setting at its default
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            ..Default::default()
        }
    }

    /// Prefix as prepended to keys, separator included
    pub fn key_prefix(&self) -> String {
        key_prefix(&self.prefix)
    }

    pub fn dial_timeout(&self) -> Duration {
        Duration::from_millis(self.dial_timeout_ms)
    }

    /// The async client has a single per-command deadline covering the
    /// write and the read, so the larger of the two socket timeouts applies.
    pub fn response_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms.max(self.write_timeout_ms))
    }

    pub fn is_tls(&self) -> bool {
        self.tls.is_some()
    }

    /// Connection URL understood by the redis client, credentials included
    pub fn connection_url(&self) -> Result<String> {
        let url = match self.network {
            Network::Tcp => {
                let scheme = if self.is_tls() { "rediss" } else { "redis" };
                let mut url = Url::parse(&format!("{}://{}", scheme, with_default_port(&self.addr)))?;
                if let Some(username) = self.username.as_deref().filter(|u| !u.is_empty()) {
                    url.set_username(username)
                        .map_err(|_| RedisKitError::invalid_uri("cannot set username"))?;
                }
                if let Some(password) = self.password.as_deref().filter(|p| !p.is_empty()) {
                    url.set_password(Some(password))
                        .map_err(|_| RedisKitError::invalid_uri("cannot set password"))?;
                }
                url.set_path(&format!("/{}", self.db));
                if self.tls.as_ref().is_some_and(|tls| tls.insecure) {
                    url.set_fragment(Some("insecure"));
                }
                url
            }
            Network::Unix => {
                let mut url = Url::parse("redis+unix:///")?;
                url.set_path(&self.addr);
                {
                    let mut query = url.query_pairs_mut();
                    query.append_pair("db", &self.db.to_string());
                    if let Some(username) = self.username.as_deref().filter(|u| !u.is_empty()) {
                        query.append_pair("user", username);
                    }
                    if let Some(password) = self.password.as_deref().filter(|p| !p.is_empty()) {
                        query.append_pair("pass", password);
                    }
                }
                url
            }
        };
        Ok(url.to_string())
    }

    /// Merge client configurations, with other taking precedence where it
    /// differs from the defaults
    pub fn merge(mut self, other: Self) -> Self {
        let defaults = Self::default();
        if other.addr != defaults.addr {
            self.addr = other.addr;
        }
        if other.network != defaults.network {
            self.network = other.network;
        }
        if other.username.is_some() {
            self.username = other.username;
        }
        if other.password.is_some() {
            self.password = other.password;
        }
        if other.db != defaults.db {
            self.db = other.db;
        }
        if !other.prefix.is_empty() {
            self.prefix = other.prefix;
        }
        if other.pool_size != defaults.pool_size {
            self.pool_size = other.pool_size;
        }
        if other.dial_timeout_ms != defaults.dial_timeout_ms {
            self.dial_timeout_ms = other.dial_timeout_ms;
        }
        if other.read_timeout_ms != defaults.read_timeout_ms {
            self.read_timeout_ms = other.read_timeout_ms;
        }
        if other.write_timeout_ms != defaults.write_timeout_ms {
            self.write_timeout_ms = other.write_timeout_ms;
        }
        if other.connect_attempts != defaults.connect_attempts {
            self.connect_attempts = other.connect_attempts;
        }
        if other.tls.is_some() {
            self.tls = other.tls;
        }
        self
    }
}
