//! Clients for several logical databases on one server

use super::pool::RedisClient;
use crate::config::{CollectionConfig, Validate};
use crate::utils::error::{RedisKitError, Result};
use std::collections::BTreeMap;
use tracing::info;

/// One [`RedisClient`] per configured database, each with its own prefix.
///
/// Built once from config and passed around by value or `Arc`; there is no
/// process-wide registry.
#[derive(Debug, Clone, Default)]
pub struct RedisCollection {
    clients: BTreeMap<i64, RedisClient>,
}

impl RedisCollection {
    /// Connect every database in the collection. Fails on the first
    /// database that cannot be reached.
    pub async fn connect(config: &CollectionConfig) -> Result<Self> {
        config.check()?;

        let mut clients = BTreeMap::new();
        for client_config in config.client_configs() {
            let db = client_config.db;
            let client = RedisClient::connect(&client_config).await?;
            clients.insert(db, client);
        }

        info!("Redis collection connected ({} databases)", clients.len());
        Ok(Self { clients })
    }

    /// Client for `db`
    pub fn get(&self, db: i64) -> Result<&RedisClient> {
        self.select(db)
            .ok_or_else(|| RedisKitError::not_found(format!("database {} is not configured", db)))
    }

    /// Client for `db`, if configured
    pub fn select(&self, db: i64) -> Option<&RedisClient> {
        self.clients.get(&db)
    }

    /// Configured database indexes, ascending
    pub fn dbs(&self) -> Vec<i64> {
        self.clients.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Close every client
    pub async fn close(self) -> Result<()> {
        for (_, client) in self.clients {
            client.close().await?;
        }
        Ok(())
    }
}
