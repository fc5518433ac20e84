//! DB collection configuration: several logical databases on one server

use super::client::ClientConfig;
use serde::{Deserialize, Serialize};

/// One logical database in a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbConfig {
    pub db: i64,
    #[serde(default)]
    pub prefix: String,
}

impl DbConfig {
    pub fn new(db: i64, prefix: impl Into<String>) -> Self {
        Self {
            db,
            prefix: prefix.into(),
        }
    }
}

/// Shared connection settings plus the databases to open with them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CollectionConfig {
    /// Address, credentials, pool and timeouts shared by every database.
    /// Its own `db` and `prefix` are ignored.
    #[serde(flatten)]
    pub base: ClientConfig,
    pub dbs: Vec<DbConfig>,
}

impl CollectionConfig {
    pub fn new(base: ClientConfig) -> Self {
        Self {
            base,
            dbs: Vec::new(),
        }
    }

    pub fn with_db(mut self, db: i64, prefix: impl Into<String>) -> Self {
        self.dbs.push(DbConfig::new(db, prefix));
        self
    }

    /// Per-database client configs, in declaration order
    pub fn client_configs(&self) -> Vec<ClientConfig> {
        self.dbs
            .iter()
            .map(|db| ClientConfig {
                db: db.db,
                prefix: db.prefix.clone(),
                ..self.base.clone()
            })
            .collect()
    }
}
