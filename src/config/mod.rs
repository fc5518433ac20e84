//! Configuration management
//!
//! Loading, validation and merging of client, cluster, collection and
//! stream configuration.

pub mod builder;
pub mod models;
pub mod uri;
pub mod validation;

pub use builder::ClientOptions;
pub use models::*;
pub use uri::{ConnOpt, FailoverConfig, parse_redis_uri};
pub use validation::Validate;

use crate::utils::error::{RedisKitError, Result};
use crate::utils::logging::{LogFormat, LogLevel};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Single-node client settings
    #[serde(default)]
    pub client: ClientConfig,
    /// Cluster settings; when present, the client talks to a cluster instead
    #[serde(default)]
    pub cluster: Option<ClusterConfig>,
    /// Several logical databases sharing one server
    #[serde(default)]
    pub collection: Option<CollectionConfig>,
    #[serde(default)]
    pub stream: StreamConfig,
    #[serde(default)]
    pub logging: LogLevel,
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| RedisKitError::config(format!("Failed to read config file: {}", e)))?;

        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| RedisKitError::config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables (and a `.env` file, if any).
    ///
    /// `REDIS_URL` takes precedence over the individual `REDIS_ADDR`,
    /// `REDIS_USERNAME`, `REDIS_PASSWORD` and `REDIS_DB` variables.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut client = match lookup("REDIS_URL") {
            Some(uri) => parse_redis_uri(&uri)?.into_client_config()?,
            None => {
                let mut client = ClientConfig::default();
                if let Some(addr) = lookup("REDIS_ADDR") {
                    client.addr = addr;
                }
                client.username = lookup("REDIS_USERNAME");
                client.password = lookup("REDIS_PASSWORD");
                if let Some(db) = lookup("REDIS_DB") {
                    client.db = db
                        .parse()
                        .map_err(|_| RedisKitError::config(format!("REDIS_DB is not a number: {}", db)))?;
                }
                client
            }
        };

        if let Some(prefix) = lookup("REDIS_PREFIX") {
            client.prefix = prefix;
        }
        if let Some(size) = lookup("REDIS_POOL_SIZE") {
            client.pool_size = size.parse().map_err(|_| {
                RedisKitError::config(format!("REDIS_POOL_SIZE is not a number: {}", size))
            })?;
        }

        let mut config = Self {
            client,
            ..Default::default()
        };
        if let Some(stream) = lookup("REDIS_STREAM") {
            config.stream.name = stream;
        }
        if let Some(level) = lookup("REDIS_LOG_LEVEL") {
            config.logging = level.parse()?;
        }
        if let Some(format) = lookup("REDIS_LOG_FORMAT") {
            config.log_format = format.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.client
            .validate()
            .map_err(|e| RedisKitError::config(format!("Client config error: {}", e)))?;

        if let Some(cluster) = &self.cluster {
            cluster
                .validate()
                .map_err(|e| RedisKitError::config(format!("Cluster config error: {}", e)))?;
        }

        if let Some(collection) = &self.collection {
            collection
                .validate()
                .map_err(|e| RedisKitError::config(format!("Collection config error: {}", e)))?;
        }

        self.stream
            .validate()
            .map_err(|e| RedisKitError::config(format!("Stream config error: {}", e)))?;

        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.client = self.client.merge(other.client);
        if other.cluster.is_some() {
            self.cluster = other.cluster;
        }
        if other.collection.is_some() {
            self.collection = other.collection;
        }
        if other.stream != StreamConfig::default() {
            self.stream = other.stream;
        }
        if other.logging != LogLevel::default() {
            self.logging = other.logging;
        }
        if other.log_format != LogFormat::default() {
            self.log_format = other.log_format;
        }
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| RedisKitError::config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
