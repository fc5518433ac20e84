//! Redis client construction and connection rotation
//!
//! A `RedisClient` owns `pool_size` managed connections to one server (or a
//! single cluster connection) and hands them out round-robin. All key-taking
//! operations run through [`RedisClient::key`], which applies the configured
//! prefix.

use super::connection::RedisConn;
use crate::config::{ClientConfig, ClusterConfig, ConnOpt, Validate, parse_redis_uri};
use crate::utils::error::{RedisKitError, Result};
use crate::utils::retry::RetryPolicy;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::cluster::ClusterClientBuilder;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info};

/// Key-prefixed Redis client
///
/// Cloning is cheap; clones share the same connections.
#[derive(Clone)]
pub struct RedisClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    conns: Vec<RedisConn>,
    next: AtomicUsize,
    prefix: String,
    db: i64,
    endpoint: String,
}

impl fmt::Debug for RedisClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisClient")
            .field("endpoint", &self.inner.endpoint)
            .field("db", &self.inner.db)
            .field("prefix", &self.inner.prefix)
            .field("connections", &self.inner.conns.len())
            .field("cluster", &self.is_cluster())
            .finish()
    }
}

impl RedisClient {
    /// Connect to a single server.
    ///
    /// Opens `pool_size` connections, each verified with a PING. Dialing is
    /// attempted `connect_attempts` times before giving up.
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        config.check()?;

        let url = config.connection_url()?;
        let endpoint = Self::sanitize_url(&url);
        info!("Creating Redis client for {}", endpoint);

        let client = redis::Client::open(url.as_str())
            .map_err(|e| RedisKitError::connection(format!("invalid connection info: {}", e)))?;
        let (dial_timeout, response_timeout) = (config.dial_timeout(), config.response_timeout());
        let policy = RetryPolicy::new(config.connect_attempts);

        let mut conns = Vec::with_capacity(config.pool_size);
        for _ in 0..config.pool_size {
            let manager = policy
                .execute(|| {
                    let manager_config = ConnectionManagerConfig::new()
                        .set_connection_timeout(dial_timeout)
                        .set_response_timeout(response_timeout);
                    Self::dial(client.clone(), manager_config)
                })
                .await?;
            conns.push(RedisConn::Single(manager));
        }

        info!(
            "Redis client connected to {} (db {}, {} connections)",
            endpoint, config.db, config.pool_size
        );
        Ok(Self::from_parts(conns, config.key_prefix(), config.db, endpoint))
    }

    /// Connect to a Redis Cluster through its seed nodes
    pub async fn connect_cluster(config: &ClusterConfig) -> Result<Self> {
        config.check()?;

        let nodes = config.node_urls()?;
        let endpoint = nodes.join(",");
        info!("Creating Redis cluster client for {}", endpoint);

        let mut builder = ClusterClientBuilder::new(nodes)
            .retries(config.max_redirects)
            .connection_timeout(config.dial_timeout())
            .response_timeout(config.response_timeout());
        if let Some(username) = &config.username {
            builder = builder.username(username.clone());
        }
        if let Some(password) = &config.password {
            builder = builder.password(password.clone());
        }

        let client = builder
            .build()
            .map_err(|e| RedisKitError::connection(format!("invalid cluster config: {}", e)))?;
        let mut conn = client
            .get_async_connection()
            .await
            .map_err(|e| RedisKitError::connection(format!("cluster dial failed: {}", e)))?;
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| RedisKitError::connection(format!("cluster ping failed: {}", e)))?;

        info!("Redis cluster client connected to {}", endpoint);
        Ok(Self::from_parts(
            vec![RedisConn::Cluster(conn)],
            config.key_prefix(),
            0,
            endpoint,
        ))
    }

    /// Parse a connection URI and connect, using `prefix` for every key
    pub async fn from_uri(uri: &str, prefix: &str) -> Result<Self> {
        Self::connect_opt(parse_redis_uri(uri)?, prefix).await
    }

    /// Connect with options produced by URI parsing
    pub async fn connect_opt(opt: ConnOpt, prefix: &str) -> Result<Self> {
        let mut config = opt.into_client_config()?;
        config.prefix = prefix.to_string();
        Self::connect(&config).await
    }

    async fn dial(client: redis::Client, config: ConnectionManagerConfig) -> Result<ConnectionManager> {
        let mut manager = ConnectionManager::new_with_config(client, config)
            .await
            .map_err(|e| RedisKitError::connection(format!("dial failed: {}", e)))?;
        let _: String = redis::cmd("PING")
            .query_async(&mut manager)
            .await
            .map_err(|e| RedisKitError::connection(format!("ping failed: {}", e)))?;
        Ok(manager)
    }

    fn from_parts(conns: Vec<RedisConn>, prefix: String, db: i64, endpoint: String) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                conns,
                next: AtomicUsize::new(0),
                prefix,
                db,
                endpoint,
            }),
        }
    }

    /// Next connection in rotation
    pub(crate) fn connection(&self) -> RedisConn {
        let conns = &self.inner.conns;
        let index = self.inner.next.fetch_add(1, Ordering::Relaxed) % conns.len();
        conns[index].clone()
    }

    /// Key with the configured prefix applied
    pub fn key(&self, key: &str) -> String {
        prefixed_key(&self.inner.prefix, key)
    }

    /// Effective prefix, separator included; empty when none is configured
    pub fn prefix(&self) -> &str {
        &self.inner.prefix
    }

    /// Logical database selected by this client
    pub fn db(&self) -> i64 {
        self.inner.db
    }

    pub fn is_cluster(&self) -> bool {
        self.inner.conns.first().is_some_and(RedisConn::is_cluster)
    }

    /// Send PING and return the reply
    pub async fn ping(&self) -> Result<String> {
        let mut conn = self.connection();
        let reply: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(reply)
    }

    /// Health check
    pub async fn health_check(&self) -> Result<()> {
        debug!("Performing Redis health check");
        let reply = self.ping().await?;
        if reply != "PONG" {
            return Err(RedisKitError::connection(format!(
                "unexpected PING reply: {}",
                reply
            )));
        }
        debug!("Redis health check passed");
        Ok(())
    }

    /// Close the client. Connections are released once every clone is dropped.
    pub async fn close(self) -> Result<()> {
        info!("Closing Redis client for {}", self.inner.endpoint);
        Ok(())
    }

    /// Sanitize Redis URL for logging (hide password)
    pub(crate) fn sanitize_url(url: &str) -> String {
        match url::Url::parse(url) {
            Ok(mut parsed) => {
                if parsed.password().is_some() {
                    let _ = parsed.set_password(Some("***"));
                }
                let hidden: Vec<(String, String)> = parsed
                    .query_pairs()
                    .map(|(k, v)| {
                        let v = if k == "pass" { "***".to_string() } else { v.into_owned() };
                        (k.into_owned(), v)
                    })
                    .collect();
                if !hidden.is_empty() {
                    parsed.query_pairs_mut().clear().extend_pairs(hidden);
                }
                parsed.to_string()
            }
            Err(_) => "invalid_url".to_string(),
        }
    }
}

/// `prefix` is expected in the form produced by `config::key_prefix`
pub(crate) fn prefixed_key(prefix: &str, key: &str) -> String {
    let mut full = String::with_capacity(prefix.len() + key.len());
    full.push_str(prefix);
    full.push_str(key);
    full
}
