//! Cluster client configuration

use super::*;
use crate::utils::error::{RedisKitError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Settings for a client that talks to a Redis Cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Seed list of `host:port` node addresses
    pub addrs: Vec<String>,
    /// Retries on network errors and MOVED/ASK redirects
    #[serde(default = "default_max_redirects")]
    pub max_redirects: u32,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub prefix: String,
    #[serde(default = "default_dial_timeout_ms")]
    pub dial_timeout_ms: u64,
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
    #[serde(default = "default_write_timeout_ms")]
    pub write_timeout_ms: u64,
    #[serde(default)]
    pub tls: Option<TlsConfig>,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            addrs: Vec::new(),
            max_redirects: default_max_redirects(),
            username: None,
            password: None,
            prefix: String::new(),
            dial_timeout_ms: default_dial_timeout_ms(),
            read_timeout_ms: default_read_timeout_ms(),
            write_timeout_ms: default_write_timeout_ms(),
            tls: None,
        }
    }
}

impl ClusterConfig {
    pub fn new<I, S>(addrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            addrs: addrs.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn key_prefix(&self) -> String {
        key_prefix(&self.prefix)
    }

    pub fn dial_timeout(&self) -> Duration {
        Duration::from_millis(self.dial_timeout_ms)
    }

    pub fn response_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms.max(self.write_timeout_ms))
    }

    /// One connection URL per seed node. Credentials are applied by the
    /// cluster builder, not embedded here.
    pub fn node_urls(&self) -> Result<Vec<String>> {
        let scheme = if self.tls.is_some() { "rediss" } else { "redis" };
        self.addrs
            .iter()
            .map(|addr| {
                let mut url = Url::parse(&format!("{}://{}", scheme, with_default_port(addr)))
                    .map_err(|e| RedisKitError::invalid_uri(format!("{}: {}", addr, e)))?;
                if self.tls.as_ref().is_some_and(|tls| tls.insecure) {
                    url.set_fragment(Some("insecure"));
                }
                Ok(url.to_string())
            })
            .collect()
    }
}
