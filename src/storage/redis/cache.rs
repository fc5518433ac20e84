//! Basic key-value operations
//!
//! get, set, has, exists, delete, expire and ttl. Every key is prefixed.

use super::pool::RedisClient;
use crate::utils::error::Result;
use redis::{AsyncCommands, FromRedisValue, ToRedisArgs};
use std::time::Duration;

/// Remaining lifetime of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTtl {
    /// The key does not exist
    Missing,
    /// The key exists and has no expiry
    Persistent,
    Expires(Duration),
}

impl KeyTtl {
    /// Interpret a PTTL reply
    pub fn from_pttl(millis: i64) -> Self {
        match millis {
            -2 => Self::Missing,
            ms if ms < 0 => Self::Persistent,
            ms => Self::Expires(Duration::from_millis(ms as u64)),
        }
    }

    pub fn exists(&self) -> bool {
        !matches!(self, Self::Missing)
    }
}

impl RedisClient {
    /// Get a string value; `None` when the key is missing
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        self.get_as(key).await
    }

    /// Get a value converted to `T`; `None` when the key is missing
    pub async fn get_as<T: FromRedisValue>(&self, key: &str) -> Result<Option<T>> {
        let mut conn = self.connection();
        let value: Option<T> = conn.get(self.key(key)).await?;
        Ok(value)
    }

    /// Set a value. A `ttl` of `None` or zero stores the key without expiry.
    pub async fn set<V>(&self, key: &str, value: V, ttl: Option<Duration>) -> Result<()>
    where
        V: ToRedisArgs + Send + Sync,
    {
        let mut conn = self.connection();
        let key = self.key(key);
        match ttl.filter(|ttl| !ttl.is_zero()) {
            Some(ttl) => {
                let millis = (ttl.as_millis() as u64).max(1);
                let _: () = conn.pset_ex(key, value, millis).await?;
            }
            None => {
                let _: () = conn.set(key, value).await?;
            }
        }
        Ok(())
    }

    /// Check if a key exists
    pub async fn has(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection();
        let exists: bool = conn.exists(self.key(key)).await?;
        Ok(exists)
    }

    /// Number of the given keys that exist
    pub async fn exists(&self, keys: &[&str]) -> Result<u64> {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut conn = self.connection();
        let count: u64 = conn.exists(self.keys(keys)).await?;
        Ok(count)
    }

    /// Delete keys, returning how many existed
    pub async fn delete(&self, keys: &[&str]) -> Result<u64> {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut conn = self.connection();
        let deleted: u64 = conn.del(self.keys(keys)).await?;
        Ok(deleted)
    }

    /// Set a key's time to live. `false` when the key does not exist.
    pub async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        let mut conn = self.connection();
        let updated: bool = conn.pexpire(self.key(key), ttl.as_millis() as i64).await?;
        Ok(updated)
    }

    /// Remaining time to live of a key
    pub async fn ttl(&self, key: &str) -> Result<KeyTtl> {
        let mut conn = self.connection();
        let millis: i64 = conn.pttl(self.key(key)).await?;
        Ok(KeyTtl::from_pttl(millis))
    }

    pub(crate) fn keys(&self, keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| self.key(k)).collect()
    }
}
