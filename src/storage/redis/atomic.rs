//! Atomic counter operations

use super::pool::RedisClient;
use crate::utils::error::Result;
use redis::AsyncCommands;

impl RedisClient {
    /// Increment a counter by one, returning the new value
    pub async fn incr(&self, key: &str) -> Result<i64> {
        self.incr_by(key, 1).await
    }

    /// Increment a counter by `delta`, returning the new value.
    /// A missing key counts from 0.
    pub async fn incr_by(&self, key: &str, delta: i64) -> Result<i64> {
        let mut conn = self.connection();
        let value: i64 = conn.incr(self.key(key), delta).await?;
        Ok(value)
    }

    /// Decrement a counter by `delta`, returning the new value
    pub async fn decr_by(&self, key: &str, delta: i64) -> Result<i64> {
        let mut conn = self.connection();
        let value: i64 = conn.decr(self.key(key), delta).await?;
        Ok(value)
    }
}
