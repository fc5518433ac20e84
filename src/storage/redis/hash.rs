//! Hash and sorted set operations

use super::pool::RedisClient;
use crate::utils::error::Result;
use redis::{AsyncCommands, ToRedisArgs};
use std::collections::HashMap;

impl RedisClient {
    // ===== Hash operations =====

    /// Set hash fields, returning how many fields were added (updates of
    /// existing fields are not counted)
    pub async fn hset<F, V>(&self, key: &str, fields: &[(F, V)]) -> Result<u64>
    where
        F: ToRedisArgs + Send + Sync,
        V: ToRedisArgs + Send + Sync,
    {
        if fields.is_empty() {
            return Ok(0);
        }
        let mut conn = self.connection();
        let added: u64 = redis::cmd("HSET")
            .arg(self.key(key))
            .arg(fields)
            .query_async(&mut conn)
            .await?;
        Ok(added)
    }

    pub async fn hget(&self, key: &str, field: &str) -> Result<Option<String>> {
        let mut conn = self.connection();
        let value: Option<String> = conn.hget(self.key(key), field).await?;
        Ok(value)
    }

    pub async fn hexists(&self, key: &str, field: &str) -> Result<bool> {
        let mut conn = self.connection();
        let exists: bool = conn.hexists(self.key(key), field).await?;
        Ok(exists)
    }

    /// Increment a hash field by `delta`, returning the new value
    pub async fn hincrby(&self, key: &str, field: &str, delta: i64) -> Result<i64> {
        let mut conn = self.connection();
        let value: i64 = conn.hincr(self.key(key), field, delta).await?;
        Ok(value)
    }

    /// Delete hash fields, returning how many were removed
    pub async fn hdel(&self, key: &str, fields: &[&str]) -> Result<u64> {
        let mut conn = self.connection();
        let removed: u64 = conn.hdel(self.key(key), fields).await?;
        Ok(removed)
    }

    pub async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>> {
        let mut conn = self.connection();
        let map: HashMap<String, String> = conn.hgetall(self.key(key)).await?;
        Ok(map)
    }

    // ===== Sorted set operations =====

    /// Add `(score, member)` pairs, returning how many members were new
    pub async fn zadd<M>(&self, key: &str, members: &[(f64, M)]) -> Result<u64>
    where
        M: ToRedisArgs + Send + Sync,
    {
        if members.is_empty() {
            return Ok(0);
        }
        let mut conn = self.connection();
        let added: u64 = conn.zadd_multiple(self.key(key), members).await?;
        Ok(added)
    }

    /// Members with scores in `[min, max]`, lowest score first
    pub async fn zrange_by_score(&self, key: &str, min: f64, max: f64) -> Result<Vec<String>> {
        let mut conn = self.connection();
        let members: Vec<String> = conn.zrangebyscore(self.key(key), min, max).await?;
        Ok(members)
    }
}
