//! List and set operations

use super::pool::RedisClient;
use crate::utils::error::Result;
use redis::{AsyncCommands, FromRedisValue, ToRedisArgs};

impl RedisClient {
    // ===== List operations =====

    /// Push values to the head of a list, returning its new length
    pub async fn lpush<V>(&self, key: &str, values: &[V]) -> Result<u64>
    where
        V: ToRedisArgs + Send + Sync,
    {
        let mut conn = self.connection();
        let len: u64 = conn.lpush(self.key(key), values).await?;
        Ok(len)
    }

    /// Push values to the tail of a list, returning its new length
    pub async fn rpush<V>(&self, key: &str, values: &[V]) -> Result<u64>
    where
        V: ToRedisArgs + Send + Sync,
    {
        let mut conn = self.connection();
        let len: u64 = conn.rpush(self.key(key), values).await?;
        Ok(len)
    }

    /// Pop from the head of a list
    pub async fn lpop(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection();
        let value: Option<String> = conn.lpop(self.key(key), None).await?;
        Ok(value)
    }

    /// Pop from the tail of a list
    pub async fn rpop(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection();
        let value: Option<String> = conn.rpop(self.key(key), None).await?;
        Ok(value)
    }

    pub async fn llen(&self, key: &str) -> Result<u64> {
        let mut conn = self.connection();
        let len: u64 = conn.llen(self.key(key)).await?;
        Ok(len)
    }

    /// Remove occurrences of `value` (LREM semantics for `count`), returning
    /// the number removed
    pub async fn lrem<V>(&self, key: &str, count: isize, value: V) -> Result<u64>
    where
        V: ToRedisArgs + Send + Sync,
    {
        let mut conn = self.connection();
        let removed: u64 = conn.lrem(self.key(key), count, value).await?;
        Ok(removed)
    }

    pub async fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<String>> {
        let mut conn = self.connection();
        let values: Vec<String> = conn.lrange(self.key(key), start, stop).await?;
        Ok(values)
    }

    // ===== Set operations =====

    /// Add members to a set, returning how many were new
    pub async fn sadd<V>(&self, key: &str, members: &[V]) -> Result<u64>
    where
        V: ToRedisArgs + Send + Sync,
    {
        let mut conn = self.connection();
        let added: u64 = conn.sadd(self.key(key), members).await?;
        Ok(added)
    }

    /// Remove members from a set, returning how many were present
    pub async fn srem<V>(&self, key: &str, members: &[V]) -> Result<u64>
    where
        V: ToRedisArgs + Send + Sync,
    {
        let mut conn = self.connection();
        let removed: u64 = conn.srem(self.key(key), members).await?;
        Ok(removed)
    }

    pub async fn sismember<V>(&self, key: &str, member: V) -> Result<bool>
    where
        V: ToRedisArgs + Send + Sync,
    {
        let mut conn = self.connection();
        let is_member: bool = conn.sismember(self.key(key), member).await?;
        Ok(is_member)
    }

    /// All members of a set; empty when the key is missing
    pub async fn smembers<T: FromRedisValue>(&self, key: &str) -> Result<Vec<T>> {
        let mut conn = self.connection();
        let members: Vec<T> = conn.smembers(self.key(key)).await?;
        Ok(members)
    }

    /// Remove and return a random member
    pub async fn spop(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection();
        let member: Option<String> = conn.spop(self.key(key)).await?;
        Ok(member)
    }
}
