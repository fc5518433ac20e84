//! Stream storage seam
//!
//! The publisher and consumer loop only need three stream commands. They go
//! through [`StreamBackend`] so the loop can run against a live server
//! ([`RedisClient`]) or in memory ([`MemoryStreamBackend`](super::MemoryStreamBackend)).

use crate::storage::redis::RedisClient;
use crate::utils::error::Result;
use async_trait::async_trait;
use redis::AsyncCommands;
use redis::streams::StreamRangeReply;
use std::collections::HashMap;

/// Field holding the encoded message in every published entry
pub const DATA_FIELD: &str = "data";

/// One stream entry as read by XRANGE
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StreamEntry {
    /// Server-assigned `<ms>-<seq>` ID
    pub id: String,
    pub fields: HashMap<String, Vec<u8>>,
}

impl StreamEntry {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: HashMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn field(&self, name: &str) -> Option<&[u8]> {
        self.fields.get(name).map(Vec::as_slice)
    }
}

/// Stream commands used by [`RedisStream`](super::RedisStream).
///
/// `stream` is the unprefixed stream name; implementations apply their own
/// key prefix.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StreamBackend: Send + Sync + 'static {
    /// XADD with a server-assigned ID; returns the new entry ID
    async fn append(&self, stream: &str, field: &str, payload: Vec<u8>) -> Result<String>;

    /// XRANGE from `start` to `+`. `start` is `-`, an ID, or `(`ID for an
    /// exclusive start. `count` limits the number of entries returned.
    async fn range(
        &self,
        stream: &str,
        start: &str,
        count: Option<usize>,
    ) -> Result<Vec<StreamEntry>>;

    /// XDEL one entry; returns the number of entries removed (0 or 1)
    async fn remove(&self, stream: &str, id: &str) -> Result<u64>;
}

#[async_trait]
impl StreamBackend for RedisClient {
    async fn append(&self, stream: &str, field: &str, payload: Vec<u8>) -> Result<String> {
        let mut conn = self.connection();
        let id: String = conn.xadd(self.key(stream), "*", &[(field, payload)]).await?;
        Ok(id)
    }

    async fn range(
        &self,
        stream: &str,
        start: &str,
        count: Option<usize>,
    ) -> Result<Vec<StreamEntry>> {
        let mut conn = self.connection();
        let key = self.key(stream);
        let reply: StreamRangeReply = match count {
            Some(count) => conn.xrange_count(key, start, "+", count).await?,
            None => conn.xrange(key, start, "+").await?,
        };

        Ok(reply
            .ids
            .into_iter()
            .map(|entry| StreamEntry {
                id: entry.id,
                fields: entry
                    .map
                    .into_iter()
                    .filter_map(|(name, value)| {
                        redis::from_redis_value::<Vec<u8>>(&value)
                            .ok()
                            .map(|bytes| (name, bytes))
                    })
                    .collect(),
            })
            .collect())
    }

    async fn remove(&self, stream: &str, id: &str) -> Result<u64> {
        let mut conn = self.connection();
        let removed: u64 = conn.xdel(self.key(stream), &[id]).await?;
        Ok(removed)
    }
}
