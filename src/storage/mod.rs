//! Storage layer
//!
//! `redis` holds the key-prefixed client and its command wrappers; `stream`
//! builds the publisher and consumer loop on top of it.

/// Key-prefixed Redis client module
pub mod redis;
/// Stream publisher and consumer module
pub mod stream;

pub use self::redis::{KeyTtl, RedisClient, RedisCollection};
pub use self::stream::{
    ConsumerHandle, ConsumerStats, ConsumerTask, MemoryStreamBackend, RedisStream, StreamBackend,
    StreamEntry,
};
