//! Key-prefixed Redis client
//!
//! ## Module Structure
//!
//! - `pool` - Client construction, connection rotation and health checks
//! - `connection` - Single-node / cluster connection handle
//! - `cache` - Basic key-value operations (get, set, has, delete, expire, ttl)
//! - `atomic` - Counters
//! - `collections` - List and Set operations
//! - `hash` - Hash and Sorted Set operations
//! - `batch` - Pattern-based batch deletion
//! - `collection` - Clients for several logical databases
//! - `tests` - Module tests

mod atomic;
mod batch;
mod cache;
mod collection;
mod collections;
mod connection;
mod hash;
mod pool;

pub use cache::KeyTtl;
pub use collection::RedisCollection;
pub use pool::RedisClient;
