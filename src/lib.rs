//! # redis-kit
//!
//! Key-prefixed convenience wrapper around the `redis` crate.
//!
//! ## Features
//!
//! - **Key prefixes**: every key-taking operation prepends `<prefix>:`
//! - **Typed results**: missing keys are `None`, TTLs are [`KeyTtl`]
//! - **Connection setup**: single node, several databases on one server,
//!   cluster, or a `redis://` / `rediss://` / `redis-socket://` URI
//! - **Streams**: publish serde values and consume them on a background task,
//!   with at-most-once delivery across competing consumers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use redis_kit::{ClientConfig, RedisClient, StreamConfig};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! struct Order {
//!     order_id: u64,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = ClientConfig::new("127.0.0.1:6379");
//!     config.prefix = "shop".to_string();
//!     let client = RedisClient::connect(&config).await?;
//!
//!     // Stored under "shop:greeting"
//!     client.set("greeting", "hello", None).await?;
//!
//!     let stream = client.stream(StreamConfig::new("orders"));
//!     stream.publish(&Order { order_id: 42 }).await?;
//!
//!     let mut consumer = stream.consume::<Order>(0);
//!     if let Some(order) = consumer.recv().await {
//!         println!("received {:?}", order);
//!     }
//!     let stats = consumer.stop().await?;
//!     println!("delivered {}", stats.delivered);
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::{
    ClientConfig, ClientOptions, ClusterConfig, CollectionConfig, Config, ConnOpt, FailoverConfig,
    ScanMode, StreamConfig, Validate, parse_redis_uri,
};
pub use storage::{
    ConsumerHandle, ConsumerStats, ConsumerTask, KeyTtl, MemoryStreamBackend, RedisClient,
    RedisCollection, RedisStream, StreamBackend, StreamEntry,
};
pub use utils::error::{RedisKitError, Result};
pub use utils::logging::{LogFormat, LogLevel, init_logging};
