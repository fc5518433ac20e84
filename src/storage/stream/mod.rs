//! Stream publisher and consumer loop
//!
//! ## Module Structure
//!
//! - `codec` - Versioned payload encoding for the `data` field
//! - `backend` - `StreamBackend` trait and its Redis implementation
//! - `memory` - In-memory backend
//! - `publisher` - `RedisStream`: publish and start consumers
//! - `consumer` - The poll/decode/claim/deliver loop
//! - `handle` - Channels and control handle of a running loop
//! - `tests` - Module tests

mod backend;
pub mod codec;
mod consumer;
mod handle;
mod memory;
mod publisher;

pub use backend::{DATA_FIELD, StreamBackend, StreamEntry};
pub use consumer::ConsumerStats;
pub use handle::{ConsumerHandle, ConsumerTask};
pub use memory::MemoryStreamBackend;
pub use publisher::RedisStream;
