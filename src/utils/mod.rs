//! Utility modules for redis-kit
//!
//! - **error**: crate error type and result alias
//! - **logging**: subscriber setup for applications without their own
//! - **retry**: exponential backoff used by connection setup and the stream consumer

pub mod error;
pub mod logging;
pub mod retry;

pub use error::{RedisKitError, Result};
pub use logging::{LogFormat, LogLevel, init_logging};
pub use retry::{Backoff, RetryPolicy};
