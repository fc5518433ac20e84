//! Error handling for redis-kit
//!
//! This module defines the error type shared by every client, collection and
//! stream operation in the crate.

#![allow(missing_docs)]

mod conversions;
mod helpers;
mod types;

pub use types::{RedisKitError, Result};
