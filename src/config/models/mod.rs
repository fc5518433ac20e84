//! Configuration data models
//!
//! This module defines the configuration structures used to build clients,
//! DB collections, cluster connections and stream consumers.

#![allow(missing_docs)]

pub mod client;
pub mod cluster;
pub mod collection;
pub mod stream;

pub use client::*;
pub use cluster::*;
pub use collection::*;
pub use stream::*;

/// Default server address
pub fn default_addr() -> String {
    "127.0.0.1:6379".to_string()
}

/// Default Redis port, used when an address omits it
pub const DEFAULT_PORT: u16 = 6379;

/// Default number of multiplexed connections per client
pub fn default_pool_size() -> usize {
    4
}

/// Default dial timeout in milliseconds
pub fn default_dial_timeout_ms() -> u64 {
    5_000
}

/// Default socket read timeout in milliseconds
pub fn default_read_timeout_ms() -> u64 {
    3_000
}

/// Default socket write timeout in milliseconds
pub fn default_write_timeout_ms() -> u64 {
    3_000
}

/// Default number of connection attempts at construction
pub fn default_connect_attempts() -> usize {
    1
}

/// Default cluster MOVED/ASK redirect limit
pub fn default_max_redirects() -> u32 {
    8
}

/// Default stream delivery channel capacity
pub fn default_buffer_size() -> usize {
    100
}

/// Default stream idle poll interval in milliseconds
pub fn default_poll_interval_ms() -> u64 {
    100
}

/// Default first backoff delay after a poll failure, in milliseconds
pub fn default_retry_base_delay_ms() -> u64 {
    100
}

/// Default backoff ceiling, in milliseconds
pub fn default_retry_max_delay_ms() -> u64 {
    5_000
}

/// Default batch delete timeout in milliseconds
pub fn default_batch_timeout_ms() -> u64 {
    5_000
}

/// Append `:6379` to an address without an explicit port
pub fn with_default_port(addr: &str) -> String {
    if addr.rsplit_once(':').is_some_and(|(_, port)| port.parse::<u16>().is_ok()) {
        addr.to_string()
    } else {
        format!("{}:{}", addr, DEFAULT_PORT)
    }
}

/// Turn a configured prefix into the string prepended to keys.
///
/// An empty prefix yields no separator; otherwise the prefix gets a trailing
/// `:` unless it already ends with one.
pub fn key_prefix(prefix: &str) -> String {
    if prefix.is_empty() || prefix.ends_with(':') {
        prefix.to_string()
    } else {
        format!("{}:", prefix)
    }
}
