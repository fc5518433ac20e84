//! Stream publisher/consumer configuration

use super::*;
use crate::utils::retry::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where each consumer poll starts reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScanMode {
    /// Resume after the last entry seen by this consumer
    #[default]
    Cursor,
    /// Re-read from the start of the stream on every poll. Undeletable
    /// entries are seen (and reported) again on each poll.
    FullRange,
}

/// Stream wrapper settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Stream key, before the client prefix is applied
    pub name: String,
    /// Capacity of the delivery channel
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
    /// Capacity of the error channel
    #[serde(default = "default_buffer_size")]
    pub error_buffer_size: usize,
    /// Sleep after a poll that returned nothing
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
    #[serde(default)]
    pub scan_mode: ScanMode,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self::new("stream")
    }
}

impl StreamConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            buffer_size: default_buffer_size(),
            error_buffer_size: default_buffer_size(),
            poll_interval_ms: default_poll_interval_ms(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
            scan_mode: ScanMode::default(),
        }
    }

    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_ms = interval.as_millis() as u64;
        self
    }

    pub fn with_retry_delays(mut self, base: Duration, max: Duration) -> Self {
        self.retry_base_delay_ms = base.as_millis() as u64;
        self.retry_max_delay_ms = max.as_millis() as u64;
        self
    }

    pub fn with_scan_mode(mut self, mode: ScanMode) -> Self {
        self.scan_mode = mode;
        self
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Backoff applied between failed polls
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(usize::MAX)
            .with_base_delay(Duration::from_millis(self.retry_base_delay_ms))
            .with_max_delay(Duration::from_millis(self.retry_max_delay_ms))
            .with_jitter(true)
    }
}
