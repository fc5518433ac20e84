//! Stream publisher and consumer entry point

use super::backend::{DATA_FIELD, StreamBackend};
use super::codec;
use super::consumer::ConsumerLoop;
use super::handle::{ConsumerHandle, ConsumerTask};
use crate::config::StreamConfig;
use crate::storage::redis::RedisClient;
use crate::utils::error::{RedisKitError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::debug;

/// Publisher and consumer for one stream.
///
/// Messages are encoded with the stream codec into the `data` field of a
/// new entry. Consumers read, claim (XDEL) and deliver entries; see
/// [`RedisStream::consume`].
#[derive(Debug)]
pub struct RedisStream<B: StreamBackend = RedisClient> {
    backend: Arc<B>,
    config: StreamConfig,
}

impl<B: StreamBackend> Clone for RedisStream<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            config: self.config.clone(),
        }
    }
}

impl<B: StreamBackend> RedisStream<B> {
    pub fn new(backend: B, config: StreamConfig) -> Self {
        Self::with_backend(Arc::new(backend), config)
    }

    /// Share an existing backend between several streams
    pub fn with_backend(backend: Arc<B>, config: StreamConfig) -> Self {
        Self { backend, config }
    }

    /// Stream name, before the backend's key prefix
    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Encode `message` and append it to the stream, returning the entry ID
    pub async fn publish<T: Serialize + ?Sized>(&self, message: &T) -> Result<String> {
        let payload = codec::encode(message)?;
        self.publish_raw(payload).await
    }

    /// Append an already encoded payload as the `data` field
    pub async fn publish_raw(&self, payload: Vec<u8>) -> Result<String> {
        let id = self
            .backend
            .append(&self.config.name, DATA_FIELD, payload)
            .await?;
        debug!(stream = %self.config.name, id = %id, "Published entry");
        Ok(id)
    }

    /// Start a consumer loop and return its channels.
    ///
    /// Each poll handles at most `count` entries; `0` means no limit. The
    /// loop runs on the current tokio runtime until the handle is stopped
    /// or dropped, or its message receiver is closed.
    pub fn consume<T>(&self, count: usize) -> ConsumerHandle<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let (message_tx, message_rx) = mpsc::channel(self.config.buffer_size.max(1));
        let (error_tx, error_rx) = mpsc::channel(self.config.error_buffer_size.max(1));
        let task = self.consume_into(count, message_tx, error_tx);
        ConsumerHandle::new(message_rx, error_rx, task)
    }

    /// Start a consumer loop that delivers into caller-provided channels
    pub fn consume_into<T>(
        &self,
        count: usize,
        messages: mpsc::Sender<T>,
        errors: mpsc::Sender<RedisKitError>,
    ) -> ConsumerTask
    where
        T: DeserializeOwned + Send + 'static,
    {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let consumer = ConsumerLoop::new(
            Arc::clone(&self.backend),
            self.config.clone(),
            count,
            messages,
            errors,
            shutdown_rx,
        );
        let join = tokio::spawn(consumer.run());
        ConsumerTask::new(shutdown_tx, join)
    }
}

impl RedisClient {
    /// Stream wrapper using this client (and its key prefix)
    pub fn stream(&self, config: StreamConfig) -> RedisStream<RedisClient> {
        RedisStream::new(self.clone(), config)
    }
}
