//! Stream consumer loop
//!
//! Each poll reads a batch with XRANGE and walks it in ID order. An entry is
//! decoded, a delivery slot is reserved, the entry is claimed with XDEL, and
//! only a successful claim (1 entry removed) is followed by delivery. With
//! several loops on one stream, the loop whose XDEL removes the entry is the
//! only one that delivers it.
//!
//! Entries that fail to decode are reported and left in the stream. Every
//! poll, decode and claim failure is sent on the error channel; a full
//! error channel holds the loop back until it is drained or stopped.

use super::backend::{DATA_FIELD, StreamBackend, StreamEntry};
use super::codec;
use crate::config::{ScanMode, StreamConfig};
use crate::utils::error::RedisKitError;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// Counters returned when a consumer loop ends
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsumerStats {
    /// Range requests issued, failed ones included
    pub polls: u64,
    pub delivered: u64,
    pub decode_failures: u64,
    pub poll_failures: u64,
    pub delete_failures: u64,
    /// Entries claimed by another consumer first
    pub skipped: u64,
    /// Errors still waiting for room in the error channel when the loop stopped
    pub unreported_errors: u64,
    /// Last entry this loop moved past
    pub last_entry_id: Option<String>,
}

enum BatchOutcome {
    /// Batch handled; `delivered` entries went to the channel
    Done { delivered: usize },
    /// A claim failed; the entry stays ahead of the cursor
    DeleteFailed,
    /// Shutdown was signalled or the receiver is gone
    Stopped,
}

pub(crate) struct ConsumerLoop<B, T> {
    backend: Arc<B>,
    stream: String,
    count: usize,
    config: StreamConfig,
    messages: mpsc::Sender<T>,
    errors: mpsc::Sender<RedisKitError>,
    shutdown: watch::Receiver<bool>,
    cursor: Option<String>,
    stats: ConsumerStats,
    _message: PhantomData<fn() -> T>,
}

impl<B, T> ConsumerLoop<B, T>
where
    B: StreamBackend,
    T: DeserializeOwned + Send + 'static,
{
    pub(crate) fn new(
        backend: Arc<B>,
        config: StreamConfig,
        count: usize,
        messages: mpsc::Sender<T>,
        errors: mpsc::Sender<RedisKitError>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            backend,
            stream: config.name.clone(),
            count,
            config,
            messages,
            errors,
            shutdown,
            cursor: None,
            stats: ConsumerStats::default(),
            _message: PhantomData,
        }
    }

    pub(crate) async fn run(mut self) -> ConsumerStats {
        info!(stream = %self.stream, count = self.count, "Stream consumer started");

        let mut backoff = self.config.retry_policy().backoff();
        let limit = (self.count > 0).then_some(self.count);

        loop {
            if *self.shutdown.borrow() || self.messages.is_closed() {
                break;
            }

            let start = self.scan_start();
            let polled = tokio::select! {
                _ = self.shutdown.changed() => break,
                polled = self.backend.range(&self.stream, &start, limit) => polled,
            };
            self.stats.polls += 1;

            let entries = match polled {
                Ok(entries) => {
                    backoff.reset();
                    entries
                }
                Err(e) => {
                    self.stats.poll_failures += 1;
                    let delay = backoff.next_delay();
                    warn!(stream = %self.stream, "Stream poll failed, retrying in {:?}: {}", delay, e);
                    if !self.report(e).await || !self.pause(delay).await {
                        break;
                    }
                    continue;
                }
            };

            if entries.is_empty() {
                if !self.pause(self.config.poll_interval()).await {
                    break;
                }
                continue;
            }

            debug!(stream = %self.stream, "Polled {} entries", entries.len());
            match self.process(entries).await {
                BatchOutcome::Done { delivered } => {
                    // Nothing handed over: undecodable or contended entries
                    // would otherwise be re-polled without pause.
                    if delivered == 0 && !self.pause(self.config.poll_interval()).await {
                        break;
                    }
                }
                BatchOutcome::DeleteFailed => {
                    if !self.pause(backoff.next_delay()).await {
                        break;
                    }
                }
                BatchOutcome::Stopped => break,
            }
        }

        info!(
            stream = %self.stream,
            polls = self.stats.polls,
            delivered = self.stats.delivered,
            skipped = self.stats.skipped,
            "Stream consumer stopped"
        );
        self.stats
    }

    async fn process(&mut self, entries: Vec<StreamEntry>) -> BatchOutcome {
        let messages = self.messages.clone();
        let mut delivered = 0;

        for entry in entries {
            let message = match decode_entry::<T>(&entry) {
                Ok(message) => message,
                Err(e) => {
                    self.stats.decode_failures += 1;
                    warn!(stream = %self.stream, "Leaving undecodable entry in place: {}", e);
                    self.advance(entry.id);
                    if !self.report(e).await {
                        return BatchOutcome::Stopped;
                    }
                    continue;
                }
            };

            let permit = tokio::select! {
                _ = self.shutdown.changed() => return BatchOutcome::Stopped,
                permit = messages.reserve() => match permit {
                    Ok(permit) => permit,
                    Err(_) => return BatchOutcome::Stopped,
                },
            };

            // Not raced against shutdown: a claim that completes server-side
            // must be followed by delivery.
            match self.backend.remove(&self.stream, &entry.id).await {
                Ok(0) => {
                    self.stats.skipped += 1;
                    debug!(stream = %self.stream, id = %entry.id, "Entry already claimed");
                    drop(permit);
                }
                Ok(_) => {
                    permit.send(message);
                    self.stats.delivered += 1;
                    delivered += 1;
                }
                Err(e) => {
                    self.stats.delete_failures += 1;
                    warn!(stream = %self.stream, id = %entry.id, "Failed to claim entry: {}", e);
                    drop(permit);
                    if !self.report(e).await {
                        return BatchOutcome::Stopped;
                    }
                    return BatchOutcome::DeleteFailed;
                }
            }
            self.advance(entry.id);
        }

        BatchOutcome::Done { delivered }
    }

    fn scan_start(&self) -> String {
        match (self.config.scan_mode, &self.cursor) {
            (ScanMode::Cursor, Some(id)) => format!("({}", id),
            _ => "-".to_string(),
        }
    }

    fn advance(&mut self, id: String) {
        self.stats.last_entry_id = Some(id.clone());
        self.cursor = Some(id);
    }

    /// Send an error, waiting for room in the error channel.
    ///
    /// `false` when shutdown or a closed message receiver interrupted the
    /// wait; the error is then counted in `unreported_errors`. A closed
    /// error receiver is not a reason to stop.
    async fn report(&mut self, err: RedisKitError) -> bool {
        let err = match self.errors.try_send(err) {
            Ok(()) | Err(TrySendError::Closed(_)) => return true,
            Err(TrySendError::Full(err)) => err,
        };

        debug!(stream = %self.stream, "Error channel full, waiting for the receiver");
        let sent = tokio::select! {
            _ = self.shutdown.changed() => false,
            _ = self.messages.closed() => false,
            _ = self.errors.send(err) => true,
        };
        if !sent {
            self.stats.unreported_errors += 1;
        }
        sent
    }

    /// Sleep for `delay`. `false` when the loop should stop instead.
    async fn pause(&mut self, delay: Duration) -> bool {
        tokio::select! {
            _ = self.shutdown.changed() => false,
            _ = self.messages.closed() => false,
            _ = tokio::time::sleep(delay) => true,
        }
    }
}

fn decode_entry<T: DeserializeOwned>(entry: &StreamEntry) -> Result<T, RedisKitError> {
    let payload = entry.field(DATA_FIELD).ok_or_else(|| {
        RedisKitError::codec(format!("entry {} has no `{}` field", entry.id, DATA_FIELD))
    })?;
    codec::decode(payload).map_err(|e| match e {
        RedisKitError::Codec(msg) => RedisKitError::codec(format!("entry {}: {}", entry.id, msg)),
        other => other,
    })
}
