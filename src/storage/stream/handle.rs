//! Handles to running consumer loops

use super::consumer::ConsumerStats;
use crate::utils::error::{RedisKitError, Result};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Control handle for a consumer task.
///
/// Dropping it signals the loop to stop.
#[derive(Debug)]
pub struct ConsumerTask {
    shutdown: watch::Sender<bool>,
    join: JoinHandle<ConsumerStats>,
}

impl ConsumerTask {
    pub(crate) fn new(shutdown: watch::Sender<bool>, join: JoinHandle<ConsumerStats>) -> Self {
        Self { shutdown, join }
    }

    /// Ask the loop to stop without waiting for it
    pub fn cancel(&self) {
        // Err only means the loop has already exited.
        let _ = self.shutdown.send(true);
    }

    /// Stop the loop and wait for it to finish
    pub async fn stop(self) -> Result<ConsumerStats> {
        self.cancel();
        self.join().await
    }

    /// Wait for the loop to end on its own (its message receiver dropped)
    pub async fn join(self) -> Result<ConsumerStats> {
        let Self { shutdown, join } = self;
        let stats = join.await?;
        drop(shutdown);
        Ok(stats)
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}

/// Receivers for one consumer loop plus its control handle
#[derive(Debug)]
pub struct ConsumerHandle<T> {
    /// Decoded messages, in stream order per batch
    pub messages: mpsc::Receiver<T>,
    /// Poll, decode and claim failures
    pub errors: mpsc::Receiver<RedisKitError>,
    task: ConsumerTask,
}

impl<T> ConsumerHandle<T> {
    pub(crate) fn new(
        messages: mpsc::Receiver<T>,
        errors: mpsc::Receiver<RedisKitError>,
        task: ConsumerTask,
    ) -> Self {
        Self {
            messages,
            errors,
            task,
        }
    }

    /// Next message; `None` once the loop has ended and the buffer is drained
    pub async fn recv(&mut self) -> Option<T> {
        self.messages.recv().await
    }

    /// Next reported error, waiting for one
    pub async fn recv_error(&mut self) -> Option<RedisKitError> {
        self.errors.recv().await
    }

    /// A reported error, if one is buffered
    pub fn try_recv_error(&mut self) -> Option<RedisKitError> {
        self.errors.try_recv().ok()
    }

    pub fn task(&self) -> &ConsumerTask {
        &self.task
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the loop and wait for it. Messages still buffered are discarded;
    /// their entries are already gone from the stream.
    pub async fn stop(self) -> Result<ConsumerStats> {
        self.task.stop().await
    }

    /// Stop the loop, wait for it, and return the messages it had already
    /// delivered into the buffer, in delivery order
    pub async fn stop_and_drain(self) -> Result<(ConsumerStats, Vec<T>)> {
        let Self {
            mut messages, task, ..
        } = self;
        let stats = task.stop().await?;

        let mut buffered = Vec::new();
        while let Ok(message) = messages.try_recv() {
            buffered.push(message);
        }
        Ok((stats, buffered))
    }

    /// Take the receivers and the control handle apart
    pub fn into_parts(
        self,
    ) -> (
        mpsc::Receiver<T>,
        mpsc::Receiver<RedisKitError>,
        ConsumerTask,
    ) {
        (self.messages, self.errors, self.task)
    }
}
