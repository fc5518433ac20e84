//! In-memory stream backend
//!
//! Mirrors the XADD/XRANGE/XDEL semantics the consumer loop depends on:
//! strictly increasing `<ms>-<seq>` IDs, inclusive and exclusive range
//! starts, and XDEL returning 0 for an entry that is already gone. Poll
//! failures and slow deletes can be injected to exercise the loop's error
//! and race handling without a server.

use super::backend::{StreamBackend, StreamEntry};
use crate::utils::error::{RedisKitError, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

type EntryId = (u64, u64);

#[derive(Debug, Default)]
struct MemoryState {
    streams: HashMap<String, BTreeMap<EntryId, HashMap<String, Vec<u8>>>>,
    last_id: EntryId,
}

#[derive(Debug, Default)]
struct MemoryInner {
    state: Mutex<MemoryState>,
    failing_polls: AtomicUsize,
    remove_delay_ms: AtomicU64,
    polls: AtomicUsize,
}

/// Stream backend that keeps entries in process memory.
///
/// Clones share the same streams.
#[derive(Debug, Clone, Default)]
pub struct MemoryStreamBackend {
    inner: Arc<MemoryInner>,
}

impl MemoryStreamBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `n` range calls fail with a connection error
    pub fn fail_next_polls(&self, n: usize) {
        self.inner.failing_polls.store(n, Ordering::SeqCst);
    }

    /// Sleep this long before every remove
    pub fn set_remove_delay(&self, delay: Duration) {
        self.inner
            .remove_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    /// Number of range calls served so far, failed ones included
    pub fn polls(&self) -> usize {
        self.inner.polls.load(Ordering::SeqCst)
    }

    /// Number of entries currently in `stream`
    pub fn len(&self, stream: &str) -> usize {
        self.inner
            .state
            .lock()
            .streams
            .get(stream)
            .map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self, stream: &str) -> bool {
        self.len(stream) == 0
    }

    /// Snapshot of every entry in `stream`, in ID order
    pub fn entries(&self, stream: &str) -> Vec<StreamEntry> {
        let state = self.inner.state.lock();
        state
            .streams
            .get(stream)
            .map(|entries| {
                entries
                    .iter()
                    .map(|(id, fields)| StreamEntry {
                        id: format_id(*id),
                        fields: fields.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn next_id(state: &mut MemoryState) -> EntryId {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_millis() as u64);
        let (last_ms, last_seq) = state.last_id;
        let id = if now > last_ms {
            (now, 0)
        } else {
            (last_ms, last_seq + 1)
        };
        state.last_id = id;
        id
    }
}

fn format_id((ms, seq): EntryId) -> String {
    format!("{}-{}", ms, seq)
}

fn parse_id(id: &str) -> Result<EntryId> {
    let invalid = || RedisKitError::validation(format!("invalid stream ID: {:?}", id));
    match id.split_once('-') {
        Some((ms, seq)) => Ok((
            ms.parse().map_err(|_| invalid())?,
            seq.parse().map_err(|_| invalid())?,
        )),
        None => Ok((id.parse().map_err(|_| invalid())?, 0)),
    }
}

fn parse_start(start: &str) -> Result<Bound<EntryId>> {
    match start {
        "-" => Ok(Bound::Unbounded),
        _ => match start.strip_prefix('(') {
            Some(id) => Ok(Bound::Excluded(parse_id(id)?)),
            None => Ok(Bound::Included(parse_id(start)?)),
        },
    }
}

#[async_trait]
impl StreamBackend for MemoryStreamBackend {
    async fn append(&self, stream: &str, field: &str, payload: Vec<u8>) -> Result<String> {
        let mut state = self.inner.state.lock();
        let id = Self::next_id(&mut state);
        let fields = HashMap::from([(field.to_string(), payload)]);
        state
            .streams
            .entry(stream.to_string())
            .or_default()
            .insert(id, fields);
        Ok(format_id(id))
    }

    async fn range(
        &self,
        stream: &str,
        start: &str,
        count: Option<usize>,
    ) -> Result<Vec<StreamEntry>> {
        self.inner.polls.fetch_add(1, Ordering::SeqCst);
        let failing = self
            .inner
            .failing_polls
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if failing.is_ok() {
            return Err(RedisKitError::connection("injected poll failure"));
        }

        let start = parse_start(start)?;
        let state = self.inner.state.lock();
        let Some(entries) = state.streams.get(stream) else {
            return Ok(Vec::new());
        };

        Ok(entries
            .range((start, Bound::Unbounded))
            .take(count.unwrap_or(usize::MAX))
            .map(|(id, fields)| StreamEntry {
                id: format_id(*id),
                fields: fields.clone(),
            })
            .collect())
    }

    async fn remove(&self, stream: &str, id: &str) -> Result<u64> {
        let delay = self.inner.remove_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        let id = parse_id(id)?;
        let mut state = self.inner.state.lock();
        let removed = state
            .streams
            .get_mut(stream)
            .and_then(|entries| entries.remove(&id))
            .is_some();
        Ok(u64::from(removed))
    }
}
