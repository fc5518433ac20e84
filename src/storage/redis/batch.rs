//! Pattern-based batch deletion

use super::pool::RedisClient;
use crate::config::models::default_batch_timeout_ms;
use crate::utils::error::{RedisKitError, Result};
use redis::AsyncCommands;
use std::time::Duration;
use tracing::{debug, warn};

const SCAN_COUNT: usize = 100;

impl RedisClient {
    /// Delete every key matching `pattern` (prefix applied), returning the
    /// number of keys removed.
    ///
    /// Runs SCAN/DEL rounds until the cursor wraps or `timeout` (default 5s)
    /// elapses. Not available in cluster mode.
    pub async fn batch_delete(&self, pattern: &str, timeout: Option<Duration>) -> Result<u64> {
        if self.is_cluster() {
            return Err(RedisKitError::unsupported(
                "batch delete relies on SCAN, which is per-node in cluster mode",
            ));
        }

        let timeout = timeout.unwrap_or(Duration::from_millis(default_batch_timeout_ms()));
        let pattern = self.key(pattern);
        debug!("Batch deleting keys matching {}", pattern);

        match tokio::time::timeout(timeout, self.scan_and_delete(&pattern)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Batch delete of {} timed out after {:?}", pattern, timeout);
                Err(RedisKitError::timeout(format!(
                    "batch delete of {} did not finish within {:?}",
                    pattern, timeout
                )))
            }
        }
    }

    async fn scan_and_delete(&self, pattern: &str) -> Result<u64> {
        let mut conn = self.connection();
        let mut cursor: u64 = 0;
        let mut deleted = 0;

        loop {
            let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_COUNT)
                .query_async(&mut conn)
                .await?;

            if !keys.is_empty() {
                let removed: u64 = conn.del(&keys).await?;
                deleted += removed;
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        debug!("Batch delete of {} removed {} keys", pattern, deleted);
        Ok(deleted)
    }
}
