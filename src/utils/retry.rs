//! Retry utilities with exponential backoff
//!
//! `RetryPolicy` wraps a fallible async operation; `Backoff` is the stateful
//! form used by long-running loops that keep retrying forever but must not
//! spin on a persistent failure.

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, warn};

/// Retry policy with exponential backoff
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: usize,
    base_delay: Duration,
    max_delay: Duration,
    backoff_multiplier: f64,
    jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}

impl RetryPolicy {
    /// Create a new retry policy
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
            jitter: false,
        }
    }

    /// Set the base delay
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Set the maximum delay
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Set the backoff multiplier
    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier.max(1.0);
        self
    }

    /// Randomize each delay by up to +/-10%
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Start a stateful backoff sequence from this policy
    pub fn backoff(&self) -> Backoff {
        Backoff {
            policy: self.clone(),
            current: None,
        }
    }

    /// Execute a future with retry logic
    pub async fn execute<F, Fut, T, E>(&self, mut operation: F) -> std::result::Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: std::fmt::Debug,
    {
        let mut attempt = 0;
        let mut backoff = self.backoff();

        loop {
            attempt += 1;

            match operation().await {
                Ok(result) => {
                    if attempt > 1 {
                        debug!("Retry succeeded on attempt {}", attempt);
                    }
                    return Ok(result);
                }
                Err(e) => {
                    if attempt >= self.max_attempts {
                        error!("Operation failed after {} attempts: {:?}", attempt, e);
                        return Err(e);
                    }

                    let delay = backoff.next_delay();
                    warn!(
                        "Operation failed (attempt {}/{}): {:?}. Retrying in {:?}",
                        attempt, self.max_attempts, e, delay
                    );
                    sleep(delay).await;
                }
            }
        }
    }

    fn grow(&self, delay: Duration) -> Duration {
        let next = Duration::from_millis((delay.as_millis() as f64 * self.backoff_multiplier) as u64);
        std::cmp::min(next, self.max_delay)
    }

    fn apply_jitter(&self, delay: Duration) -> Duration {
        if !self.jitter {
            return delay;
        }
        let jitter = delay.as_millis() as f64 * 0.1 * (rand::random::<f64>() - 0.5) * 2.0;
        Duration::from_millis((delay.as_millis() as f64 + jitter).max(0.0) as u64)
    }
}

/// Unbounded sequence of growing delays, capped at the policy's max delay
#[derive(Debug, Clone)]
pub struct Backoff {
    policy: RetryPolicy,
    current: Option<Duration>,
}

impl Backoff {
    /// Delay to wait before the next attempt
    pub fn next_delay(&mut self) -> Duration {
        let delay = match self.current {
            None => std::cmp::min(self.policy.base_delay, self.policy.max_delay),
            Some(previous) => self.policy.grow(previous),
        };
        self.current = Some(delay);
        self.policy.apply_jitter(delay)
    }

    /// Forget accumulated failures after a success
    pub fn reset(&mut self) {
        self.current = None;
    }

    pub fn is_reset(&self) -> bool {
        self.current.is_none()
    }
}
