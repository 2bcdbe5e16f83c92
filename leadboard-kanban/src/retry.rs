//! Retry with exponential backoff for remote store calls

use crate::error::BoardError;
use crate::store::StoreError;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// Errors that know whether another attempt could succeed
pub trait RetryableError: std::error::Error + Send + Sync {
    fn is_retryable(&self) -> bool;
}

impl RetryableError for StoreError {
    fn is_retryable(&self) -> bool {
        StoreError::is_retryable(self)
    }
}

impl RetryableError for BoardError {
    fn is_retryable(&self) -> bool {
        BoardError::is_retryable(self)
    }
}

/// How often and how patiently to retry a failed call
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Attempts after the first one
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub backoff_multiplier: f64,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(500),
            backoff_multiplier: 2.0,
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Try once, never retry
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Retry `max_retries` times without sleeping in between
    pub fn immediate(max_retries: u32) -> Self {
        Self {
            max_retries,
            initial_delay: Duration::ZERO,
            backoff_multiplier: 1.0,
            max_delay: Duration::ZERO,
        }
    }

    /// Run `operation` until it succeeds, fails with a permanent error, or
    /// runs out of retries. The last error is returned.
    pub async fn retry<F, T, E, Fut>(&self, operation_name: &str, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: RetryableError,
    {
        let mut attempt = 0;
        let mut delay = self.initial_delay;

        loop {
            match operation().await {
                Ok(value) => {
                    if attempt > 0 {
                        info!(operation = operation_name, retries = attempt, "succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(error) => {
                    attempt += 1;

                    if !error.is_retryable() {
                        warn!(operation = operation_name, %error, "permanent failure");
                        return Err(error);
                    }

                    if attempt > self.max_retries {
                        warn!(
                            operation = operation_name,
                            attempts = attempt,
                            %error,
                            "giving up"
                        );
                        return Err(error);
                    }

                    warn!(
                        operation = operation_name,
                        attempt,
                        %error,
                        delay_ms = delay.as_millis() as u64,
                        "attempt failed, retrying"
                    );
                    if !delay.is_zero() {
                        sleep(delay).await;
                    }
                    delay = self.next_delay(delay);
                }
            }
        }
    }

    fn next_delay(&self, current: Duration) -> Duration {
        let next_ms = (current.as_millis() as f64 * self.backoff_multiplier) as u64;
        Duration::from_millis(next_ms).min(self.max_delay)
    }
}
