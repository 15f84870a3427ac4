use std::future::Future;
use std::time::Duration;
use tracing::warn;

use crate::error::{CollectorError, Result};

/// Why a single attempt did not produce a value
#[derive(Debug)]
pub enum AttemptError {
    /// HTTP 429. Does not consume retry budget.
    RateLimited { retry_after: Option<Duration> },
    /// Anything else; consumes one attempt
    Failed(CollectorError),
}

impl From<CollectorError> for AttemptError {
    fn from(err: CollectorError) -> Self {
        AttemptError::Failed(err)
    }
}

impl From<reqwest::Error> for AttemptError {
    fn from(err: reqwest::Error) -> Self {
        AttemptError::Failed(err.into())
    }
}

/// Bounded retry with exponential backoff
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Run `op` until it succeeds or the attempt budget is spent.
    ///
    /// Rate-limited attempts sleep for the server's `Retry-After` (or the
    /// current backoff delay) and are retried without counting. Other failures
    /// sleep the current delay, double it and count one attempt.
    pub async fn run<T, F, Fut>(&self, label: &str, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<T, AttemptError>>,
    {
        let mut delay = self.base_delay;
        let mut attempt = 0;

        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(AttemptError::RateLimited { retry_after }) => {
                    let wait = retry_after.unwrap_or(delay);
                    warn!("⏳ Rate limited on {}. Retrying in {:?}...", label, wait);
                    tokio::time::sleep(wait).await;
                }
                Err(AttemptError::Failed(err)) => {
                    attempt += 1;
                    warn!(
                        "⚠️ Request to {} failed (attempt {}/{}): {}",
                        label, attempt, self.max_attempts, err
                    );

                    if attempt >= self.max_attempts {
                        return Err(CollectorError::RetriesExhausted {
                            attempts: attempt,
                            last: Box::new(err),
                        });
                    }

                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }
    }
}

/// Parse an integer-seconds `Retry-After` header value
pub fn parse_retry_after(value: Option<&str>) -> Option<Duration> {
    value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
