//! Bounded retry with per-attempt timeout for external calls.
//!
//! Model completions and other network calls carry a timeout and a small
//! retry budget for transient failures. Exhausting the budget surfaces the
//! last error to the caller, which decides whether that is fatal for the
//! run or only for one question.

use docreply_core::{AppError, AppResult};
use std::future::Future;
use std::time::Duration;

/// Retry policy for external calls.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first)
    pub max_attempts: u32,

    /// Timeout applied to each individual attempt
    pub attempt_timeout: Duration,

    /// Base delay between attempts, scaled linearly by attempt number
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            attempt_timeout: Duration::from_secs(60),
            backoff: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// A policy that tries exactly once. Useful in tests.
    pub fn no_retries() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Run `op`, retrying on error or timeout up to the attempt budget.
    pub async fn run<T, F, Fut>(&self, what: &str, mut op: F) -> AppResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;

            match tokio::time::timeout(self.attempt_timeout, op()).await {
                Ok(Ok(value)) => return Ok(value),
                Ok(Err(err)) => {
                    if attempt >= self.max_attempts {
                        return Err(err);
                    }
                    tracing::warn!(
                        "{} failed (attempt {}/{}): {}",
                        what,
                        attempt,
                        self.max_attempts,
                        err
                    );
                }
                Err(_) => {
                    if attempt >= self.max_attempts {
                        return Err(AppError::Llm(format!(
                            "{} timed out after {:?}",
                            what, self.attempt_timeout
                        )));
                    }
                    tracing::warn!(
                        "{} timed out (attempt {}/{})",
                        what,
                        attempt,
                        self.max_attempts
                    );
                }
            }

            tokio::time::sleep(self.backoff * attempt).await;
        }
    }
}
