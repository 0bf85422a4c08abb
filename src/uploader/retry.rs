use std::{future::Future, time::Duration};
use tracing::warn;

use crate::errors::Result;

/// Whole-batch retry settings: total attempts and a delay that doubles
/// between them.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub initial_delay: Duration,
    pub multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            initial_delay: Duration::from_secs(3),
            multiplier: 2,
        }
    }
}

/// Run `op`, re-running it from scratch after each retryable failure until
/// it succeeds, a non-retryable error occurs, or attempts are exhausted.
pub async fn retry_with_backoff<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut delay = policy.initial_delay;
    let mut attempt = 1;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < policy.attempts => {
                warn!(
                    attempt,
                    max = policy.attempts,
                    delay_secs = delay.as_secs_f64(),
                    error = %e,
                    "attempt failed, retrying after delay"
                );
                tokio::time::sleep(delay).await;
                delay *= policy.multiplier;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
