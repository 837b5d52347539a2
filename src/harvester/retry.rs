//! Bounded retry with exponential backoff

use anyhow::Result;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

use crate::utils::{NAVIGATION_BASE_DELAY, NAVIGATION_MAX_ATTEMPTS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub multiplier: u32,
}

impl RetryPolicy {
    /// Page navigation: 3 attempts, waiting 1s then 2s.
    #[must_use]
    pub fn navigation() -> Self {
        Self {
            max_attempts: NAVIGATION_MAX_ATTEMPTS,
            base_delay: NAVIGATION_BASE_DELAY,
            multiplier: 2,
        }
    }

    /// Delay after the given failed attempt (1-based).
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = self
            .multiplier
            .saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor)
    }

    /// Run `operation` until it succeeds or attempts run out.
    ///
    /// Every error is retried. The last error is returned unchanged.
    pub async fn run<F, Fut, T>(&self, label: &str, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt >= max_attempts => {
                    warn!("{label} failed after {attempt} attempt(s): {e:#}");
                    return Err(e);
                }
                Err(e) => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        "{label} attempt {attempt}/{max_attempts} failed, retrying in {}ms: {e:#}",
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::navigation()
    }
}
