//! Retry controller.
//!
//! Generic bounded retry with a fixed, non-blocking delay between
//! attempts. It only retries; deciding what happens after the last
//! failure is left to the caller.

use crate::config::RetryPolicy;
use std::fmt::Display;
use std::future::Future;
use tracing::{debug, warn};

/// Call `f` up to `policy.max_attempts` times, returning the first success.
///
/// `f` receives the 1-based attempt number. After the last failed attempt
/// its error is returned unchanged. A policy of zero attempts still runs
/// once.
pub async fn with_retries<T, E, F, Fut>(policy: RetryPolicy, mut f: F) -> Result<T, E>
where
    E: Display,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match f(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) if attempt >= max_attempts => {
                warn!("Attempt {}/{} failed, giving up: {}", attempt, max_attempts, e);
                return Err(e);
            }
            Err(e) => {
                warn!("Attempt {}/{} failed: {}", attempt, max_attempts, e);
                if !policy.delay.is_zero() {
                    debug!("Retrying in {}ms", policy.delay.as_millis());
                    tokio::time::sleep(policy.delay).await;
                }
                attempt += 1;
            }
        }
    }
}
