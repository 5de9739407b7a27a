//! Retry wrapper for rate-limited model calls.
//!
//! Only [`ModelError::RateLimited`] is retried. Every other error (missing
//! credential, bad status, malformed reply, network failure) is propagated
//! immediately so the caller can fall back to its default.

use std::future::Future;
use std::time::Duration;

use crate::error::ModelError;

fn is_retriable(err: &ModelError) -> bool {
    matches!(err, ModelError::RateLimited { .. })
}

/// Executes `operation`, sleeping `delay` and trying again after each
/// rate-limit response, up to `max_retries` additional attempts.
///
/// With `max_retries = 1` the operation is attempted at most twice.
pub(crate) async fn retry_rate_limited<T, F, Fut>(
    max_retries: u32,
    delay: Duration,
    mut operation: F,
) -> Result<T, ModelError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ModelError>>,
{
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_secs = delay.as_secs(),
                    error = %err,
                    "model rate limited; retrying after delay"
                );
            }
        }

        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}
