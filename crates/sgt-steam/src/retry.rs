//! Retry with exponential backoff for transient SteamDB failures.
//!
//! Only 429 responses and network-level failures are retried; 403/404 and
//! parse failures would return the same result again and are propagated
//! immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::SteamError;

fn is_retriable(err: &SteamError) -> bool {
    matches!(err, SteamError::RateLimited { .. } | SteamError::Http(_))
}

/// Run `operation`, retrying transient errors up to `max_retries` additional
/// attempts with a delay of `backoff_base_secs * 2^attempt` between tries.
/// The last error is returned once retries are exhausted.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, SteamError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SteamError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                err
            }
        };

        // Shift capped at 62 to keep the multiply from overflowing.
        let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %err,
            "transient SteamDB error, retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}
