//! Exponential back-off with jitter for transient upstream failures.

use std::future::Future;
use std::time::Duration;

use crate::error::TransportError;

const MAX_DELAY_MS: u64 = 30_000;

/// Network failures and 5xx answers are worth another attempt. Client errors
/// (including 429) are returned to the caller as they are.
pub(crate) fn is_retriable(err: &TransportError) -> bool {
    match err {
        TransportError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        TransportError::Status { status, .. } => *status >= 500,
        TransportError::Deserialize { .. }
        | TransportError::InvalidUrl { .. }
        | TransportError::InvalidHeader { .. } => false,
    }
}

/// Runs `operation`, retrying up to `max_retries` more times on retriable
/// errors. The n-th retry waits `backoff_base_ms * 2^(n-1)` ms (capped at
/// 30 s) scaled by a random factor in `[0.75, 1.25)`.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, TransportError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, TransportError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient upstream error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
