//! Bounded fixed-delay retry for warehouse queries.
//!
//! [`retry_fixed_delay`] wraps a fallible async operation and retries only
//! the transient-unavailable signal. The schedule is deliberately flat: a
//! fixed pause between attempts, no jitter, no growth. Failing queries
//! degrade at the call site rather than failing the run.

use std::future::Future;
use std::time::Duration;

use crate::error::WarehouseError;

/// Returns `true` for errors worth another attempt after the fixed delay.
///
/// **Retriable:**
/// - [`WarehouseError::Unavailable`] — HTTP 503 from the warehouse.
/// - Network-level failures: timeout, connection reset.
///
/// **Not retriable:**
/// - [`WarehouseError::Query`] — the query itself is bad; retrying won't fix it.
/// - [`WarehouseError::Deserialize`] — malformed response; retrying won't fix it.
/// - Other HTTP statuses — 4xx means the request is wrong, not the timing.
pub(crate) fn is_transient(err: &WarehouseError) -> bool {
    match err {
        WarehouseError::Unavailable { .. } => true,
        WarehouseError::Http(e) => e.is_timeout() || e.is_connect(),
        WarehouseError::Query(_) | WarehouseError::Deserialize { .. } => false,
    }
}

/// Runs `operation` up to `max_attempts` times, pausing `delay` between
/// attempts, retrying only transient errors.
pub(crate) async fn retry_fixed_delay<T, F, Fut>(
    max_attempts: u32,
    delay: Duration,
    mut operation: F,
) -> Result<T, WarehouseError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, WarehouseError>>,
{
    let mut attempt = 1u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_transient(&err) || attempt >= max_attempts {
                    return Err(err);
                }
                tracing::warn!(
                    attempt,
                    max_attempts,
                    error = %err,
                    "warehouse transient error — retrying after fixed delay"
                );
                attempt += 1;
                tokio::time::sleep(delay).await;
            }
        }
    }
}
