use std::future::Future;

use tracing::{debug, warn};

use crate::config::RetryConfig;
use crate::error::Result;
use crate::resilience::FixedBackoff;
use crate::storage::CounterStore;

/// Runs `operation` until it succeeds, fails with a non-connection error, or
/// the retry budget in `config` is exhausted.
///
/// A connection error consumes one retry and is followed by a fixed pause.
/// Once no retries remain the last connection error is returned unchanged.
/// Any other error is returned immediately without pausing.
pub async fn retry_on_connection<T, F, Fut>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut backoff = FixedBackoff::new(config.clone());

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_connection() => err,
            Err(err) => {
                debug!(operation = operation_name, error = %err, "Not retrying non-connection error");
                return Err(err);
            }
        };

        match backoff.next_backoff() {
            Some(delay) => {
                debug!(
                    operation = operation_name,
                    retry = backoff.used(),
                    remaining = backoff.remaining(),
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Store connection failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }
            None => {
                warn!(
                    operation = operation_name,
                    attempts = backoff.used() + 1,
                    error = %err,
                    "Store connection retries exhausted"
                );
                return Err(err);
            }
        }
    }
}

/// Increments `key` by one, retrying connection failures per `config`.
pub async fn increment_with_retry<S>(store: &S, key: &str, config: &RetryConfig) -> Result<i64>
where
    S: CounterStore + ?Sized,
{
    retry_on_connection(config, "increment", || store.increment(key)).await
}
