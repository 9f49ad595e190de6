//! Deadline-bounded retry with exponential backoff
//!
//! Container creation on the remote service is eventually consistent;
//! the engine retries transient failures under a wall-clock deadline
//! instead of a fixed attempt count.

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, Instant};

use crate::error::{Result, StratoformError};
use crate::gateway::{GatewayError, GatewayResult};

/// Time allowed for container creation to converge.
pub const CREATE_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone)]
pub struct RetryOptions {
    pub initial_interval: Duration,
    pub max_interval: Duration,
    pub multiplier: f64,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_millis(500),
            max_interval: Duration::from_secs(10),
            multiplier: 2.0,
        }
    }
}

/// Run `operation` until it succeeds, fails fatally, or `total_timeout`
/// elapses. The first attempt always runs, even with a zero timeout.
pub async fn retry_until<T, F, Fut>(
    mut operation: F,
    total_timeout: Duration,
    options: RetryOptions,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = GatewayResult<T>>,
{
    let deadline = Instant::now() + total_timeout;
    let mut interval = options.initial_interval;
    let mut last_error;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error @ GatewayError::Fatal(_)) => {
                return Err(StratoformError::gateway(error.to_string()));
            }
            Err(error) => {
                last_error = error;
            }
        }

        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }

        sleep(interval.min(remaining)).await;
        interval = std::cmp::min(
            Duration::from_secs_f64(interval.as_secs_f64() * options.multiplier),
            options.max_interval,
        );
    }

    Err(StratoformError::timeout(total_timeout, last_error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_success_first_try() {
        let result = retry_until(
            || async { GatewayResult::Ok(7) },
            CREATE_TIMEOUT,
            RetryOptions::default(),
        )
        .await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_attempted_once_with_zero_timeout() {
        let attempts = AtomicUsize::new(0);
        let result = retry_until(
            || async {
                attempts.fetch_add(1, Ordering::SeqCst);
                GatewayResult::Ok(())
            },
            Duration::ZERO,
            RetryOptions::default(),
        )
        .await;
        assert!(result.is_ok());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_zero_timeout_transient_gives_timeout() {
        let result: Result<()> = retry_until(
            || async { Err(GatewayError::transient("not ready")) },
            Duration::ZERO,
            RetryOptions::default(),
        )
        .await;
        match result.unwrap_err() {
            StratoformError::Timeout { detail, .. } => assert!(detail.contains("not ready")),
            other => panic!("expected Timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fatal_aborts_immediately() {
        let attempts = AtomicUsize::new(0);
        let result: Result<()> = retry_until(
            || async {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err(GatewayError::fatal("forbidden"))
            },
            CREATE_TIMEOUT,
            RetryOptions::default(),
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            StratoformError::GatewayFailure(_)
        ));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_then_success() {
        let attempts = AtomicUsize::new(0);
        let result = retry_until(
            || {
                let n = attempts.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n < 3 {
                        Err(GatewayError::transient("still provisioning"))
                    } else {
                        Ok(n)
                    }
                }
            },
            CREATE_TIMEOUT,
            RetryOptions::default(),
        )
        .await;
        assert_eq!(result.unwrap(), 3);
        assert_eq!(attempts.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_exhaustion() {
        let result: Result<()> = retry_until(
            || async { Err(GatewayError::transient("never ready")) },
            Duration::from_secs(120),
            RetryOptions::default(),
        )
        .await;
        match result.unwrap_err() {
            StratoformError::Timeout { after, detail } => {
                assert_eq!(after, Duration::from_secs(120));
                assert!(detail.contains("never ready"));
            }
            other => panic!("expected Timeout, got {other:?}"),
        }
    }
}
