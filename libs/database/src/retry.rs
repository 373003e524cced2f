use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Exponential backoff used while waiting for the database at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts after the first one
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, initial_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_retries,
            initial_delay,
            max_delay: max_delay.max(initial_delay),
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Delay before retry number `retry` (1-based), doubled each time and capped
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.initial_delay
            .saturating_mul(factor)
            .min(self.max_delay)
    }
}

impl Default for RetryPolicy {
    /// 5 retries, 200ms doubling up to 5s
    fn default() -> Self {
        Self::new(5, Duration::from_millis(200), Duration::from_secs(5))
    }
}

/// Run `operation` until it succeeds or the policy gives up.
///
/// The last error is returned when every attempt failed.
pub async fn retry_with_policy<F, Fut, T, E>(mut operation: F, policy: &RetryPolicy) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut retries = 0;

    loop {
        match operation().await {
            Ok(value) => {
                if retries > 0 {
                    debug!(retries, "Operation succeeded after retrying");
                }
                return Ok(value);
            }
            Err(e) if retries < policy.max_retries => {
                retries += 1;
                let delay = policy.delay_for(retries);
                debug!(
                    retries,
                    max_retries = policy.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Operation failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                warn!(attempts = retries + 1, error = %e, "Operation failed, giving up");
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy::new(max_retries, Duration::from_millis(1), Duration::from_millis(2))
    }

    #[test]
    fn test_delay_doubles_and_caps() {
        let policy = RetryPolicy::new(10, Duration::from_millis(100), Duration::from_millis(500));
        assert_eq!(policy.delay_for(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for(2), Duration::from_millis(200));
        assert_eq!(policy.delay_for(3), Duration::from_millis(400));
        assert_eq!(policy.delay_for(4), Duration::from_millis(500));
        assert_eq!(policy.delay_for(40), Duration::from_millis(500));
    }

    #[test]
    fn test_max_delay_never_below_initial() {
        let policy = RetryPolicy::new(1, Duration::from_secs(2), Duration::from_secs(1));
        assert_eq!(policy.max_delay, Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_succeeds_first_attempt() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result = retry_with_policy(
            || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, String>("connected")
                }
            },
            &fast_policy(3),
        )
        .await;

        assert_eq!(result.unwrap(), "connected");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_succeeds_after_failures() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result = retry_with_policy(
            || {
                let counter = counter.clone();
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err("not ready".to_string())
                    } else {
                        Ok(42)
                    }
                }
            },
            &fast_policy(3),
        )
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_with_last_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<(), String> = retry_with_policy(
            || {
                let counter = counter.clone();
                async move {
                    let n = counter.fetch_add(1, Ordering::SeqCst);
                    Err(format!("attempt {}", n))
                }
            },
            &fast_policy(2),
        )
        .await;

        assert_eq!(result.unwrap_err(), "attempt 2");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
