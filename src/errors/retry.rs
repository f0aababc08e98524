use std::time::Duration;
use std::future::Future;

use super::classification::ErrorClassification;
use super::types::PagescopeError;
use tracing::warn;

impl ErrorClassification {
    /// Calculate the retry delay for this error classification based on the
    /// current attempt number (0-indexed).
    ///
    /// - RateLimitError: 5s + (attempt * 5s), capped at 60s
    /// - Default: exponential backoff 2^attempt + random jitter (0-1s), capped at 30s
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        match self.error_type {
            "RateLimitError" => {
                let secs = 5 + (attempt as u64 * 5);
                Duration::from_secs(secs.min(60))
            }
            _ => {
                let base: f64 = 2.0_f64.powi(attempt as i32);
                let jitter: f64 = rand::random::<f64>();
                let secs = (base + jitter).min(30.0);
                Duration::from_secs_f64(secs)
            }
        }
    }
}

/// Retry configuration for outbound audit requests.
///
/// The default performs a single attempt; retries are opt-in.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    /// Upper bound applied on top of the per-classification delay.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 0,
            max_delay: Duration::from_secs(60),
        }
    }
}

/// Run `factory` until it succeeds, fails with a non-retryable error, or the
/// attempt budget (`max_retries + 1`) is spent. The last error is returned.
pub async fn with_retry<F, Fut, T>(
    operation_name: &str,
    config: &RetryConfig,
    mut factory: F,
) -> Result<T, PagescopeError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, PagescopeError>>,
{
    let max_attempts = config.max_retries.saturating_add(1);
    let mut attempt = 0;

    loop {
        let err = match factory().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        attempt += 1;

        let classification = err.classify();
        if !classification.retryable || attempt >= max_attempts {
            if max_attempts > 1 {
                warn!(
                    operation = operation_name,
                    attempt,
                    max = max_attempts,
                    error_type = classification.error_type,
                    "Giving up after error"
                );
            }
            return Err(err);
        }

        let delay = classification.retry_delay(attempt - 1).min(config.max_delay);
        warn!(
            operation = operation_name,
            attempt,
            max = max_attempts,
            error_type = classification.error_type,
            delay_ms = delay.as_millis() as u64,
            error = %err,
            "Retrying after error"
        );
        tokio::time::sleep(delay).await;
    }
}
