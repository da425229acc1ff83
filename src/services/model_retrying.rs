//! Retry wrapper for model endpoint operations.
//!
//! Flows never retry; this decorator is the only place a failed call is
//! re-attempted, and only for transient failures (rate limits, 5xx,
//! transport errors).

use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde_json::Value;

use crate::domain::{AppError, ImagePayload, ModelApiConfig};
use crate::ports::{ModelClient, ModelRequest};

const DEFAULT_MAX_DELAY_MS: u64 = 30_000;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay_ms: u64,
    max_delay_ms: u64,
}

impl RetryPolicy {
    pub fn from_config(config: &ModelApiConfig) -> Self {
        Self {
            max_attempts: config.max_retries.max(1),
            base_delay_ms: config.retry_delay_ms.max(1),
            max_delay_ms: DEFAULT_MAX_DELAY_MS.max(config.retry_delay_ms),
        }
    }

    fn delay_for_retry(&self, failed_attempt: u32, error: &AppError) -> Duration {
        if let AppError::RateLimited { retry_after_ms: Some(retry_after_ms) } = error {
            return Duration::from_millis((*retry_after_ms).min(self.max_delay_ms));
        }

        // attempt=1 -> base, attempt=2 -> base*2, attempt=3 -> base*4, capped.
        let exponent = failed_attempt.saturating_sub(1).min(6);
        let multiplier = 1_u64 << exponent;
        let backoff_ms = self.base_delay_ms.saturating_mul(multiplier).min(self.max_delay_ms);
        let jitter_ms = compute_jitter_ms(backoff_ms);
        Duration::from_millis(backoff_ms.saturating_add(jitter_ms).min(self.max_delay_ms))
    }
}

/// Decorator adding retry-with-backoff to any [`ModelClient`].
pub struct RetryingModelClient {
    inner: Box<dyn ModelClient>,
    policy: RetryPolicy,
}

impl RetryingModelClient {
    pub fn new(inner: Box<dyn ModelClient>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    fn with_retry<T>(
        &self,
        operation: &str,
        mut call: impl FnMut() -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut last_error: Option<AppError> = None;

        for attempt in 1..=self.policy.max_attempts {
            match call() {
                Ok(value) => return Ok(value),
                Err(error) => {
                    let last_attempt = attempt == self.policy.max_attempts;
                    if !error.is_retryable() || last_attempt {
                        return Err(error);
                    }

                    let delay = self.policy.delay_for_retry(attempt, &error);
                    eprintln!(
                        "Model {} failed (attempt {}/{}): {}. Retrying in {} ms.",
                        operation,
                        attempt,
                        self.policy.max_attempts,
                        error,
                        delay.as_millis()
                    );
                    last_error = Some(error);
                    thread::sleep(delay);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            AppError::HttpTransport("request failed after all retries".to_string())
        }))
    }
}

impl ModelClient for RetryingModelClient {
    fn generate(&self, request: ModelRequest<'_>) -> Result<Value, AppError> {
        self.with_retry("completion", || self.inner.generate(request.clone()))
    }

    fn generate_image(&self, prompt: &str) -> Result<ImagePayload, AppError> {
        self.with_retry("image generation", || self.inner.generate_image(prompt))
    }
}

fn compute_jitter_ms(backoff_ms: u64) -> u64 {
    if backoff_ms == 0 {
        return 0;
    }
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() as u64)
        .unwrap_or(0);
    // Up to 25% of the backoff, derived from the clock rather than a RNG.
    nanos % (backoff_ms / 4).max(1)
}
