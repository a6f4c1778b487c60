//! Configuration types for the Harness SDK.

use harness_core::PageLimits;
use std::time::Duration;
use url::Url;

/// Public Harness SaaS endpoint.
pub const DEFAULT_BASE_URL: &str = "https://app.harness.io/";

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the Harness client.
///
/// Set once at construction and shared read-only by every request.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Harness installation.
    pub base_url: Url,
    /// API key sent with every request.
    pub api_key: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Retry policy used by endpoints that are safe to repeat.
    pub retry_config: RetryConfig,
    /// Default and maximum page size for list endpoints.
    pub page_limits: PageLimits,
}

impl ClientConfig {
    /// Create a new configuration with the given base URL and API key.
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            base_url,
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
            retry_config: RetryConfig::default(),
            page_limits: PageLimits::default(),
        }
    }
}

/// Strategy deciding how often and how long to wait between attempts.
pub trait RetryPolicy: Send + Sync {
    /// Total attempts, including the first one.
    fn max_attempts(&self) -> u32;

    /// Delay before retry number `retry` (zero-based).
    fn next_delay(&self, retry: u32) -> Duration;
}

/// Exponential backoff.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts.
    pub max_attempts: u32,
    /// Initial backoff duration.
    pub initial_backoff: Duration,
    /// Maximum backoff duration.
    pub max_backoff: Duration,
    /// Backoff multiplier.
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(10),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Create a configuration that makes a single attempt.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    /// Calculate backoff duration for a given retry.
    pub fn backoff_for_attempt(&self, attempt: u32) -> Duration {
        let backoff_ms = self.initial_backoff.as_millis() as f64
            * self.backoff_multiplier.powi(attempt as i32);
        let backoff = Duration::from_millis(backoff_ms as u64);
        std::cmp::min(backoff, self.max_backoff)
    }
}

impl RetryPolicy for RetryConfig {
    fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    fn next_delay(&self, retry: u32) -> Duration {
        self.backoff_for_attempt(retry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_calculation() {
        let config = RetryConfig::default();

        assert_eq!(config.next_delay(0), Duration::from_millis(100));
        assert_eq!(config.next_delay(1), Duration::from_millis(200));
        assert_eq!(config.next_delay(2), Duration::from_millis(400));
    }

    #[test]
    fn test_backoff_capped_at_max() {
        let config = RetryConfig {
            max_backoff: Duration::from_millis(500),
            ..Default::default()
        };

        assert_eq!(config.backoff_for_attempt(10), Duration::from_millis(500));
    }

    #[test]
    fn test_client_config_defaults() {
        let url = Url::parse(DEFAULT_BASE_URL).unwrap();
        let config = ClientConfig::new(url.clone(), "pat.key");

        assert_eq!(config.base_url, url);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.retry_config.max_attempts(), 3);
        assert_eq!(config.page_limits, PageLimits::new(5, 20));
    }

    #[test]
    fn test_retry_config_no_retry() {
        let config = RetryConfig::no_retry();

        assert_eq!(config.max_attempts(), 1);
        assert_eq!(config.initial_backoff, Duration::from_millis(100));
    }
}
