//! Orchestrator configuration.

use std::time::Duration;

/// Configuration for feed fetching and caching behavior.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Articles per page requested from the feed endpoint.
    pub page_size: u32,
    /// Maximum age of a cached page before a refresh is attempted.
    pub stale_after: Duration,
    /// Maximum number of cached pages; the oldest entry is evicted beyond
    /// this.
    pub max_entries: usize,
    /// Retry behavior for transient stage-one failures.
    pub retry: FeedRetryConfig,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            stale_after: Duration::from_secs(5 * 60),
            max_entries: 32,
            retry: FeedRetryConfig::default(),
        }
    }
}

/// Configuration for retry behavior on transient article-fetch failures.
#[derive(Debug, Clone)]
pub struct FeedRetryConfig {
    /// Total attempts (first try included).
    pub max_attempts: u32,
    /// Initial delay between attempts in milliseconds.
    pub initial_delay_ms: u64,
    /// Maximum delay between attempts in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for FeedRetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            initial_delay_ms: 500,
            max_delay_ms: 5000,
        }
    }
}

impl FeedRetryConfig {
    /// Calculate the delay for a given attempt number (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay_ms = self.initial_delay_ms.saturating_mul(2u64.pow(attempt));
        let capped_ms = delay_ms.min(self.max_delay_ms);
        Duration::from_millis(capped_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = FeedConfig::default();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.stale_after, Duration::from_secs(300));
        assert_eq!(config.max_entries, 32);
        assert_eq!(config.retry.max_attempts, 2);
    }

    #[test]
    fn delay_doubles_then_caps() {
        let retry = FeedRetryConfig::default();

        assert_eq!(retry.delay_for_attempt(0), Duration::from_millis(500));
        assert_eq!(retry.delay_for_attempt(1), Duration::from_millis(1000));
        assert_eq!(retry.delay_for_attempt(2), Duration::from_millis(2000));
        assert_eq!(retry.delay_for_attempt(3), Duration::from_millis(4000));
        assert_eq!(retry.delay_for_attempt(4), Duration::from_millis(5000));
        assert_eq!(retry.delay_for_attempt(10), Duration::from_millis(5000));
    }
}
