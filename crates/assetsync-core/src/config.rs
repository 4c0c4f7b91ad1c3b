//! Fetch engine configuration

use std::time::Duration;

/// Browser-like User-Agent; some image CDNs reject unknown clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/120.0.0.0";

/// Immutable settings shared by [`Fetcher`](crate::Fetcher) and
/// [`WorkerPool`](crate::WorkerPool).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Maximum number of in-flight fetches
    pub workers: usize,
    /// Total attempts per job (first try included)
    pub retries: u32,
    /// Fixed pause between attempts
    pub retry_wait: Duration,
    /// Whole-request timeout (connect + body)
    pub request_timeout: Duration,
    /// Bodies and cached files below this size are not valid assets
    pub min_valid_bytes: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            workers: 12,
            retries: 3,
            retry_wait: Duration::from_millis(1500),
            request_timeout: Duration::from_secs(15),
            min_valid_bytes: 100,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetchConfig {
    /// Worst-case wall time of a single job: every attempt times out and
    /// every gap between attempts is waited out.
    pub fn worst_case_job_time(&self) -> Duration {
        let attempts = self.retries.max(1);
        self.request_timeout * attempts + self.retry_wait * (attempts - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = FetchConfig::default();
        assert_eq!(config.workers, 12);
        assert_eq!(config.retries, 3);
        assert_eq!(config.retry_wait, Duration::from_millis(1500));
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.min_valid_bytes, 100);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn worst_case_job_time_default() {
        // 3 x 15s + 2 x 1.5s
        let config = FetchConfig::default();
        assert_eq!(config.worst_case_job_time(), Duration::from_secs(48));
    }

    #[test]
    fn worst_case_job_time_zero_retries_is_one_attempt() {
        let config = FetchConfig {
            retries: 0,
            ..Default::default()
        };
        assert_eq!(config.worst_case_job_time(), Duration::from_secs(15));
    }
}
