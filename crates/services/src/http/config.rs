use std::collections::BTreeMap;
use std::env;
use std::time::Duration;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Per-call request tuning. When passed to a call it replaces the client
/// defaults; its headers are merged over the client's.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestConfig {
    pub timeout: Duration,
    pub max_retries: u32,
    pub retry_base_delay: Duration,
    pub headers: BTreeMap<String, String>,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(10_000),
            max_retries: 2,
            retry_base_delay: Duration::from_millis(1_000),
            headers: BTreeMap::new(),
        }
    }
}

impl RequestConfig {
    /// Defaults for server-side calls against the backend origin.
    #[must_use]
    pub fn backend() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            ..Self::default()
        }
    }

    /// Media generation runs for minutes; retry at most once.
    #[must_use]
    pub fn media() -> Self {
        Self {
            timeout: Duration::from_secs(180),
            max_retries: 1,
            retry_base_delay: Duration::from_secs(3),
            headers: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub fn with_retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Delay before attempt `attempt + 1` (linear backoff).
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.retry_base_delay.saturating_mul(attempt.saturating_add(1))
    }
}

/// Where a client points and how it behaves by default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub defaults: RequestConfig,
}

impl ClientConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>, defaults: RequestConfig) -> Self {
        Self {
            base_url: base_url.into(),
            defaults,
        }
    }

    /// Same-origin API routes (`VOCAB_API_BASE_URL`).
    #[must_use]
    pub fn api_from_env() -> Self {
        let base_url = env::var("VOCAB_API_BASE_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "http://localhost:3000/api".into());
        Self::new(base_url, RequestConfig::default())
    }

    /// Backend origin for server-side-only calls (`VOCAB_BACKEND_URL`).
    #[must_use]
    pub fn backend_from_env() -> Self {
        let base_url = env::var("VOCAB_BACKEND_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "http://localhost:8080".into());
        Self::new(base_url, RequestConfig::backend())
    }

    /// Join `path` onto the base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = RequestConfig::default();
        assert_eq!(config.timeout, Duration::from_millis(10_000));
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.retry_base_delay, Duration::from_millis(1_000));
        assert!(config.headers.is_empty());
    }

    #[test]
    fn backoff_is_linear() {
        let config = RequestConfig::default().with_retry_base_delay(Duration::from_millis(250));
        assert_eq!(config.backoff(0), Duration::from_millis(250));
        assert_eq!(config.backoff(1), Duration::from_millis(500));
        assert_eq!(config.backoff(2), Duration::from_millis(750));
    }

    #[test]
    fn url_joins_without_double_slashes() {
        let config = ClientConfig::new("http://localhost:3000/api/", RequestConfig::default());
        assert_eq!(config.url("/template"), "http://localhost:3000/api/template");
        assert_eq!(config.url("template"), "http://localhost:3000/api/template");
    }
}
