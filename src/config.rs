//! Client configuration with sensible defaults.
//!
//! [`SearchConfig`] controls the instance pool, retry budget, detailed-mode
//! fan-out and request pacing. The defaults are tuned for polite scraping of
//! shared public infrastructure.

use crate::error::{Result, SearchError};

/// Environment variable holding the semicolon-delimited instance list.
pub const INSTANCES_ENV: &str = "SEARX_INSTANCES";

/// Environment variable holding the default language code.
pub const LANGUAGE_ENV: &str = "SEARX_DEFAULT_LANGUAGE";

/// Built-in public instances used when no list is configured.
const DEFAULT_INSTANCES: &str =
    "https://searx.be;https://search.sapti.me;https://searx.tiekoetter.com;https://paulgo.io";

/// Configuration for a search client.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Candidate instance base URLs. Reshuffled on every call.
    pub instances: Vec<String>,
    /// Language code applied when the query does not carry one.
    pub default_language: Option<String>,
    /// Retry budget for the standard (single-result-set) mode.
    pub max_retries: usize,
    /// Detailed mode: stop after this many instances contributed results.
    pub max_servers: usize,
    /// Detailed mode: pages fetched per instance.
    pub max_pages_per_server: usize,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Random delay range in milliseconds `(min, max)` before each search
    /// request. Spreads request cadence to avoid bot detection.
    pub request_delay_ms: (u64, u64),
    /// Delay before the single same-instance retry after a bot redirect.
    pub bot_retry_delay_ms: u64,
    /// Fixed backoff between standard-mode retry attempts.
    pub retry_backoff_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            instances: parse_instance_list(DEFAULT_INSTANCES),
            default_language: None,
            max_retries: 5,
            max_servers: 3,
            max_pages_per_server: 3,
            timeout_seconds: 10,
            request_delay_ms: (50, 250),
            bot_retry_delay_ms: 2000,
            retry_backoff_ms: 1500,
        }
    }
}

fn parse_instance_list(list: &str) -> Vec<String> {
    list.split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl SearchConfig {
    /// Builds a configuration from the environment.
    ///
    /// Reads the instance list from `SEARX_INSTANCES` (falling back to the
    /// built-in public instances) and the default language from
    /// `SEARX_DEFAULT_LANGUAGE`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(list) = std::env::var(INSTANCES_ENV) {
            config.instances = parse_instance_list(&list);
        }
        if let Ok(lang) = std::env::var(LANGUAGE_ENV) {
            let lang = lang.trim().to_string();
            if !lang.is_empty() {
                config.default_language = Some(lang);
            }
        }

        config
    }

    /// Replaces the instance list with one parsed from a semicolon-delimited
    /// string.
    pub fn with_instance_list(mut self, list: &str) -> Self {
        self.instances = parse_instance_list(list);
        self
    }

    /// Validates this configuration.
    ///
    /// Checks:
    /// - `instances` must not be empty
    /// - `max_retries`, `max_servers` and `max_pages_per_server` must be > 0
    /// - `request_delay_ms.0` must be <= `request_delay_ms.1`
    pub fn validate(&self) -> Result<()> {
        if self.instances.iter().all(|s| s.trim().is_empty()) {
            return Err(SearchError::NoInstances);
        }
        if self.max_retries == 0 {
            return Err(SearchError::Other(
                "max_retries must be greater than 0".into(),
            ));
        }
        if self.max_servers == 0 || self.max_pages_per_server == 0 {
            return Err(SearchError::Other(
                "max_servers and max_pages_per_server must be greater than 0".into(),
            ));
        }
        if self.request_delay_ms.0 > self.request_delay_ms.1 {
            return Err(SearchError::Other(
                "request_delay_ms min must be <= max".into(),
            ));
        }
        Ok(())
    }
}
