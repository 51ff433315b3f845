// Run configuration: the base address of the habit service and the retry
// policy of the request helper. Defaults are literal constants; each one
// can be overridden through an environment variable.

use std::time::Duration;

use crate::error::{SeedError, SeedResult};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_MAX_RETRIES: u32 = 5;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

pub const ENV_BASE_URL: &str = "DEVHABIT_API_URL";
pub const ENV_MAX_RETRIES: &str = "DEVHABIT_SEED_MAX_RETRIES";
pub const ENV_RETRY_DELAY_MS: &str = "DEVHABIT_SEED_RETRY_DELAY_MS";
pub const ENV_TIMEOUT_SECS: &str = "DEVHABIT_SEED_TIMEOUT_SECS";

/// Settings for one seeding run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedConfig {
    /// Base address without a trailing slash.
    pub base_url: String,
    /// How many times a transient failure is retried. Zero disables retries.
    pub max_retries: u32,
    /// Delay before the first retry; doubled on each further attempt.
    pub retry_delay: Duration,
    /// Per-request timeout. `None` blocks until the server answers.
    pub timeout: Option<Duration>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        SeedConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            timeout: None,
        }
    }
}

impl SeedConfig {
    /// Build the configuration from the process environment.
    pub fn from_env() -> SeedResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup. Missing or
    /// blank values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> SeedResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = SeedConfig::default();

        if let Some(url) = value(ENV_BASE_URL) {
            config.base_url = url;
        }
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        if config.base_url.is_empty() {
            return Err(SeedError::config(format!("{ENV_BASE_URL} must not be empty")));
        }

        if let Some(raw) = value(ENV_MAX_RETRIES) {
            config.max_retries = parse_number(ENV_MAX_RETRIES, &raw)?;
        }
        if let Some(raw) = value(ENV_RETRY_DELAY_MS) {
            config.retry_delay = Duration::from_millis(parse_number(ENV_RETRY_DELAY_MS, &raw)?);
        }
        if let Some(raw) = value(ENV_TIMEOUT_SECS) {
            config.timeout = Some(Duration::from_secs(parse_number(ENV_TIMEOUT_SECS, &raw)?));
        }

        Ok(config)
    }

    /// Join the base address with a relative endpoint.
    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> SeedResult<T> {
    raw.parse()
        .map_err(|_| SeedError::config(format!("{key} must be a non-negative integer, got {raw:?}")))
}
