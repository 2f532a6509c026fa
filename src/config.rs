//! Validator configuration.
//!
//! Values come from [`ValidatorConfig::default`], optionally overlaid with
//! environment variables via [`ValidatorConfig::from_env`].

use std::time::Duration;
use thiserror::Error;

/// Default minimum password length.
pub const DEFAULT_MIN_LENGTH: usize = 8;

/// Default breach range endpoint. The 5-character hash prefix is appended.
pub const DEFAULT_RANGE_URL: &str = "https://api.pwnedpasswords.com/range";

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_USER_AGENT: &str = concat!("pwd-validator/", env!("CARGO_PKG_VERSION"));

pub const ENV_MIN_LENGTH: &str = "PWD_VALIDATOR_MIN_LENGTH";
pub const ENV_RANGE_URL: &str = "PWD_VALIDATOR_RANGE_URL";
pub const ENV_TIMEOUT_SECS: &str = "PWD_VALIDATOR_TIMEOUT_SECS";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Minimum password length must be greater than zero")]
    InvalidMinLength,
    #[error("Range endpoint URL is empty")]
    EmptyRangeUrl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Minimum number of characters accepted by the length rule.
    pub min_length: usize,
    /// Base URL of the breach range endpoint, without trailing slash.
    pub range_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    /// Memoise range responses per hash prefix.
    pub cache_ranges: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            range_url: DEFAULT_RANGE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            cache_ranges: true,
        }
    }
}

impl ValidatorConfig {
    /// Builds a config from defaults overlaid with environment variables.
    ///
    /// Priority:
    /// 1. `PWD_VALIDATOR_MIN_LENGTH`, `PWD_VALIDATOR_RANGE_URL`,
    ///    `PWD_VALIDATOR_TIMEOUT_SECS`
    /// 2. Built-in defaults
    ///
    /// Unparsable values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(min) = env_parse::<usize>(ENV_MIN_LENGTH) {
            config.min_length = min;
        }
        if let Ok(url) = std::env::var(ENV_RANGE_URL) {
            config.range_url = url;
        }
        if let Some(secs) = env_parse::<u64>(ENV_TIMEOUT_SECS) {
            config.timeout = Duration::from_secs(secs);
        }

        config
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    pub fn with_range_url(mut self, url: impl Into<String>) -> Self {
        self.range_url = url.into();
        self
    }

    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache_ranges = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_length == 0 {
            return Err(ConfigError::InvalidMinLength);
        }
        if self.range_url.trim().is_empty() {
            return Err(ConfigError::EmptyRangeUrl);
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn set_env(key: &str, value: &str) {
        // SAFETY: env-mutating tests are serialised
        unsafe { std::env::set_var(key, value); }
    }

    fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key); }
    }

    fn clear_all() {
        remove_env(ENV_MIN_LENGTH);
        remove_env(ENV_RANGE_URL);
        remove_env(ENV_TIMEOUT_SECS);
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_all();
        let config = ValidatorConfig::from_env();
        assert_eq!(config, ValidatorConfig::default());
        assert_eq!(config.min_length, 8);
        assert_eq!(config.range_url, DEFAULT_RANGE_URL);
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_all();
        set_env(ENV_MIN_LENGTH, "12");
        set_env(ENV_RANGE_URL, "http://localhost:9000/range");
        set_env(ENV_TIMEOUT_SECS, "3");

        let config = ValidatorConfig::from_env();
        assert_eq!(config.min_length, 12);
        assert_eq!(config.range_url, "http://localhost:9000/range");
        assert_eq!(config.timeout, Duration::from_secs(3));

        clear_all();
    }

    #[test]
    #[serial]
    fn test_from_env_ignores_garbage() {
        clear_all();
        set_env(ENV_MIN_LENGTH, "eight");

        let config = ValidatorConfig::from_env();
        assert_eq!(config.min_length, DEFAULT_MIN_LENGTH);

        clear_all();
    }

    #[test]
    fn test_validate_rejects_zero_min_length() {
        let config = ValidatorConfig::default().with_min_length(0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidMinLength));
    }

    #[test]
    fn test_validate_rejects_empty_url() {
        let config = ValidatorConfig::default().with_range_url("  ");
        assert_eq!(config.validate(), Err(ConfigError::EmptyRangeUrl));
    }
}
