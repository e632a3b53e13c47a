//! Configuration loading and constants.
//!
//! Resolves the check's settings from environment variables and defines the
//! defaults, the overall deadline and the logging constants. `CheckConfig` is the
//! root configuration struct, built once at startup and passed down explicitly.

use std::num::ParseIntError;

// =============================================================================
// Environment Variable Names
// =============================================================================

/// Redis hostname
pub const ENV_REDIS_HOST: &str = "REDIS_HOST";

/// Redis port
pub const ENV_REDIS_PORT: &str = "REDIS_PORT";

/// Key holding the indexer's JSON state record
pub const ENV_REDIS_STATE_KEY: &str = "REDIS_STATE_KEY";

/// Largest tolerated delay in seconds
pub const ENV_MAX_DELAY_SECONDS: &str = "MAX_DELAY_SECONDS";

/// Log output format (text or json)
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

/// Tracing filter directives
pub const ENV_LOG_FILTER: &str = "RUST_LOG";

// =============================================================================
// Defaults
// =============================================================================

pub const DEFAULT_REDIS_HOST: &str = "event-cache";
pub const DEFAULT_REDIS_PORT: u16 = 6379;
pub const DEFAULT_STATE_KEY: &str = "last_mc_seqno";
pub const DEFAULT_MAX_DELAY_SECONDS: i64 = 300;

/// Hard upper bound, measured from process start, on connecting to Redis and
/// reading the state key
pub const CHECK_TIMEOUT_SECS: u64 = 10;

/// Default log filter when RUST_LOG is not set. Logging is off so the verdict
/// line is the only thing a supervisor sees.
pub const DEFAULT_LOG_FILTER: &str = "off";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

/// Settings for a single health check run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    /// Redis hostname
    pub host: String,
    /// Redis port
    pub port: u16,
    /// Key the indexer publishes its state under
    pub state_key: String,
    /// Delays strictly above this many seconds are unhealthy
    pub max_delay_seconds: i64,
}

impl CheckConfig {
    /// Resolve configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    /// Resolve configuration through `lookup`, which returns the raw value of a
    /// variable if it is set.
    ///
    /// Unset and empty values both fall back to the default. Numeric settings
    /// are parsed here so a malformed value is reported before any network
    /// access happens.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let host = get(ENV_REDIS_HOST).unwrap_or_else(|| DEFAULT_REDIS_HOST.to_string());

        let port = match get(ENV_REDIS_PORT) {
            Some(raw) => raw.parse().map_err(ConfigError::InvalidPort)?,
            None => DEFAULT_REDIS_PORT,
        };

        let state_key = get(ENV_REDIS_STATE_KEY).unwrap_or_else(|| DEFAULT_STATE_KEY.to_string());

        let max_delay_seconds = match get(ENV_MAX_DELAY_SECONDS) {
            Some(raw) => raw.parse().map_err(ConfigError::InvalidMaxDelay)?,
            None => DEFAULT_MAX_DELAY_SECONDS,
        };

        Ok(Self {
            host,
            port,
            state_key,
            max_delay_seconds,
        })
    }

    /// `host:port` for logging
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Log format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per event
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Tracing filter directives (e.g., "indexer_healthcheck=debug")
    pub filter: String,
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    /// Unknown formats fall back to text; logging setup must never fail the check.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let filter = get(ENV_LOG_FILTER).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        let format = match get(ENV_LOG_FORMAT)
            .unwrap_or_else(|| DEFAULT_LOG_FORMAT.to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Self { filter, format }
    }
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid MAX_DELAY_SECONDS value: {0}")]
    InvalidMaxDelay(#[source] ParseIntError),
    #[error("Invalid REDIS_PORT value: {0}")]
    InvalidPort(#[source] ParseIntError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = CheckConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.host, "event-cache");
        assert_eq!(config.port, 6379);
        assert_eq!(config.state_key, "last_mc_seqno");
        assert_eq!(config.max_delay_seconds, 300);
        assert_eq!(config.addr(), "event-cache:6379");
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let config = CheckConfig::from_lookup(lookup_from(&[
            (ENV_REDIS_HOST, ""),
            (ENV_REDIS_PORT, ""),
            (ENV_REDIS_STATE_KEY, ""),
            (ENV_MAX_DELAY_SECONDS, ""),
        ]))
        .unwrap();
        assert_eq!(config.host, DEFAULT_REDIS_HOST);
        assert_eq!(config.port, DEFAULT_REDIS_PORT);
        assert_eq!(config.state_key, DEFAULT_STATE_KEY);
        assert_eq!(config.max_delay_seconds, DEFAULT_MAX_DELAY_SECONDS);
    }

    #[test]
    fn test_overrides_are_used() {
        let config = CheckConfig::from_lookup(lookup_from(&[
            (ENV_REDIS_HOST, "redis.internal"),
            (ENV_REDIS_PORT, "6380"),
            (ENV_REDIS_STATE_KEY, "indexer_state"),
            (ENV_MAX_DELAY_SECONDS, "60"),
        ]))
        .unwrap();
        assert_eq!(config.addr(), "redis.internal:6380");
        assert_eq!(config.state_key, "indexer_state");
        assert_eq!(config.max_delay_seconds, 60);
    }

    #[test]
    fn test_invalid_max_delay_is_rejected() {
        let err = CheckConfig::from_lookup(lookup_from(&[(ENV_MAX_DELAY_SECONDS, "abc")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMaxDelay(_)));
        assert!(err.to_string().starts_with("Invalid MAX_DELAY_SECONDS value:"));
    }

    #[test]
    fn test_max_delay_is_base_ten() {
        assert!(CheckConfig::from_lookup(lookup_from(&[(ENV_MAX_DELAY_SECONDS, "0x10")])).is_err());
        assert!(CheckConfig::from_lookup(lookup_from(&[(ENV_MAX_DELAY_SECONDS, "1.5")])).is_err());
        let config =
            CheckConfig::from_lookup(lookup_from(&[(ENV_MAX_DELAY_SECONDS, "+120")])).unwrap();
        assert_eq!(config.max_delay_seconds, 120);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = CheckConfig::from_lookup(lookup_from(&[(ENV_REDIS_PORT, "70000")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(_)));
    }

    #[test]
    fn test_logging_defaults() {
        let logging = LoggingConfig::from_lookup(lookup_from(&[]));
        assert_eq!(logging.filter, "off");
        assert_eq!(logging.format, LogFormat::Text);
    }

    #[test]
    fn test_logging_json_format() {
        let logging = LoggingConfig::from_lookup(lookup_from(&[
            (ENV_LOG_FORMAT, "JSON"),
            (ENV_LOG_FILTER, "indexer_healthcheck=debug"),
        ]));
        assert_eq!(logging.filter, "indexer_healthcheck=debug");
        assert_eq!(logging.format, LogFormat::Json);
    }

    #[test]
    fn test_check_timeout_is_10_seconds() {
        assert_eq!(CHECK_TIMEOUT_SECS, 10);
    }
}
