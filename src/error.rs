use crate::config::ConfigError;
use crate::store::StoreError;

/// Every way a health check can end unhealthy.
///
/// Each variant renders as the single line printed after `FAIL: `.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Cannot get state from Redis: {0}")]
    Unreachable(#[from] StoreError),

    #[error("State key '{key}' not found in Redis.")]
    NotFound { key: String },

    #[error("Cannot parse JSON state from key '{key}': {source}")]
    Parse {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("'gen_utime' is missing or not positive in state from key '{key}'.")]
    MissingGenTime { key: String },

    #[error(
        "System clock seems to be behind the indexer's clock (delay: {delay}). Check time synchronization."
    )]
    ClockSkew { delay: i64 },

    #[error("Indexer delay is {delay} seconds (limit {limit}).")]
    DelayExceeded { delay: i64, limit: i64 },
}

impl CheckError {
    /// Short machine-friendly label used in log events
    pub fn kind(&self) -> &'static str {
        match self {
            CheckError::Config(_) => "config",
            CheckError::Unreachable(_) => "unreachable",
            CheckError::NotFound { .. } => "not_found",
            CheckError::Parse { .. } => "parse",
            CheckError::MissingGenTime { .. } => "missing_gen_time",
            CheckError::ClockSkew { .. } => "clock_skew",
            CheckError::DelayExceeded { .. } => "delay_exceeded",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_not_found_display() {
        let err = CheckError::NotFound {
            key: "last_mc_seqno".to_string(),
        };
        assert_eq!(err.to_string(), "State key 'last_mc_seqno' not found in Redis.");
    }

    #[test]
    fn test_unreachable_is_distinct_from_not_found() {
        let unreachable = CheckError::from(StoreError::Timeout(Duration::from_secs(10)));
        let not_found = CheckError::NotFound {
            key: "k".to_string(),
        };
        assert!(unreachable.to_string().starts_with("Cannot get state from Redis:"));
        assert!(!unreachable.to_string().contains("not found"));
        assert_ne!(unreachable.kind(), not_found.kind());
    }

    #[test]
    fn test_delay_exceeded_display() {
        let err = CheckError::DelayExceeded {
            delay: 400,
            limit: 300,
        };
        assert_eq!(err.to_string(), "Indexer delay is 400 seconds (limit 300).");
    }

    #[test]
    fn test_clock_skew_reports_negative_delay() {
        let err = CheckError::ClockSkew { delay: -5 };
        assert!(err.to_string().contains("(delay: -5)"));
    }

    #[test]
    fn test_config_error_is_transparent() {
        let parse_err = "abc".parse::<i64>().unwrap_err();
        let err = CheckError::from(ConfigError::InvalidMaxDelay(parse_err));
        assert!(err.to_string().starts_with("Invalid MAX_DELAY_SECONDS value:"));
    }
}
