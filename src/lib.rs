//! Indexer healthcheck
//!
//! One-shot liveness probe for an indexing pipeline. Reads the indexer's state
//! record from Redis, measures how long ago it was generated, and reports
//! healthy or unhealthy through a single output line and the exit status.

pub mod check;
pub mod config;
pub mod error;
pub mod freshness;
pub mod report;
pub mod state;
pub mod store;

pub use check::{run_check, unix_now};
pub use config::{CheckConfig, ConfigError, LoggingConfig};
pub use error::CheckError;
pub use state::IndexerState;
pub use store::{RedisStore, StateStore, StoreError};
