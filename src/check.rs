//! The health check itself.
//!
//! Runs the gates in order: fetch the state key, decode the record, validate
//! the generation time, then classify the delay. The first gate that fails
//! ends the check; there are no retries.

use std::time::Duration;

use tokio::time::{timeout_at, Instant};
use tracing::instrument;

use crate::config::CheckConfig;
use crate::error::CheckError;
use crate::freshness;
use crate::state::IndexerState;
use crate::store::{StateStore, StoreError};

/// Current wall-clock time in Unix seconds
pub fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Run one health check and return the observed delay in seconds.
///
/// The store is consumed so its connection is released when the check
/// returns, whatever the outcome. The fetch (connect and read) must finish by
/// `started + budget`. `now` is read only after the record has been validated.
#[instrument(skip_all, fields(key = %config.state_key, addr = %config.addr()))]
pub async fn run_check<S, C>(
    config: &CheckConfig,
    mut store: S,
    started: Instant,
    budget: Duration,
    now: C,
) -> Result<i64, CheckError>
where
    S: StateStore + Send,
    C: FnOnce() -> i64,
{
    let key = config.state_key.as_str();

    let raw = timeout_at(started + budget, store.fetch(key))
        .await
        .map_err(|_| StoreError::Timeout(budget))??;
    drop(store);

    let raw = raw.ok_or_else(|| CheckError::NotFound {
        key: key.to_string(),
    })?;
    tracing::debug!(bytes = raw.len(), "Fetched state record");

    let state = IndexerState::from_slice(&raw).map_err(|source| CheckError::Parse {
        key: key.to_string(),
        source,
    })?;

    let gen_utime = state
        .generation_time()
        .ok_or_else(|| CheckError::MissingGenTime {
            key: key.to_string(),
        })?;

    let delay = freshness::evaluate(now(), gen_utime, config.max_delay_seconds)?;
    tracing::debug!(gen_utime, delay, max_delay = config.max_delay_seconds, "State is fresh");

    Ok(delay)
}
