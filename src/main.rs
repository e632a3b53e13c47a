//! indexer-healthcheck: indexer freshness probe.
//!
//! Entry point. Initializes tracing, resolves configuration from the
//! environment, runs the check against Redis, and turns the outcome into one
//! output line plus the exit status.

use std::process::ExitCode;
use std::time::Duration;

use tokio::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use indexer_healthcheck::config::{LogFormat, CHECK_TIMEOUT_SECS};
use indexer_healthcheck::report::report;
use indexer_healthcheck::{
    run_check, unix_now, CheckConfig, CheckError, LoggingConfig, RedisStore,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let started = Instant::now();

    init_tracing(&LoggingConfig::from_env());

    let outcome = check(started).await;
    if let Err(err) = &outcome {
        tracing::warn!(kind = err.kind(), error = %err, "Health check failed");
    }

    report(&outcome)
}

async fn check(started: Instant) -> Result<i64, CheckError> {
    let config = CheckConfig::from_env()?;
    tracing::debug!(
        addr = %config.addr(),
        key = %config.state_key,
        max_delay = config.max_delay_seconds,
        "Loaded configuration"
    );

    let store = RedisStore::new(&config)?;
    run_check(
        &config,
        store,
        started,
        Duration::from_secs(CHECK_TIMEOUT_SECS),
        unix_now,
    )
    .await
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::new(&logging.filter);
    let registry = tracing_subscriber::registry().with(filter);

    // stdout is reserved for the verdict line
    match logging.format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}
