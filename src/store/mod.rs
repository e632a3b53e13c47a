//! Access to the shared cache holding the indexer's state.
//!
//! `StateStore` is the single operation the check needs from the cache: read
//! one key. `RedisStore` is the production implementation; tests substitute an
//! in-memory store.

mod client;

pub use client::RedisStore;

use std::time::Duration;

use async_trait::async_trait;

/// Read-only key lookup against the cache
#[async_trait]
pub trait StateStore {
    /// Fetch the raw value stored under `key`.
    ///
    /// `Ok(None)` means the store answered and the key does not exist, which is
    /// reported differently from failing to reach the store at all.
    async fn fetch(&mut self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Redis(#[from] redis::RedisError),

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}
