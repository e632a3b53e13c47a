//! Indexer state record published in Redis.
//!
//! The record is a JSON object such as `{"gen_utime": 1700000000}`. Only
//! `gen_utime` is read; every other field is ignored so the indexer can add
//! fields without breaking the check.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Indexer's last published checkpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct IndexerState {
    /// Unix timestamp (seconds) at which the indexer produced this state
    #[serde(default)]
    pub gen_utime: Option<i64>,
}

impl IndexerState {
    /// Decode a raw value. It must be UTF-8 JSON and an object at the top level.
    pub fn from_slice(raw: &[u8]) -> Result<Self, serde_json::Error> {
        // Going through a map first rejects arrays, which serde would otherwise
        // accept as a positional encoding of the struct.
        let fields: Map<String, Value> = serde_json::from_slice(raw)?;
        serde_json::from_value(Value::Object(fields))
    }

    /// Generation time if it is present and strictly positive
    pub fn generation_time(&self) -> Option<i64> {
        self.gen_utime.filter(|t| *t > 0)
    }
}
