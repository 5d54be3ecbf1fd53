//! Cache Entry Module
//!
//! Defines the document persisted for every cache miss.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// == Cache Entry ==
/// A stored key/result pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The wrapped function's input (e.g. a URL)
    pub key: String,
    /// The wrapped function's result, stored verbatim
    pub value: String,
    /// Write time; only set when a max-age policy is in effect
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    // == Constructors ==
    /// Creates an entry without a timestamp.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            stored_at: None,
        }
    }

    /// Creates an entry stamped with the given write time.
    pub fn stamped(key: impl Into<String>, value: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            stored_at: Some(at),
        }
    }

    // == Is Fresh ==
    /// Checks the entry against an expiration cutoff.
    ///
    /// Boundary condition: an entry written exactly at `cutoff` is not fresh.
    /// Entries without a timestamp are never fresh.
    pub fn is_fresh(&self, cutoff: DateTime<Utc>) -> bool {
        match self.stored_at {
            Some(at) => at > cutoff,
            None => false,
        }
    }
}
