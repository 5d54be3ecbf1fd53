//! In-memory store
//!
//! Append-only entry log behind an async RwLock. Nothing survives the
//! process; used for tests and the `memory` backend.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{CacheEntry, CacheStore};
use crate::error::Result;

// == Memory Store ==
/// Entry log kept in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<Vec<CacheEntry>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of entries across all keys.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if nothing has been stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Number of entries stored under `key`.
    pub async fn count(&self, key: &str) -> Result<usize> {
        let entries = self.entries.read().await;
        Ok(entries.iter().filter(|e| e.key == key).count())
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    /// Most recently inserted match wins.
    async fn find_one(&self, key: &str) -> Result<Option<CacheEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.iter().rev().find(|e| e.key == key).cloned())
    }

    async fn insert(&self, entry: CacheEntry) -> Result<()> {
        self.entries.write().await.push(entry);
        Ok(())
    }
}
