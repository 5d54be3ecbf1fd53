//! Store Module
//!
//! Persistence for cache entries: the `CacheStore` seam plus an in-memory
//! and a SQLite-backed implementation.

mod entry;
mod memory;
mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{Config, StoreBackend};
use crate::error::Result;

// Re-export public types
pub use entry::CacheEntry;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

// == Cache Store Trait ==
/// Point-lookup/append document store holding cache entries.
///
/// No uniqueness constraint is enforced on `key`; inserting the same key
/// twice keeps both entries.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns one stored entry for `key`, if any.
    async fn find_one(&self, key: &str) -> Result<Option<CacheEntry>>;

    /// Appends an entry.
    async fn insert(&self, entry: CacheEntry) -> Result<()>;
}

#[async_trait]
impl<T: CacheStore + ?Sized> CacheStore for Arc<T> {
    async fn find_one(&self, key: &str) -> Result<Option<CacheEntry>> {
        (**self).find_one(key).await
    }

    async fn insert(&self, entry: CacheEntry) -> Result<()> {
        (**self).insert(entry).await
    }
}

// == Connect ==
/// Opens the store selected by the configuration.
///
/// Fails with `StoreError::Connection` when the backend cannot be reached.
pub async fn connect(config: &Config) -> Result<Arc<dyn CacheStore>> {
    match config.store {
        StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreBackend::Sqlite => {
            let store = SqliteStore::connect(&config.database, &config.collection).await?;
            Ok(Arc::new(store))
        }
    }
}
