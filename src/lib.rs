//! cheapcache - Memoizing cache for single-argument fetch functions
//!
//! The first call with a key runs the wrapped function and stores the result;
//! later calls with that key are answered from the store, optionally bounded
//! by a max age. Entries are never evicted.
//!
//! ```ignore
//! let store = Arc::new(SqliteStore::connect("cheapcache", "test").await?);
//! let fetch = Memoized::with_max_age(store, HttpFetcher::new(), Duration::from_secs(60));
//! let body = fetch.call("http://api.example.com/conditions.json").await?;
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod fetch;
pub mod memoize;
pub mod models;
pub mod store;

pub use api::AppState;
pub use config::Config;
pub use error::{CacheError, FetchError, StoreError};
pub use fetch::{fetcher_fn, Fetcher, HttpFetcher};
pub use memoize::{Expiration, Memoized};
pub use store::{CacheEntry, CacheStore, MemoryStore, SqliteStore};
