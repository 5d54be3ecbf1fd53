//! Configuration Module
//!
//! Handles loading cache and server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Which store backs the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// SQLite database file (persistent)
    Sqlite,
    /// Process memory (lost on exit)
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StoreBackend::Sqlite),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("Unknown store backend: {}", other)),
        }
    }
}

/// Cache and server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Store backend
    pub store: StoreBackend,
    /// Database name; `<name>.db` for SQLite, or a `sqlite:` URL / `:memory:`
    pub database: String,
    /// Collection (table) holding cache entries
    pub collection: String,
    /// Maximum entry age; None = entries never expire
    pub max_age: Option<Duration>,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CHEAPCACHE_STORE` - `sqlite` or `memory` (default: sqlite)
    /// - `CHEAPCACHE_DATABASE` - Database name (default: cheapcache)
    /// - `CHEAPCACHE_COLLECTION` - Collection name (default: test)
    /// - `CHEAPCACHE_MAX_AGE` - Max entry age in seconds, 0 or unset = no expiry
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            store: env::var("CHEAPCACHE_STORE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.store),
            database: env::var("CHEAPCACHE_DATABASE")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.database),
            collection: env::var("CHEAPCACHE_COLLECTION")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.collection),
            max_age: env::var("CHEAPCACHE_MAX_AGE")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreBackend::Sqlite,
            database: "cheapcache".to_string(),
            collection: "test".to_string(),
            max_age: None,
            server_port: 3000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.store, StoreBackend::Sqlite);
        assert_eq!(config.database, "cheapcache");
        assert_eq!(config.collection, "test");
        assert!(config.max_age.is_none());
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_store_backend_parse() {
        assert_eq!("memory".parse::<StoreBackend>(), Ok(StoreBackend::Memory));
        assert_eq!("SQLite".parse::<StoreBackend>(), Ok(StoreBackend::Sqlite));
        assert!("mongo".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn test_config_from_env() {
        // Single test touches the environment to avoid races between tests
        env::remove_var("CHEAPCACHE_STORE");
        env::remove_var("CHEAPCACHE_DATABASE");
        env::remove_var("CHEAPCACHE_COLLECTION");
        env::remove_var("CHEAPCACHE_MAX_AGE");
        env::remove_var("SERVER_PORT");

        let config = Config::from_env();
        assert_eq!(config.store, StoreBackend::Sqlite);
        assert_eq!(config.database, "cheapcache");
        assert!(config.max_age.is_none());

        env::set_var("CHEAPCACHE_STORE", "memory");
        env::set_var("CHEAPCACHE_COLLECTION", "responses");
        env::set_var("CHEAPCACHE_MAX_AGE", "90");

        let config = Config::from_env();
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.collection, "responses");
        assert_eq!(config.max_age, Some(Duration::from_secs(90)));

        env::set_var("CHEAPCACHE_MAX_AGE", "0");
        assert!(Config::from_env().max_age.is_none());

        env::remove_var("CHEAPCACHE_STORE");
        env::remove_var("CHEAPCACHE_COLLECTION");
        env::remove_var("CHEAPCACHE_MAX_AGE");
    }
}
