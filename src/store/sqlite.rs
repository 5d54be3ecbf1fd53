//! SQLite store
//!
//! Persists entries in one table per collection. The table has no uniqueness
//! constraint on `key`, so repeated misses append rows.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use super::{CacheEntry, CacheStore};
use crate::error::{Result, StoreError};

/// In-memory databases live per connection, so the pool is pinned to one.
const MEMORY_DATABASE: &str = ":memory:";

// == SQLite Store ==
/// Cache entries stored in a SQLite table.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
    collection: String,
}

impl SqliteStore {
    // == Connect ==
    /// Opens (creating if missing) the database and the collection table.
    ///
    /// # Arguments
    /// * `database` - Database name (`<name>.db`), a `sqlite:` URL, or `:memory:`
    /// * `collection` - Table holding the entries
    pub async fn connect(database: &str, collection: &str) -> Result<Self> {
        validate_collection(collection)?;

        let in_memory = database == MEMORY_DATABASE;
        let url = database_url(database);

        let options = SqliteConnectOptions::from_str(&url)
            .map_err(|e| StoreError::Connection(format!("Invalid database URL {}: {}", url, e)))?
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .create_if_missing(true);

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Connection(format!("{}: {}", url, e)))?;

        let store = Self {
            pool,
            collection: collection.to_string(),
        };
        store.ensure_schema().await?;

        info!("Connected to {} (collection '{}')", url, collection);
        Ok(store)
    }

    /// Name of the table entries are written to.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Number of rows stored under `key`.
    pub async fn count(&self, key: &str) -> Result<usize> {
        let sql = format!(r#"SELECT COUNT(*) FROM "{}" WHERE key = ?"#, self.collection);

        let count: i64 = sqlx::query_scalar(&sql)
            .bind(key)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::Operation(format!("Count failed: {}", e)))?;

        Ok(count as usize)
    }

    async fn ensure_schema(&self) -> Result<()> {
        let create_table = format!(
            r#"CREATE TABLE IF NOT EXISTS "{table}" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                stored_at TEXT
            )"#,
            table = self.collection
        );
        let create_index = format!(
            r#"CREATE INDEX IF NOT EXISTS "idx_{table}_key" ON "{table}" (key)"#,
            table = self.collection
        );

        for statement in [create_table, create_index] {
            sqlx::query(&statement)
                .execute(&self.pool)
                .await
                .map_err(|e| StoreError::Connection(format!("Schema setup failed: {}", e)))?;
        }

        debug!("Schema ready for collection '{}'", self.collection);
        Ok(())
    }
}

#[async_trait]
impl CacheStore for SqliteStore {
    /// Most recently inserted row wins.
    async fn find_one(&self, key: &str) -> Result<Option<CacheEntry>> {
        let sql = format!(
            r#"SELECT key, value, stored_at FROM "{}" WHERE key = ? ORDER BY id DESC LIMIT 1"#,
            self.collection
        );

        let row: Option<(String, String, Option<String>)> = sqlx::query_as(&sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Operation(format!("Lookup failed: {}", e)))?;

        row.map(|(key, value, stored_at)| -> Result<CacheEntry> {
            let stored_at = stored_at.as_deref().map(parse_timestamp).transpose()?;
            Ok(CacheEntry {
                key,
                value,
                stored_at,
            })
        })
        .transpose()
    }

    async fn insert(&self, entry: CacheEntry) -> Result<()> {
        let sql = format!(
            r#"INSERT INTO "{}" (key, value, stored_at) VALUES (?, ?, ?)"#,
            self.collection
        );

        sqlx::query(&sql)
            .bind(&entry.key)
            .bind(&entry.value)
            .bind(entry.stored_at.map(|at| at.to_rfc3339()))
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Operation(format!("Insert failed: {}", e)))?;

        Ok(())
    }
}

// == Helpers ==
fn database_url(database: &str) -> String {
    if database == MEMORY_DATABASE {
        "sqlite::memory:".to_string()
    } else if database.starts_with("sqlite:") {
        database.to_string()
    } else {
        format!("sqlite:{}.db", database)
    }
}

/// Collection names are interpolated into SQL, so only plain identifiers pass.
fn validate_collection(collection: &str) -> Result<()> {
    let mut chars = collection.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidCollection(collection.to_string()))
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Operation(format!("Bad stored_at '{}': {}", raw, e)))
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    async fn memory_store() -> SqliteStore {
        SqliteStore::connect(MEMORY_DATABASE, "test").await.unwrap()
    }

    #[test]
    fn test_database_url() {
        assert_eq!(database_url(":memory:"), "sqlite::memory:");
        assert_eq!(database_url("cheapcache"), "sqlite:cheapcache.db");
        assert_eq!(database_url("sqlite:/tmp/x.db"), "sqlite:/tmp/x.db");
    }

    #[test]
    fn test_validate_collection() {
        assert!(validate_collection("test").is_ok());
        assert!(validate_collection("_responses_2").is_ok());
        assert!(validate_collection("").is_err());
        assert!(validate_collection("1abc").is_err());
        assert!(validate_collection("x\"; DROP TABLE y; --").is_err());
    }

    #[tokio::test]
    async fn test_connect_rejects_bad_collection() {
        let result = SqliteStore::connect(MEMORY_DATABASE, "bad name").await;
        assert!(matches!(result, Err(StoreError::InvalidCollection(_))));
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = memory_store().await;
        store
            .insert(CacheEntry::new("http://a", r#"{"foo":"bar"}"#))
            .await
            .unwrap();

        let found = store.find_one("http://a").await.unwrap().unwrap();
        assert_eq!(found.value, r#"{"foo":"bar"}"#);
        assert!(found.stored_at.is_none());
        assert!(store.find_one("http://b").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_timestamp_survives_storage() {
        let store = memory_store().await;
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        store.insert(CacheEntry::stamped("k", "v", at)).await.unwrap();

        let found = store.find_one("k").await.unwrap().unwrap();
        assert_eq!(found.stored_at, Some(at));
    }

    #[tokio::test]
    async fn test_duplicates_accumulate_and_latest_wins() {
        let store = memory_store().await;
        store.insert(CacheEntry::new("k", "first")).await.unwrap();
        store.insert(CacheEntry::new("k", "second")).await.unwrap();

        assert_eq!(store.count("k").await.unwrap(), 2);
        assert_eq!(store.find_one("k").await.unwrap().unwrap().value, "second");
    }

    #[tokio::test]
    async fn test_entries_persist_across_connections() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let url = format!("sqlite:{}", dir.path().join("cache.db").display());

        {
            let store = SqliteStore::connect(&url, "responses").await.unwrap();
            store.insert(CacheEntry::new("k", "v")).await.unwrap();
        }

        let reopened = SqliteStore::connect(&url, "responses").await.unwrap();
        assert_eq!(reopened.collection(), "responses");
        assert_eq!(reopened.find_one("k").await.unwrap().unwrap().value, "v");
    }
}
