//! SQLite-backed key-value store.
//!
//! One table, one row per key, whole-value upserts. The connection is
//! guarded by a mutex; callers are synchronous and values are small, so no
//! pool is needed.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};
use wordforge_core::{KeyValueStore, StoreError};
use wordforge_domain::{Result, WordForgeError};

use crate::errors::{store_error_from_sql, InfraError};

const SCHEMA_SQL: &str = include_str!("schema.sql");
const BUSY_TIMEOUT: Duration = Duration::from_millis(250);

/// Persistent store backed by a single SQLite file
pub struct SqliteStore {
    conn: Mutex<Connection>,
    path: PathBuf,
    max_value_bytes: usize,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and ensure the schema exists
    ///
    /// # Errors
    /// Returns `WordForgeError::Persistence` if the file cannot be opened or
    /// the schema cannot be created.
    pub fn open<P: AsRef<Path>>(path: P, max_value_bytes: usize) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(&path).map_err(map_sql_error)?;
        let store = Self::init(conn, path, max_value_bytes)?;
        info!(db_path = %store.path.display(), max_value_bytes, "sqlite key-value store opened");
        Ok(store)
    }

    /// Private in-memory database, mainly for tests
    pub fn open_in_memory(max_value_bytes: usize) -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(map_sql_error)?;
        Self::init(conn, PathBuf::from(":memory:"), max_value_bytes)
    }

    fn init(conn: Connection, path: PathBuf, max_value_bytes: usize) -> Result<Self> {
        conn.busy_timeout(BUSY_TIMEOUT).map_err(map_sql_error)?;
        conn.execute_batch(SCHEMA_SQL).map_err(map_sql_error)?;
        Ok(Self { conn: Mutex::new(conn), path, max_value_bytes })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of stored keys
    pub fn key_count(&self) -> Result<usize> {
        let conn = self.conn.lock();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM kv_store", [], |row| row.get(0))
            .map_err(map_sql_error)?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

impl KeyValueStore for SqliteStore {
    fn read(&self, key: &str) -> std::result::Result<Option<String>, StoreError> {
        let conn = self.conn.lock();
        conn.query_row("SELECT value FROM kv_store WHERE key = ?1", params![key], |row| {
            row.get::<_, String>(0)
        })
        .optional()
        .map_err(|err| store_error_from_sql(err, 0))
    }

    fn write(&self, key: &str, value: &str) -> std::result::Result<(), StoreError> {
        if value.len() > self.max_value_bytes {
            return Err(StoreError::QuotaExceeded {
                needed: value.len(),
                limit: self.max_value_bytes,
            });
        }

        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE
             SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().timestamp_millis()],
        )
        .map_err(|err| store_error_from_sql(err, value.len()))?;
        debug!(key, bytes = value.len(), "stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> std::result::Result<(), StoreError> {
        let conn = self.conn.lock();
        conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])
            .map_err(|err| store_error_from_sql(err, 0))?;
        Ok(())
    }
}

fn map_sql_error(err: rusqlite::Error) -> WordForgeError {
    WordForgeError::from(InfraError::from(err))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn upsert_replaces_value() {
        let store = SqliteStore::open_in_memory(1024).unwrap();
        store.write("snapshot", "first").unwrap();
        store.write("snapshot", "second").unwrap();

        assert_eq!(store.read("snapshot").unwrap().as_deref(), Some("second"));
        assert_eq!(store.key_count().unwrap(), 1);
    }

    #[test]
    fn missing_key_reads_none() {
        let store = SqliteStore::open_in_memory(1024).unwrap();
        assert_eq!(store.read("nothing").unwrap(), None);
    }

    #[test]
    fn quota_is_enforced_before_writing() {
        let store = SqliteStore::open_in_memory(8).unwrap();
        store.write("k", "12345678").unwrap();

        let err = store.write("k", "123456789").unwrap_err();
        assert_eq!(err, StoreError::QuotaExceeded { needed: 9, limit: 8 });
        assert!(err.is_transient());
        assert_eq!(store.read("k").unwrap().as_deref(), Some("12345678"));
    }

    #[test]
    fn values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("kv.db");

        {
            let store = SqliteStore::open(&path, 1024).unwrap();
            store.write("a", "alpha").unwrap();
            store.write("b", "beta").unwrap();
            store.remove("b").unwrap();
        }

        let reopened = SqliteStore::open(&path, 1024).unwrap();
        assert_eq!(reopened.read("a").unwrap().as_deref(), Some("alpha"));
        assert_eq!(reopened.read("b").unwrap(), None);
        assert_eq!(reopened.path(), path.as_path());
    }

    #[test]
    fn unopenable_path_is_a_persistence_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("kv.db");
        let err = SqliteStore::open(&path, 1024).err().unwrap();
        assert!(matches!(err, WordForgeError::Persistence(_)));
    }
}
