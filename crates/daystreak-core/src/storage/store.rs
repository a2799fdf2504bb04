//! SQLite-backed key-value store for tracker state.
//!
//! Each top-level collection is stored as one JSON document under its own
//! key, so a read or write touches a single row. There are no transactions
//! spanning keys.

use std::path::Path;

use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::data_dir;
use crate::error::{Result, StorageError};

/// Keys under which tracker state is persisted.
pub mod keys {
    pub const HABITS: &str = "habits";
    pub const HABIT_LOGS: &str = "habit_logs";
    pub const MOODS: &str = "moods";
    pub const TASKS: &str = "tasks";
    pub const PREFS: &str = "prefs";
}

/// Store file name inside the data directory.
pub const STORE_FILE: &str = "daystreak.db";

/// Key-value store of JSON documents.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open the store at `<data dir>/daystreak.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory or database cannot be opened.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join(STORE_FILE);
        Self::open_at(&path)
    }

    /// Open the store at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        debug!(path = %path.display(), "store opened");
        Ok(store)
    }

    /// Open an in-memory store.
    ///
    /// # Errors
    /// Returns an error if SQLite cannot allocate the database.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a raw value from the kv store.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a raw value in the kv store.
    ///
    /// # Errors
    /// Returns an error if the write fails.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Decode the JSON document under `key`.
    ///
    /// A missing key or a document that no longer decodes yields `T::default()`;
    /// the latter is logged and left in place until the next save.
    ///
    /// # Errors
    /// Returns an error only if the query fails.
    pub fn load_or_default<T>(&self, key: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let Some(raw) = self.kv_get(key)? else {
            return Ok(T::default());
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(key, error = %e, "stored value is not valid; using default");
                Ok(T::default())
            }
        }
    }

    /// Encode `value` as JSON under `key`.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.kv_set(key, &raw)?;
        debug!(key, bytes = raw.len(), "value saved");
        Ok(())
    }
}
