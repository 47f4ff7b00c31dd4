//! `SQLite`-backed preference store backend.
//!
//! A per-application key/value table standing in for a platform preference
//! store. Writes are visible to other readers of the same store instantly
//! within the process; durability is whatever `SQLite` provides.

use crate::storage::traits::StorageBackend;
use crate::{Error, Result};
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::PathBuf;

/// `SQLite`-backed preference store backend.
///
/// # Schema
///
/// A single `preferences` table:
/// - `key`: primary key, one row per stored value
/// - `value`: the serialized bytes
/// - `updated_at`: Unix timestamp of the last write
pub struct PreferencesBackend {
    /// Connection to the `SQLite` database.
    conn: Connection,
    /// Path to the database file (None for in-memory).
    db_path: Option<PathBuf>,
}

impl PreferencesBackend {
    /// Opens (creating if needed) the preference store at `db_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();

        // Best effort; a missing directory surfaces from the open below.
        if let Some(parent) = db_path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        let conn = Connection::open(&db_path).map_err(|e| Error::MediumUnavailable {
            operation: "open_preference_store".to_string(),
            cause: e.to_string(),
        })?;

        let backend = Self {
            conn,
            db_path: Some(db_path),
        };

        backend.initialize()?;
        Ok(backend)
    }

    /// Creates an in-memory preference store (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| Error::MediumUnavailable {
            operation: "open_preference_store_in_memory".to_string(),
            cause: e.to_string(),
        })?;

        let backend = Self {
            conn,
            db_path: None,
        };

        backend.initialize()?;
        Ok(backend)
    }

    /// Returns the database path (None for in-memory).
    #[must_use]
    pub const fn db_path(&self) -> Option<&PathBuf> {
        self.db_path.as_ref()
    }

    /// Initializes the database schema.
    fn initialize(&self) -> Result<()> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS preferences (
                    key        TEXT PRIMARY KEY,
                    value      BLOB NOT NULL,
                    updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
                );",
            )
            .map_err(|e| Error::MediumUnavailable {
                operation: "init_preference_schema".to_string(),
                cause: e.to_string(),
            })
    }
}

impl StorageBackend for PreferencesBackend {
    fn write(&mut self, key: &str, bytes: &[u8]) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO preferences (key, value, updated_at)
                 VALUES (?1, ?2, strftime('%s', 'now'))
                 ON CONFLICT(key) DO UPDATE SET
                     value = excluded.value,
                     updated_at = excluded.updated_at",
                params![key, bytes],
            )
            .map(|_| ())
            .map_err(|e| Error::MediumUnavailable {
                operation: "write_preference".to_string(),
                cause: e.to_string(),
            })
    }

    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| Error::MediumUnavailable {
                operation: "read_preference".to_string(),
                cause: e.to_string(),
            })
    }
}
