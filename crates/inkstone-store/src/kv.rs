// ABOUTME: SQLite-backed key-value store holding named string entries.
// ABOUTME: Provides open, get, put, and delete over a single kv table in WAL mode.

use std::fs;
use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

/// Errors that can occur during key-value store operations.
#[derive(Debug, Error)]
pub enum KvError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// A local key-value store backed by a single SQLite table. Each entry is
/// a named string; callers own the serialization of whatever they keep in
/// a value.
pub struct KvStore {
    conn: Connection,
}

impl KvStore {
    /// Open or create the store database at the given path.
    /// Creates parent directories if they do not exist.
    pub fn open(path: &Path) -> Result<Self, KvError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;

        Ok(Self { conn })
    }

    /// Read the value stored under a key. Returns None when the key is absent.
    pub fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Write a value under a key, replacing any previous value.
    pub fn put(&self, key: &str, value: &str) -> Result<(), KvError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove a key and its value. Removing an absent key is not an error.
    pub fn delete(&self, key: &str) -> Result<(), KvError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}
