//! SQLite-backed document adapter.
//!
//! # Invariants
//! - Each write is one UPSERT statement, so it commits atomically.
//! - The connection is guarded by a mutex; calls never interleave.

use super::{KvStore, StorageResult};
use crate::db::{open_db, open_db_in_memory};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Document store over the `documents` table.
pub struct SqliteKvStore {
    conn: Mutex<Connection>,
}

impl SqliteKvStore {
    /// Opens (and migrates) a database file.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    pub fn open_in_memory() -> StorageResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps a connection that already carries the document schema.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        // A poisoned guard still holds a consistent connection: every statement
        // either committed or did not.
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KvStore for SqliteKvStore {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let payload = self
            .conn()
            .query_row(
                "SELECT payload FROM documents WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn write(&self, key: &str, payload: &str) -> StorageResult<()> {
        self.conn().execute(
            "INSERT INTO documents (key, payload, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![key, payload],
        )?;
        Ok(())
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        self.conn().execute("DELETE FROM documents WHERE key = ?1;", [key])?;
        Ok(())
    }
}
