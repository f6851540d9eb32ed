//! Key-value persistence adapter contract.
//!
//! # Responsibility
//! - Define the narrow read/write/delete contract record stores depend on.
//! - Provide SQLite-backed and in-memory adapters.
//!
//! # Invariants
//! - A document is always written whole; readers see the old payload or the
//!   new one, never a mix.
//! - Reading an absent key is `Ok(None)`, not an error.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

mod memory;
mod sqlite;

pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

pub type StorageResult<T> = Result<T, StorageError>;

/// Adapter-level failure.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    /// Backend refused or failed the operation for a non-SQLite reason.
    Backend(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Backend(message) => write!(f, "storage backend failure: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Backend(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable storage of whole textual documents under string keys.
pub trait KvStore: Send + Sync {
    fn read(&self, key: &str) -> StorageResult<Option<String>>;
    fn write(&self, key: &str, payload: &str) -> StorageResult<()>;
    fn delete(&self, key: &str) -> StorageResult<()>;
}

impl<T: KvStore + ?Sized> KvStore for Arc<T> {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, payload: &str) -> StorageResult<()> {
        (**self).write(key, payload)
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        (**self).delete(key)
    }
}
