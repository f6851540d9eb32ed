//! Record stores over the key-value persistence adapter.
//!
//! # Responsibility
//! - Own the authoritative in-memory copy of each persisted collection.
//! - Convert adapter and codec failures into the store error taxonomy.
//!
//! # Invariants
//! - Validation failures never reach storage.
//! - A failed write leaves the previous snapshot in place.

pub mod collection;
pub mod record_store;

use crate::model::validation::ValidationError;
use crate::repo::collection::DecodeError;
use crate::storage::StorageError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Why a stored document could not be read.
#[derive(Debug)]
pub enum ReadFailure {
    /// The adapter itself failed to return the document.
    Unavailable(StorageError),
    /// The document exists but is corrupt or fails validation.
    Corrupt(DecodeError),
}

impl Display for ReadFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(err) => write!(f, "{err}"),
            Self::Corrupt(err) => write!(f, "{err}"),
        }
    }
}

/// Error surfaced at the record store boundary.
#[derive(Debug)]
pub enum StoreError {
    StorageRead {
        document: &'static str,
        failure: ReadFailure,
    },
    /// Durable write failed; the mutation was not committed.
    StorageWrite {
        document: &'static str,
        source: StorageError,
    },
    Validation(ValidationError),
    NotFound {
        document: &'static str,
        key: String,
    },
}

impl StoreError {
    /// Returns whether repeating the same mutation may succeed.
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::StorageWrite { .. })
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StorageRead { document, failure } => {
                write!(f, "failed to read `{document}`: {failure}")
            }
            Self::StorageWrite { document, source } => {
                write!(f, "`{document}` not saved: {source}")
            }
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { document, key } => {
                write!(f, "no record `{key}` in `{document}`")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StorageRead { failure, .. } => match failure {
                ReadFailure::Unavailable(err) => Some(err),
                ReadFailure::Corrupt(err) => Some(err),
            },
            Self::StorageWrite { source, .. } => Some(source),
            Self::Validation(err) => Some(err),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}
