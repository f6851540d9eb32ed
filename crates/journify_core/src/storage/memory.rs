//! Process-local in-memory document adapter.

use super::{KvStore, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Ephemeral adapter with a switch for simulating failed durable writes.
#[derive(Default)]
pub struct MemoryKvStore {
    documents: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw payload, bypassing record-store encoding.
    pub fn with_document(self, key: &str, payload: &str) -> Self {
        self.documents().insert(key.to_string(), payload.to_string());
        self
    }

    /// When set, `write` and `delete` fail without touching stored documents.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn documents(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.documents.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ensure_writable(&self, key: &str) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Backend(format!(
                "write to `{key}` rejected: store is read-only"
            )));
        }
        Ok(())
    }
}

impl KvStore for MemoryKvStore {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.documents().get(key).cloned())
    }

    fn write(&self, key: &str, payload: &str) -> StorageResult<()> {
        self.ensure_writable(key)?;
        self.documents().insert(key.to_string(), payload.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        self.ensure_writable(key)?;
        self.documents().remove(key);
        Ok(())
    }
}
