//! Generic whole-collection record store.
//!
//! # Responsibility
//! - Load one collection document and keep it as the authoritative snapshot.
//! - Apply mutations as read-modify-write cycles that persist the whole
//!   collection before the new snapshot becomes visible.
//!
//! # Invariants
//! - Mutations on one store are strictly serialized; the state lock is held
//!   across the durable write, so no two cycles interleave.
//! - The in-memory snapshot is replaced only after the write succeeds.
//! - Listeners are notified only for committed mutations, one at a time, and
//!   never receive a snapshot older than one they already received.

use crate::repo::collection::{Collection, CollectionName, CollectionSnapshot};
use crate::repo::{ReadFailure, StoreError, StoreResult};
use crate::storage::{KvStore, StorageError};
use log::{debug, error, info, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

/// Receives the latest snapshot after every committed mutation.
pub trait MutationListener: Send + Sync {
    fn on_mutate(&self, collection: CollectionName, snapshot: &CollectionSnapshot);
}

/// Non-fatal notice raised when a corrupt document was replaced by an empty one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    pub document: &'static str,
    pub reason: String,
}

/// Owner of one persisted collection.
pub struct RecordStore<C: Collection, S: KvStore> {
    kv: S,
    state: Mutex<C>,
    /// Bumped under the state lock on every commit.
    version: AtomicU64,
    /// Version of the last snapshot handed to the listener.
    delivered: Mutex<u64>,
    listener: Option<Arc<dyn MutationListener>>,
}

impl<C: Collection, S: KvStore> RecordStore<C, S> {
    /// Opens the store, failing with `StorageRead` on an unreadable document.
    ///
    /// An absent document opens as an empty collection.
    pub fn open(kv: S) -> StoreResult<Self> {
        let collection = read_collection::<C, S>(&kv)?;
        Ok(Self::with_state(kv, collection))
    }

    /// Opens the store, treating a corrupt document as empty.
    ///
    /// Adapter failures are still returned as errors; only undecodable
    /// payloads are recovered, and each recovery yields a `LoadWarning`.
    pub fn open_or_recover(kv: S) -> StoreResult<(Self, Option<LoadWarning>)> {
        match read_collection::<C, S>(&kv) {
            Ok(collection) => Ok((Self::with_state(kv, collection), None)),
            Err(StoreError::StorageRead {
                document,
                failure: ReadFailure::Corrupt(err),
            }) => {
                warn!(
                    "event=store_recover module=repo status=warn document={} reason=corrupt_document",
                    document
                );
                let warning = LoadWarning {
                    document,
                    reason: err.to_string(),
                };
                Ok((Self::with_state(kv, C::default()), Some(warning)))
            }
            Err(err) => Err(err),
        }
    }

    fn with_state(kv: S, collection: C) -> Self {
        Self {
            kv,
            state: Mutex::new(collection),
            version: AtomicU64::new(0),
            delivered: Mutex::new(0),
            listener: None,
        }
    }

    /// Attaches the listener notified after each committed mutation.
    pub fn with_listener(mut self, listener: Arc<dyn MutationListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Re-reads the document and replaces the in-memory snapshot.
    ///
    /// On failure the previous snapshot is kept.
    pub fn load(&self) -> StoreResult<C> {
        let mut state = self.lock();
        let collection = read_collection::<C, S>(&self.kv)?;
        *state = collection.clone();
        Ok(collection)
    }

    /// Returns a copy of the current committed collection.
    pub fn snapshot(&self) -> C {
        self.lock().clone()
    }

    /// Inserts or replaces the record at `key` and persists the collection.
    pub fn upsert(&self, key: C::Key, record: C::Record) -> StoreResult<C> {
        self.mutate("upsert", |collection| {
            collection.upsert_record(key, record)?;
            Ok(true)
        })
    }

    /// Removes the record at `key`. Removing an absent key is a no-op.
    pub fn remove(&self, key: &C::Key) -> StoreResult<C> {
        self.mutate("remove", |collection| Ok(collection.remove_record(key)))
    }

    /// Runs a custom read-modify-write cycle.
    ///
    /// `apply` edits a working copy and returns whether it changed anything;
    /// an unchanged copy is not written.
    pub fn update(&self, apply: impl FnOnce(&mut C) -> StoreResult<bool>) -> StoreResult<C> {
        self.mutate("update", apply)
    }

    /// Deletes the stored document and empties the collection.
    pub fn reset(&self) -> StoreResult<C> {
        let document = C::NAME.document_key();
        let mut state = self.lock();
        self.kv.delete(document).map_err(|source| {
            error!(
                "event=store_reset module=repo status=error document={} error={}",
                document, source
            );
            StoreError::StorageWrite { document, source }
        })?;
        *state = C::default();
        let version = self.commit_version();
        drop(state);
        info!("event=store_reset module=repo status=ok document={document}");
        self.notify(version, C::default());
        Ok(C::default())
    }

    fn mutate(
        &self,
        op: &'static str,
        apply: impl FnOnce(&mut C) -> StoreResult<bool>,
    ) -> StoreResult<C> {
        let started_at = Instant::now();
        let document = C::NAME.document_key();
        let mut state = self.lock();

        let mut next = state.clone();
        if !apply(&mut next)? {
            debug!("event=store_{op} module=repo status=ok document={document} changed=false");
            return Ok(next);
        }

        let payload = next.encode().map_err(|err| StoreError::StorageWrite {
            document,
            source: StorageError::Backend(format!("encode failed: {err}")),
        })?;
        if let Err(source) = self.kv.write(document, &payload) {
            error!(
                "event=store_{} module=repo status=error document={} duration_ms={} error_code=write_failed error={}",
                op,
                document,
                started_at.elapsed().as_millis(),
                source
            );
            return Err(StoreError::StorageWrite { document, source });
        }

        *state = next.clone();
        let version = self.commit_version();
        drop(state);
        info!(
            "event=store_{} module=repo status=ok document={} records={} bytes={} duration_ms={}",
            op,
            document,
            next.len(),
            payload.len(),
            started_at.elapsed().as_millis()
        );
        self.notify(version, next.clone());
        Ok(next)
    }

    /// Must be called with the state lock held.
    fn commit_version(&self) -> u64 {
        self.version.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn notify(&self, version: u64, collection: C) {
        let Some(listener) = &self.listener else {
            return;
        };
        let mut delivered = self
            .delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if version <= *delivered {
            debug!(
                "event=store_notify module=repo status=ok document={} version={} skipped=stale",
                C::NAME.document_key(),
                version
            );
            return;
        }
        *delivered = version;
        listener.on_mutate(C::NAME, &collection.into_snapshot());
    }

    fn lock(&self) -> MutexGuard<'_, C> {
        // The guarded value is only ever replaced wholesale after a successful
        // write, so a poisoned lock still holds a committed snapshot.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn read_collection<C: Collection, S: KvStore>(kv: &S) -> StoreResult<C> {
    let document = C::NAME.document_key();
    let payload = kv.read(document).map_err(|err| {
        error!(
            "event=store_load module=repo status=error document={} error_code=read_failed error={}",
            document, err
        );
        StoreError::StorageRead {
            document,
            failure: ReadFailure::Unavailable(err),
        }
    })?;

    let Some(payload) = payload else {
        debug!("event=store_load module=repo status=ok document={document} records=0 absent=true");
        return Ok(C::default());
    };

    let collection = C::decode(&payload).map_err(|err| {
        error!(
            "event=store_load module=repo status=error document={} error_code=decode_failed error={}",
            document, err
        );
        StoreError::StorageRead {
            document,
            failure: ReadFailure::Corrupt(err),
        }
    })?;
    debug!(
        "event=store_load module=repo status=ok document={} records={}",
        document,
        collection.len()
    );
    Ok(collection)
}
