//! Journal use-case service.
//!
//! # Invariants
//! - Saving uses full text replacement; empty text is a real entry.
//! - Deleting an absent date leaves storage untouched.

use crate::model::date::DayKey;
use crate::repo::collection::JournalEntries;
use crate::repo::record_store::RecordStore;
use crate::repo::StoreResult;
use crate::storage::KvStore;

/// Journal facade over its record store.
pub struct JournalService<S: KvStore> {
    store: RecordStore<JournalEntries, S>,
}

impl<S: KvStore> JournalService<S> {
    pub fn new(store: RecordStore<JournalEntries, S>) -> Self {
        Self { store }
    }

    /// Saves `text` for the date string `date`.
    pub fn save_entry(&self, date: &str, text: impl Into<String>) -> StoreResult<JournalEntries> {
        let date = DayKey::parse_input(date)?;
        self.store.upsert(date, text.into())
    }

    pub fn delete_entry(&self, date: &str) -> StoreResult<JournalEntries> {
        let date = DayKey::parse_input(date)?;
        self.store.remove(&date)
    }

    /// Text saved for `date`, or an empty string when nothing was saved.
    pub fn entry_for(&self, date: DayKey) -> String {
        self.store.snapshot().get(date).cloned().unwrap_or_default()
    }

    pub fn has_entry(&self, date: DayKey) -> bool {
        self.store.snapshot().contains(date)
    }

    pub fn entries(&self) -> JournalEntries {
        self.store.snapshot()
    }
}
