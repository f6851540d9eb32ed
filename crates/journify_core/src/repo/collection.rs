//! Persisted collection shapes and their document codec.
//!
//! # Responsibility
//! - Define the five per-domain collections and their document keys.
//! - Encode a collection to its textual document and decode it back with
//!   validation, so malformed records never enter a record store.
//!
//! # Invariants
//! - Date-keyed collections iterate in ascending date order.
//! - Ordered-sequence collections keep insertion order through a round-trip.
//! - Decoding rejects duplicate ids, duplicate date keys and blank texts;
//!   duplicate habit dates are collapsed.

use crate::model::date::DayKey;
use crate::model::mood::{DimensionalMood, MoodSymbol};
use crate::model::task::{Habit, RecordId, Task};
use crate::model::validation::ValidationError;
use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

/// Stable name of each persisted collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionName {
    Journal,
    Moods,
    SliderMoods,
    Tasks,
    Habits,
}

impl CollectionName {
    pub const ALL: [CollectionName; 5] = [
        Self::Journal,
        Self::Moods,
        Self::SliderMoods,
        Self::Tasks,
        Self::Habits,
    ];

    /// Top-level storage key of the collection document.
    pub fn document_key(self) -> &'static str {
        match self {
            Self::Journal => "journalEntries",
            Self::Moods => "moodEntries",
            Self::SliderMoods => "sliderMoodEntries",
            Self::Tasks => "tasks",
            Self::Habits => "habits",
        }
    }
}

impl Display for CollectionName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.document_key())
    }
}

/// Reason a stored document could not become a collection.
#[derive(Debug)]
pub enum DecodeError {
    Malformed(serde_json::Error),
    DuplicateDate(DayKey),
    DuplicateId(RecordId),
    InvalidRecord {
        id: RecordId,
        reason: ValidationError,
    },
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "malformed document: {err}"),
            Self::DuplicateDate(date) => write!(f, "duplicate date key `{date}`"),
            Self::DuplicateId(id) => write!(f, "duplicate record id `{id}`"),
            Self::InvalidRecord { id, reason } => write!(f, "invalid record `{id}`: {reason}"),
        }
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed(err) => Some(err),
            Self::DuplicateDate(_) | Self::DuplicateId(_) => None,
            Self::InvalidRecord { reason, .. } => Some(reason),
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(value: serde_json::Error) -> Self {
        Self::Malformed(value)
    }
}

/// A whole persisted collection owned by one record store.
pub trait Collection: Clone + Default + PartialEq + Send {
    type Key: Clone + Display;
    type Record;

    const NAME: CollectionName;

    /// Validates and stores `record` under `key`, replacing any previous value.
    fn upsert_record(&mut self, key: Self::Key, record: Self::Record)
        -> Result<(), ValidationError>;

    /// Removes the record at `key`; returns whether anything was removed.
    fn remove_record(&mut self, key: &Self::Key) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn encode(&self) -> Result<String, serde_json::Error>;

    fn decode(payload: &str) -> Result<Self, DecodeError>;

    fn into_snapshot(self) -> CollectionSnapshot;
}

/// Date-keyed collection (journal text, categorical mood, slider mood).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatedEntries<V>(BTreeMap<DayKey, V>);

pub type JournalEntries = DatedEntries<String>;
pub type MoodEntries = DatedEntries<MoodSymbol>;
pub type SliderMoodEntries = DatedEntries<DimensionalMood>;

impl<V> Default for DatedEntries<V> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}

impl<V> DatedEntries<V> {
    pub fn get(&self, date: DayKey) -> Option<&V> {
        self.0.get(&date)
    }

    pub fn contains(&self, date: DayKey) -> bool {
        self.0.contains_key(&date)
    }

    /// Iterates entries in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (DayKey, &V)> {
        self.0.iter().map(|(date, value)| (*date, value))
    }

    pub fn dates(&self) -> impl Iterator<Item = DayKey> + '_ {
        self.0.keys().copied()
    }
}

impl<V> FromIterator<(DayKey, V)> for DatedEntries<V> {
    fn from_iter<I: IntoIterator<Item = (DayKey, V)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Date-keyed document entries in payload order, duplicates included.
struct RawDatedEntries<V>(Vec<(DayKey, V)>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for RawDatedEntries<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
            type Value = RawDatedEntries<V>;

            fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str("an object keyed by YYYY-MM-DD dates")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<DayKey, V>()? {
                    entries.push(entry);
                }
                Ok(RawDatedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

fn decode_dated<V: DeserializeOwned>(payload: &str) -> Result<DatedEntries<V>, DecodeError> {
    let raw: Option<RawDatedEntries<V>> = serde_json::from_str(payload)?;
    let mut entries = BTreeMap::new();
    for (date, value) in raw.map(|raw| raw.0).unwrap_or_default() {
        if entries.insert(date, value).is_some() {
            return Err(DecodeError::DuplicateDate(date));
        }
    }
    Ok(DatedEntries(entries))
}

macro_rules! dated_collection {
    ($value:ty, $name:expr, $variant:ident) => {
        impl Collection for DatedEntries<$value> {
            type Key = DayKey;
            type Record = $value;

            const NAME: CollectionName = $name;

            fn upsert_record(
                &mut self,
                key: DayKey,
                record: $value,
            ) -> Result<(), ValidationError> {
                self.0.insert(key, record);
                Ok(())
            }

            fn remove_record(&mut self, key: &DayKey) -> bool {
                self.0.remove(key).is_some()
            }

            fn len(&self) -> usize {
                self.0.len()
            }

            fn encode(&self) -> Result<String, serde_json::Error> {
                serde_json::to_string(&self.0)
            }

            fn decode(payload: &str) -> Result<Self, DecodeError> {
                decode_dated(payload)
            }

            fn into_snapshot(self) -> CollectionSnapshot {
                CollectionSnapshot::$variant(self)
            }
        }
    };
}

dated_collection!(String, CollectionName::Journal, Journal);
dated_collection!(MoodSymbol, CollectionName::Moods, Moods);
dated_collection!(DimensionalMood, CollectionName::SliderMoods, SliderMoods);

/// Record carrying its own immutable id.
pub trait Identified {
    fn id(&self) -> &RecordId;
    fn validate(&self) -> Result<(), ValidationError>;
}

impl Identified for Task {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Task::validate(self)
    }
}

impl Identified for Habit {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Habit::validate(self)
    }
}

/// Creation-ordered sequence of id-carrying records (tasks, habits).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordList<T>(Vec<T>);

pub type TaskList = RecordList<Task>;
pub type HabitList = RecordList<Habit>;

impl<T> Default for RecordList<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T: Identified> RecordList<T> {
    pub fn get(&self, id: &RecordId) -> Option<&T> {
        self.0.iter().find(|record| record.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    fn upsert_identified(&mut self, key: RecordId, record: T) -> Result<(), ValidationError> {
        if record.id() != &key {
            return Err(ValidationError::IdMismatch {
                key: key.to_string(),
                record_id: record.id().to_string(),
            });
        }
        record.validate()?;
        match self.0.iter_mut().find(|existing| existing.id() == &key) {
            Some(existing) => *existing = record,
            None => self.0.push(record),
        }
        Ok(())
    }

    fn remove_identified(&mut self, key: &RecordId) -> bool {
        let before = self.0.len();
        self.0.retain(|record| record.id() != key);
        self.0.len() != before
    }
}

impl<T: Identified> FromIterator<T> for RecordList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn decode_list<T: Identified + DeserializeOwned>(
    payload: &str,
) -> Result<RecordList<T>, DecodeError> {
    let records: Option<Vec<T>> = serde_json::from_str(payload)?;
    let records = records.unwrap_or_default();
    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
        if !seen.insert(record.id().clone()) {
            return Err(DecodeError::DuplicateId(record.id().clone()));
        }
        record
            .validate()
            .map_err(|reason| DecodeError::InvalidRecord {
                id: record.id().clone(),
                reason,
            })?;
    }
    Ok(RecordList(records))
}

macro_rules! list_collection {
    ($record:ty, $name:expr, $variant:ident) => {
        impl Collection for RecordList<$record> {
            type Key = RecordId;
            type Record = $record;

            const NAME: CollectionName = $name;

            fn upsert_record(
                &mut self,
                key: RecordId,
                record: $record,
            ) -> Result<(), ValidationError> {
                self.upsert_identified(key, record)
            }

            fn remove_record(&mut self, key: &RecordId) -> bool {
                self.remove_identified(key)
            }

            fn len(&self) -> usize {
                self.0.len()
            }

            fn encode(&self) -> Result<String, serde_json::Error> {
                serde_json::to_string(&self.0)
            }

            fn decode(payload: &str) -> Result<Self, DecodeError> {
                decode_list(payload)
            }

            fn into_snapshot(self) -> CollectionSnapshot {
                CollectionSnapshot::$variant(self)
            }
        }
    };
}

list_collection!(Task, CollectionName::Tasks, Tasks);
list_collection!(Habit, CollectionName::Habits, Habits);

/// Type-erased collection value handed to mutation listeners.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionSnapshot {
    Journal(JournalEntries),
    Moods(MoodEntries),
    SliderMoods(SliderMoodEntries),
    Tasks(TaskList),
    Habits(HabitList),
}

impl CollectionSnapshot {
    pub fn name(&self) -> CollectionName {
        match self {
            Self::Journal(_) => CollectionName::Journal,
            Self::Moods(_) => CollectionName::Moods,
            Self::SliderMoods(_) => CollectionName::SliderMoods,
            Self::Tasks(_) => CollectionName::Tasks,
            Self::Habits(_) => CollectionName::Habits,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Journal(entries) => entries.len(),
            Self::Moods(entries) => entries.len(),
            Self::SliderMoods(entries) => entries.len(),
            Self::Tasks(tasks) => tasks.len(),
            Self::Habits(habits) => habits.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
