//! Task and habit domain model.
//!
//! # Responsibility
//! - Define the ordered-sequence records of the productivity corner.
//! - Mint opaque, creation-ordered record ids.
//!
//! # Invariants
//! - `id` never changes after creation.
//! - A habit's `completed_dates` is a set: membership is all that matters.

use crate::model::date::DayKey;
use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque record id for tasks and habits.
///
/// Freshly minted ids are UUIDv7 strings, so lexical order follows creation order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// To-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: RecordId,
    pub text: String,
    pub completed: bool,
}

impl Task {
    /// Creates a not-yet-completed task with a fresh id.
    pub fn new(text: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            id: RecordId::generate(),
            text: normalize_text(text)?,
            completed: false,
        })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        normalize_text(&self.text).map(|_| ())
    }
}

/// Recurring habit tracked per calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: RecordId,
    pub text: String,
    #[serde(default)]
    pub completed_dates: BTreeSet<DayKey>,
}

impl Habit {
    /// Creates a habit with no completed days and a fresh id.
    pub fn new(text: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            id: RecordId::generate(),
            text: normalize_text(text)?,
            completed_dates: BTreeSet::new(),
        })
    }

    pub fn is_completed_on(&self, date: DayKey) -> bool {
        self.completed_dates.contains(&date)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        normalize_text(&self.text).map(|_| ())
    }
}

/// Trims task/habit text, rejecting blank input.
pub fn normalize_text(value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyText);
    }
    Ok(trimmed.to_string())
}
