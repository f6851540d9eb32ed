//! Domain model for journal, mood and productivity records.
//!
//! # Responsibility
//! - Define the record shapes owned by the record stores.
//! - Keep date keys canonical across every record kind.
//!
//! # Invariants
//! - Every dated record is keyed by a `DayKey`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod date;
pub mod mood;
pub mod profile;
pub mod task;
pub mod validation;
