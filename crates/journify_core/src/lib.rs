//! Core record store and derived-metrics engine for Journify.
//! This crate owns every persisted collection and every derived view; the
//! presentation layer only renders what it returns.

pub mod config;
pub mod db;
pub mod habit_calendar;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;
pub mod views;

pub use config::CoreConfig;
pub use habit_calendar::{rolling_window, toggle, HabitDay};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::date::DayKey;
pub use model::mood::{DimensionalMood, MoodSymbol};
pub use model::profile::{greeting, DisplayName};
pub use model::task::{Habit, RecordId, Task};
pub use model::validation::ValidationError;
pub use repo::collection::{
    Collection, CollectionName, CollectionSnapshot, DecodeError, HabitList, JournalEntries,
    MoodEntries, SliderMoodEntries, TaskList,
};
pub use repo::record_store::{LoadWarning, MutationListener, RecordStore};
pub use repo::{ReadFailure, StoreError, StoreResult};
pub use service::companion::{Companion, CompanionOpen, Subscription};
pub use storage::{KvStore, MemoryKvStore, SqliteKvStore, StorageError};
pub use views::{compute_view, SnapshotSet, ViewName, ViewPayload};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
