//! Derived-view engine.
//!
//! # Responsibility
//! - Compute every UI-facing view from immutable snapshots plus an explicit
//!   `today`.
//!
//! # Invariants
//! - Views are pure functions; nothing here reads a clock or storage.
//! - Derived values are never persisted or cached.

pub mod journal;
pub mod mood;
pub mod productivity;

use crate::habit_calendar::{rolling_window, HabitDay, WINDOW_DAYS};
use crate::model::date::DayKey;
use crate::model::mood::MoodSymbol;
use crate::model::task::RecordId;
use crate::repo::collection::{
    HabitList, JournalEntries, MoodEntries, SliderMoodEntries, TaskList,
};
use std::collections::BTreeMap;

pub use journal::{group_by_month, JournalItem, MonthGroup};
pub use mood::{current_streak, marked_dates, mood_histogram, weekly_series, WeeklySeries};
pub use productivity::productivity_score;

/// Committed snapshots of all five collections, taken together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotSet {
    pub journal: JournalEntries,
    pub moods: MoodEntries,
    pub slider_moods: SliderMoodEntries,
    pub tasks: TaskList,
    pub habits: HabitList,
}

/// Views the presentation layer can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewName {
    JournalByMonth,
    WeeklyMood,
    WeeklySliderMood,
    CurrentStreak,
    MoodHistogram,
    MarkedDates,
    ProductivityScore,
    HabitWindows,
}

impl ViewName {
    pub const ALL: [ViewName; 8] = [
        Self::JournalByMonth,
        Self::WeeklyMood,
        Self::WeeklySliderMood,
        Self::CurrentStreak,
        Self::MoodHistogram,
        Self::MarkedDates,
        Self::ProductivityScore,
        Self::HabitWindows,
    ];
}

/// Rolling window for one habit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitWindow {
    pub habit_id: RecordId,
    pub text: String,
    pub days: [HabitDay; WINDOW_DAYS],
}

/// Result of `compute_view`, one variant per `ViewName`.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewPayload {
    JournalByMonth(Vec<MonthGroup>),
    WeeklyMood(WeeklySeries),
    WeeklySliderMood(WeeklySeries),
    CurrentStreak(u32),
    MoodHistogram(BTreeMap<MoodSymbol, usize>),
    MarkedDates(Vec<DayKey>),
    ProductivityScore(u8),
    HabitWindows(Vec<HabitWindow>),
}

/// Computes one view from `snapshots` as of `today`.
pub fn compute_view(view: ViewName, snapshots: &SnapshotSet, today: DayKey) -> ViewPayload {
    match view {
        ViewName::JournalByMonth => ViewPayload::JournalByMonth(group_by_month(&snapshots.journal)),
        ViewName::WeeklyMood => ViewPayload::WeeklyMood(weekly_series(&snapshots.moods, today)),
        ViewName::WeeklySliderMood => {
            ViewPayload::WeeklySliderMood(weekly_series(&snapshots.slider_moods, today))
        }
        ViewName::CurrentStreak => {
            ViewPayload::CurrentStreak(current_streak(&snapshots.moods, today))
        }
        ViewName::MoodHistogram => ViewPayload::MoodHistogram(mood_histogram(&snapshots.moods)),
        ViewName::MarkedDates => ViewPayload::MarkedDates(marked_dates(&snapshots.moods)),
        ViewName::ProductivityScore => ViewPayload::ProductivityScore(productivity_score(
            &snapshots.tasks,
            &snapshots.habits,
            today,
        )),
        ViewName::HabitWindows => ViewPayload::HabitWindows(
            snapshots
                .habits
                .iter()
                .map(|habit| HabitWindow {
                    habit_id: habit.id.clone(),
                    text: habit.text.clone(),
                    days: rolling_window(habit, today),
                })
                .collect(),
        ),
    }
}
