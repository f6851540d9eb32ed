//! Mood-derived views: weekly series, streak, histogram, calendar marks.
//!
//! # Invariants
//! - Weekly series are always 7 points, oldest first, `today` last.
//! - The streak walks backward one calendar day at a time from `today`.

use crate::habit_calendar::{window_dates, WINDOW_DAYS};
use crate::model::date::DayKey;
use crate::model::mood::{DimensionalMood, MoodSymbol};
use crate::repo::collection::{DatedEntries, MoodEntries};
use std::collections::BTreeMap;

/// Mood value that can be charted on the weekly series.
pub trait MoodScore {
    fn weekly_score(&self) -> f64;
}

impl MoodScore for MoodSymbol {
    fn weekly_score(&self) -> f64 {
        f64::from(self.score())
    }
}

impl MoodScore for DimensionalMood {
    fn weekly_score(&self) -> f64 {
        self.mean()
    }
}

/// Last 7 calendar days of mood scores; days without a mood score 0.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklySeries {
    pub dates: [DayKey; WINDOW_DAYS],
    /// Weekday abbreviations, e.g. `Mon`.
    pub labels: [String; WINDOW_DAYS],
    pub scores: [f64; WINDOW_DAYS],
}

pub fn weekly_series<V: MoodScore>(moods: &DatedEntries<V>, today: DayKey) -> WeeklySeries {
    let dates = window_dates(today);
    WeeklySeries {
        dates,
        labels: dates.map(DayKey::weekday_label),
        scores: dates.map(|date| moods.get(date).map_or(0.0, MoodScore::weekly_score)),
    }
}

/// Counts consecutive days with a mood, from `today` backward.
pub fn current_streak<V>(moods: &DatedEntries<V>, today: DayKey) -> u32 {
    let mut streak = 0_u32;
    let mut cursor = today;
    while moods.contains(cursor) {
        streak += 1;
        let previous = cursor.days_before(1);
        if previous == cursor {
            break;
        }
        cursor = previous;
    }
    streak
}

/// Counts how often each symbol was logged; symbols never logged are absent.
pub fn mood_histogram(moods: &MoodEntries) -> BTreeMap<MoodSymbol, usize> {
    let mut counts = BTreeMap::new();
    for (_, symbol) in moods.iter() {
        *counts.entry(*symbol).or_insert(0) += 1;
    }
    counts
}

/// Dates carrying a mood, ascending, for calendar decoration.
pub fn marked_dates<V>(moods: &DatedEntries<V>) -> Vec<DayKey> {
    moods.dates().collect()
}
