//! Combined task + habit productivity score.

use crate::habit_calendar::{completions_in_window, WINDOW_DAYS};
use crate::model::date::DayKey;
use crate::repo::collection::{Collection, HabitList, TaskList};

/// Returns the productivity score in `0..=100`.
///
/// Task and habit halves each weigh 50%; an empty collection contributes 0 to
/// its half instead of being dropped from the average.
pub fn productivity_score(tasks: &TaskList, habits: &HabitList, today: DayKey) -> u8 {
    let combined = (task_ratio(tasks) + habit_ratio(habits, today)) / 2.0;
    let score = (combined * 100.0).round().clamp(0.0, 100.0);
    // Clamped to 0..=100 above, so the cast cannot truncate.
    score as u8
}

/// Share of completed tasks, 0 when there are none.
pub fn task_ratio(tasks: &TaskList) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    let completed = tasks.iter().filter(|task| task.completed).count();
    completed as f64 / tasks.len() as f64
}

/// Mean share of the last 7 days each habit was completed, 0 when there are none.
pub fn habit_ratio(habits: &HabitList, today: DayKey) -> f64 {
    if habits.is_empty() {
        return 0.0;
    }
    let total: f64 = habits
        .iter()
        .map(|habit| completions_in_window(habit, today) as f64 / WINDOW_DAYS as f64)
        .sum();
    total / habits.len() as f64
}
