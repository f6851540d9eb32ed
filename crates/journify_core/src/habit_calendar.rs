//! Habit calendar projector.
//!
//! # Responsibility
//! - Project a habit's sparse completed-day set onto the rolling 7-day window.
//! - Toggle completion for any calendar day without mutating the input.
//!
//! # Invariants
//! - The window is always 7 days, oldest (`today - 6`) first, `today` last.
//! - `toggle(toggle(habit, d), d) == habit` for every day `d`.

use crate::model::date::DayKey;
use crate::model::task::Habit;

/// Length of every rolling window, in days.
pub const WINDOW_DAYS: usize = 7;

/// One cell of a habit's rolling window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HabitDay {
    pub date: DayKey,
    pub completed: bool,
}

/// Returns the 7 days ending at `today`, oldest first.
pub fn window_dates(today: DayKey) -> [DayKey; WINDOW_DAYS] {
    std::array::from_fn(|index| today.days_before((WINDOW_DAYS - 1 - index) as u64))
}

/// Projects `habit` onto the 7-day window ending at `today`.
pub fn rolling_window(habit: &Habit, today: DayKey) -> [HabitDay; WINDOW_DAYS] {
    window_dates(today).map(|date| HabitDay {
        date,
        completed: habit.is_completed_on(date),
    })
}

/// Returns a copy of `habit` with completion for `date` flipped.
pub fn toggle(habit: &Habit, date: DayKey) -> Habit {
    let mut next = habit.clone();
    if !next.completed_dates.remove(&date) {
        next.completed_dates.insert(date);
    }
    next
}

/// Counts completions inside the window ending at `today`.
pub fn completions_in_window(habit: &Habit, today: DayKey) -> usize {
    let start = today.days_before((WINDOW_DAYS - 1) as u64);
    habit.completed_dates.range(start..=today).count()
}
