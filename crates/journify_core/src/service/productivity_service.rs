//! Task and habit use-case service.
//!
//! # Invariants
//! - New tasks and habits append to the end of their sequence.
//! - Editing an unknown id is `NotFound`; deleting one is a no-op.

use crate::habit_calendar;
use crate::model::date::DayKey;
use crate::model::task::{normalize_text, Habit, RecordId, Task};
use crate::repo::collection::{Collection, HabitList, TaskList};
use crate::repo::record_store::RecordStore;
use crate::repo::{StoreError, StoreResult};
use crate::storage::KvStore;

/// Facade over the task and habit stores.
pub struct ProductivityService<S: KvStore> {
    tasks: RecordStore<TaskList, S>,
    habits: RecordStore<HabitList, S>,
}

impl<S: KvStore> ProductivityService<S> {
    pub fn new(tasks: RecordStore<TaskList, S>, habits: RecordStore<HabitList, S>) -> Self {
        Self { tasks, habits }
    }

    /// Creates an open task and returns its id with the new snapshot.
    pub fn add_task(&self, text: &str) -> StoreResult<(RecordId, TaskList)> {
        let task = Task::new(text)?;
        let id = task.id.clone();
        let snapshot = self.tasks.upsert(id.clone(), task)?;
        Ok((id, snapshot))
    }

    pub fn set_task_completed(&self, id: &RecordId, completed: bool) -> StoreResult<TaskList> {
        self.edit_task(id, |task| {
            let changed = task.completed != completed;
            task.completed = completed;
            Ok(changed)
        })
    }

    pub fn toggle_task(&self, id: &RecordId) -> StoreResult<TaskList> {
        self.edit_task(id, |task| {
            task.completed = !task.completed;
            Ok(true)
        })
    }

    pub fn rename_task(&self, id: &RecordId, text: &str) -> StoreResult<TaskList> {
        let text = normalize_text(text)?;
        self.edit_task(id, |task| {
            let changed = task.text != text;
            task.text = text;
            Ok(changed)
        })
    }

    pub fn delete_task(&self, id: &RecordId) -> StoreResult<TaskList> {
        self.tasks.remove(id)
    }

    /// Creates a habit with no completed days.
    pub fn add_habit(&self, text: &str) -> StoreResult<(RecordId, HabitList)> {
        let habit = Habit::new(text)?;
        let id = habit.id.clone();
        let snapshot = self.habits.upsert(id.clone(), habit)?;
        Ok((id, snapshot))
    }

    pub fn rename_habit(&self, id: &RecordId, text: &str) -> StoreResult<HabitList> {
        let text = normalize_text(text)?;
        self.edit_habit(id, |habit| {
            let changed = habit.text != text;
            habit.text = text;
            Ok(changed)
        })
    }

    /// Flips completion of habit `id` on the date string `date`.
    pub fn toggle_habit(&self, id: &RecordId, date: &str) -> StoreResult<HabitList> {
        let date = DayKey::parse_input(date)?;
        self.edit_habit(id, |habit| {
            *habit = habit_calendar::toggle(habit, date);
            Ok(true)
        })
    }

    pub fn delete_habit(&self, id: &RecordId) -> StoreResult<HabitList> {
        self.habits.remove(id)
    }

    pub fn tasks(&self) -> TaskList {
        self.tasks.snapshot()
    }

    pub fn habits(&self) -> HabitList {
        self.habits.snapshot()
    }

    fn edit_task(
        &self,
        id: &RecordId,
        edit: impl FnOnce(&mut Task) -> StoreResult<bool>,
    ) -> StoreResult<TaskList> {
        self.tasks.update(|tasks| {
            let mut task = tasks
                .get(id)
                .cloned()
                .ok_or_else(|| not_found(TaskList::NAME.document_key(), id))?;
            if !edit(&mut task)? {
                return Ok(false);
            }
            tasks.upsert_record(id.clone(), task)?;
            Ok(true)
        })
    }

    fn edit_habit(
        &self,
        id: &RecordId,
        edit: impl FnOnce(&mut Habit) -> StoreResult<bool>,
    ) -> StoreResult<HabitList> {
        self.habits.update(|habits| {
            let mut habit = habits
                .get(id)
                .cloned()
                .ok_or_else(|| not_found(HabitList::NAME.document_key(), id))?;
            if !edit(&mut habit)? {
                return Ok(false);
            }
            habits.upsert_record(id.clone(), habit)?;
            Ok(true)
        })
    }
}

fn not_found(document: &'static str, id: &RecordId) -> StoreError {
    StoreError::NotFound {
        document,
        key: id.to_string(),
    }
}
