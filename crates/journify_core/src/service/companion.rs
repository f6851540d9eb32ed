//! Companion facade consumed by the presentation layer.
//!
//! # Responsibility
//! - Open all five record stores over one shared adapter.
//! - Fan committed mutations out to subscribed listeners (`on_mutate`) until
//!   they unsubscribe.
//! - Assemble snapshot sets and compute derived views on demand.
//!
//! # Invariants
//! - Corrupt documents open as empty collections and are reported as
//!   `LoadWarning`s; adapter failures abort `open`.
//! - Listeners only ever see committed snapshots.

use crate::model::date::DayKey;
use crate::repo::collection::{
    Collection, CollectionName, CollectionSnapshot, HabitList, JournalEntries, MoodEntries,
    SliderMoodEntries, TaskList,
};
use crate::repo::record_store::{LoadWarning, MutationListener, RecordStore};
use crate::repo::StoreResult;
use crate::service::journal_service::JournalService;
use crate::service::mood_service::MoodService;
use crate::service::productivity_service::ProductivityService;
use crate::storage::KvStore;
use crate::views::{compute_view, SnapshotSet, ViewName, ViewPayload};
use log::info;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Handle returned by `Companion::subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(Subscription, Arc<dyn MutationListener>)>,
}

/// Listener set shared by every store of one companion.
#[derive(Default)]
struct ListenerRegistry {
    listeners: Mutex<Listeners>,
}

impl ListenerRegistry {
    fn lock(&self) -> MutexGuard<'_, Listeners> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, listener: Arc<dyn MutationListener>) -> Subscription {
        let mut listeners = self.lock();
        let subscription = Subscription(listeners.next_id);
        listeners.next_id += 1;
        listeners.entries.push((subscription, listener));
        subscription
    }

    fn remove(&self, subscription: Subscription) -> bool {
        let mut listeners = self.lock();
        let before = listeners.entries.len();
        listeners.entries.retain(|(id, _)| *id != subscription);
        listeners.entries.len() != before
    }
}

impl MutationListener for ListenerRegistry {
    fn on_mutate(&self, collection: CollectionName, snapshot: &CollectionSnapshot) {
        let listeners: Vec<_> = self
            .lock()
            .entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener.on_mutate(collection, snapshot);
        }
    }
}

/// Entry point owning every record store of one local profile.
pub struct Companion<S: KvStore + Clone> {
    journal: JournalService<S>,
    moods: MoodService<S>,
    productivity: ProductivityService<S>,
    registry: Arc<ListenerRegistry>,
}

/// Opened companion plus the warnings raised while loading it.
pub struct CompanionOpen<S: KvStore + Clone> {
    pub companion: Companion<S>,
    pub warnings: Vec<LoadWarning>,
}

impl<S: KvStore + Clone> Companion<S> {
    /// Opens all five collections from `kv`.
    pub fn open(kv: S) -> StoreResult<CompanionOpen<S>> {
        let registry = Arc::new(ListenerRegistry::default());
        let mut warnings = Vec::new();

        let journal = open_store::<JournalEntries, S>(&kv, &registry, &mut warnings)?;
        let moods = open_store::<MoodEntries, S>(&kv, &registry, &mut warnings)?;
        let slider_moods = open_store::<SliderMoodEntries, S>(&kv, &registry, &mut warnings)?;
        let tasks = open_store::<TaskList, S>(&kv, &registry, &mut warnings)?;
        let habits = open_store::<HabitList, S>(&kv, &registry, &mut warnings)?;

        info!(
            "event=companion_open module=service status=ok warnings={}",
            warnings.len()
        );

        Ok(CompanionOpen {
            companion: Self {
                journal: JournalService::new(journal),
                moods: MoodService::new(moods, slider_moods),
                productivity: ProductivityService::new(tasks, habits),
                registry,
            },
            warnings,
        })
    }

    /// Registers a listener for all future committed mutations.
    pub fn subscribe(&self, listener: Arc<dyn MutationListener>) -> Subscription {
        self.registry.push(listener)
    }

    /// Stops notifying the listener behind `subscription`.
    ///
    /// Returns `false` when it was already removed.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        self.registry.remove(subscription)
    }

    pub fn journal(&self) -> &JournalService<S> {
        &self.journal
    }

    pub fn moods(&self) -> &MoodService<S> {
        &self.moods
    }

    pub fn productivity(&self) -> &ProductivityService<S> {
        &self.productivity
    }

    /// Current committed snapshot of every collection.
    pub fn snapshot_set(&self) -> SnapshotSet {
        SnapshotSet {
            journal: self.journal.entries(),
            moods: self.moods.moods(),
            slider_moods: self.moods.slider_moods(),
            tasks: self.productivity.tasks(),
            habits: self.productivity.habits(),
        }
    }

    /// Latest snapshot of one collection.
    pub fn snapshot_of(&self, collection: CollectionName) -> CollectionSnapshot {
        match collection {
            CollectionName::Journal => CollectionSnapshot::Journal(self.journal.entries()),
            CollectionName::Moods => CollectionSnapshot::Moods(self.moods.moods()),
            CollectionName::SliderMoods => {
                CollectionSnapshot::SliderMoods(self.moods.slider_moods())
            }
            CollectionName::Tasks => CollectionSnapshot::Tasks(self.productivity.tasks()),
            CollectionName::Habits => CollectionSnapshot::Habits(self.productivity.habits()),
        }
    }

    pub fn compute_view(&self, view: ViewName, today: DayKey) -> ViewPayload {
        compute_view(view, &self.snapshot_set(), today)
    }

    /// Computes every view from one consistent snapshot set.
    pub fn dashboard(&self, today: DayKey) -> Vec<(ViewName, ViewPayload)> {
        let snapshots = self.snapshot_set();
        ViewName::ALL
            .into_iter()
            .map(|view| (view, compute_view(view, &snapshots, today)))
            .collect()
    }
}

fn open_store<C, S>(
    kv: &S,
    registry: &Arc<ListenerRegistry>,
    warnings: &mut Vec<LoadWarning>,
) -> StoreResult<RecordStore<C, S>>
where
    C: Collection,
    S: KvStore + Clone,
{
    let (store, warning) = RecordStore::<C, S>::open_or_recover(kv.clone())?;
    warnings.extend(warning);
    let listener: Arc<dyn MutationListener> = registry.clone();
    Ok(store.with_listener(listener))
}
