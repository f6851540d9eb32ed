use journify_core::{
    Collection, CollectionName, CollectionSnapshot, Companion, DayKey, KvStore, MemoryKvStore,
    MoodSymbol, MutationListener, RecordId, SqliteKvStore, StoreError, ValidationError, ViewName,
    ViewPayload,
};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<(CollectionName, usize)>>,
}

impl MutationListener for Recorder {
    fn on_mutate(&self, collection: CollectionName, snapshot: &CollectionSnapshot) {
        assert_eq!(snapshot.name(), collection);
        self.events.lock().unwrap().push((collection, snapshot.len()));
    }
}

fn day(raw: &str) -> DayKey {
    DayKey::parse(raw).unwrap()
}

#[test]
fn committed_mutations_notify_listeners_and_failures_do_not() {
    let kv = Arc::new(MemoryKvStore::new());
    let companion = Companion::open(kv.clone()).unwrap().companion;
    let recorder = Arc::new(Recorder::default());
    companion.subscribe(recorder.clone());

    companion.journal().save_entry("2024-03-01", "hello").unwrap();
    companion.moods().set_mood("2024-03-01", MoodSymbol::Calm).unwrap();

    kv.set_fail_writes(true);
    let err = companion.journal().save_entry("2024-03-02", "lost").unwrap_err();
    assert!(err.is_retriable());
    assert!(!companion.journal().has_entry(day("2024-03-02")));

    let events = recorder.events.lock().unwrap().clone();
    assert_eq!(
        events,
        [(CollectionName::Journal, 1), (CollectionName::Moods, 1)]
    );
}

#[test]
fn unsubscribed_listeners_stop_receiving_mutations() {
    let companion = Companion::open(Arc::new(MemoryKvStore::new()))
        .unwrap()
        .companion;
    let kept = Arc::new(Recorder::default());
    let dropped = Arc::new(Recorder::default());
    companion.subscribe(kept.clone());
    let subscription = companion.subscribe(dropped.clone());

    companion.journal().save_entry("2024-03-01", "one").unwrap();
    assert!(companion.unsubscribe(subscription));
    assert!(!companion.unsubscribe(subscription));
    companion.journal().save_entry("2024-03-02", "two").unwrap();

    assert_eq!(kept.events.lock().unwrap().len(), 2);
    assert_eq!(
        dropped.events.lock().unwrap().clone(),
        [(CollectionName::Journal, 1)]
    );
}

#[test]
fn corrupt_documents_open_empty_with_warnings() {
    let kv = Arc::new(
        MemoryKvStore::new()
            .with_document("moodEntries", r#"{"2024-03-01":"🦄"}"#)
            .with_document("tasks", "[{\"id\":\"1\"}]")
            .with_document("journalEntries", r#"{"2024-03-01":"kept"}"#),
    );
    let opened = Companion::open(kv).unwrap();

    let documents: Vec<_> = opened.warnings.iter().map(|warning| warning.document).collect();
    assert_eq!(documents, ["moodEntries", "tasks"]);
    assert!(opened.companion.moods().moods().is_empty());
    assert_eq!(opened.companion.journal().entry_for(day("2024-03-01")), "kept");
}

#[test]
fn task_and_habit_flow_drives_productivity_score() {
    let kv = Arc::new(SqliteKvStore::open_in_memory().unwrap());
    let companion = Companion::open(kv.clone()).unwrap().companion;
    let productivity = companion.productivity();

    let (first, _) = productivity.add_task("  write report ").unwrap();
    let (second, tasks) = productivity.add_task("call mom").unwrap();
    assert_eq!(tasks.as_slice()[0].id, first);
    assert_eq!(tasks.as_slice()[0].text, "write report");
    productivity.toggle_task(&first).unwrap();

    let (habit, _) = productivity.add_habit("stretch").unwrap();
    for date in ["2024-03-08", "2024-03-09", "2024-03-10", "2024-03-11", "2024-03-12"] {
        productivity.toggle_habit(&habit, date).unwrap();
    }
    productivity.toggle_habit(&habit, "2024-03-12").unwrap();
    productivity.toggle_habit(&habit, "2024-03-12").unwrap();

    // tasks 1/2, habit 5/7 -> round((0.5 + 0.714..) / 2 * 100) = 61
    let today = day("2024-03-12");
    assert_eq!(
        companion.compute_view(ViewName::ProductivityScore, today),
        ViewPayload::ProductivityScore(61)
    );

    productivity.delete_task(&second).unwrap();
    productivity.delete_task(&second).unwrap();
    assert_eq!(productivity.tasks().len(), 1);

    let reopened = Companion::open(kv).unwrap().companion;
    assert_eq!(reopened.snapshot_set(), companion.snapshot_set());
}

#[test]
fn edits_validate_input_and_report_unknown_ids() {
    let companion = Companion::open(Arc::new(MemoryKvStore::new()))
        .unwrap()
        .companion;
    let productivity = companion.productivity();

    assert!(matches!(
        productivity.add_task("   ").unwrap_err(),
        StoreError::Validation(ValidationError::EmptyText)
    ));
    assert!(matches!(
        productivity.toggle_task(&RecordId::from("ghost")).unwrap_err(),
        StoreError::NotFound { document: "tasks", .. }
    ));

    let (habit, _) = productivity.add_habit("read").unwrap();
    assert!(matches!(
        productivity.toggle_habit(&habit, "2024-13-01").unwrap_err(),
        StoreError::Validation(ValidationError::InvalidDate(_))
    ));
    productivity.rename_habit(&habit, "read 10 pages").unwrap();
    assert_eq!(productivity.habits().get(&habit).unwrap().text, "read 10 pages");
}

#[test]
fn slider_moods_require_all_dimensions_in_range() {
    let kv = Arc::new(MemoryKvStore::new());
    let companion = Companion::open(kv.clone()).unwrap().companion;
    let moods = companion.moods();

    assert!(matches!(
        moods.set_slider_mood("2024-03-12", 3, 6, 2).unwrap_err(),
        StoreError::Validation(ValidationError::DimensionOutOfRange { .. })
    ));
    assert_eq!(kv.read("sliderMoodEntries").unwrap(), None);

    moods.set_slider_mood("2024-03-12", 3, 5, 1).unwrap();
    let ViewPayload::WeeklySliderMood(series) =
        companion.compute_view(ViewName::WeeklySliderMood, day("2024-03-12"))
    else {
        panic!("unexpected payload");
    };
    assert!((series.scores[6] - 3.0).abs() < f64::EPSILON);
}

#[test]
fn dashboard_covers_every_view() {
    let companion = Companion::open(Arc::new(MemoryKvStore::new()))
        .unwrap()
        .companion;
    companion.moods().set_mood("2024-03-12", MoodSymbol::Happy).unwrap();
    companion.moods().set_mood("2024-03-11", MoodSymbol::Happy).unwrap();

    let dashboard = companion.dashboard(day("2024-03-12"));
    assert_eq!(dashboard.len(), ViewName::ALL.len());
    let streak = dashboard
        .iter()
        .find(|(view, _)| *view == ViewName::CurrentStreak)
        .map(|(_, payload)| payload.clone());
    assert_eq!(streak, Some(ViewPayload::CurrentStreak(2)));
}

#[test]
fn moods_can_be_read_back_and_cleared() {
    let companion = Companion::open(Arc::new(MemoryKvStore::new()))
        .unwrap()
        .companion;
    let moods = companion.moods();
    let today = day("2024-03-12");

    assert_eq!(moods.mood_on(today), None);
    moods.set_mood(" 2024-03-12 ", MoodSymbol::Excited).unwrap();
    assert_eq!(moods.mood_on(today), Some(MoodSymbol::Excited));
    moods.clear_mood("2024-03-12").unwrap();
    assert_eq!(moods.mood_on(today), None);
    moods.clear_mood("2024-03-12").unwrap();

    assert_eq!(moods.slider_mood_on(today), None);
    moods.set_slider_mood("2024-03-12", 2, 4, 3).unwrap();
    let saved = moods.slider_mood_on(today).unwrap();
    assert_eq!(
        (saved.tiredness(), saved.happiness(), saved.stress()),
        (2, 4, 3)
    );
    moods.clear_slider_mood("2024-03-12").unwrap();
    assert_eq!(moods.slider_mood_on(today), None);
    assert!(moods.slider_moods().is_empty());
}

#[test]
fn task_completion_and_rename_follow_edit_rules() {
    let kv = Arc::new(MemoryKvStore::new());
    let companion = Companion::open(kv.clone()).unwrap().companion;
    let productivity = companion.productivity();
    let (id, _) = productivity.add_task("draft").unwrap();

    productivity.set_task_completed(&id, true).unwrap();
    assert!(productivity.tasks().get(&id).unwrap().completed);

    // Unchanged edits skip the write, so they succeed even when writes fail.
    kv.set_fail_writes(true);
    let tasks = productivity.set_task_completed(&id, true).unwrap();
    assert!(tasks.get(&id).unwrap().completed);
    assert!(productivity.rename_task(&id, " draft ").is_ok());
    assert!(productivity.rename_task(&id, "final").unwrap_err().is_retriable());
    kv.set_fail_writes(false);

    let tasks = productivity.rename_task(&id, "  final ").unwrap();
    assert_eq!(tasks.get(&id).unwrap().text, "final");
    assert!(matches!(
        productivity.rename_task(&id, "   ").unwrap_err(),
        StoreError::Validation(ValidationError::EmptyText)
    ));
    assert!(matches!(
        productivity
            .rename_task(&RecordId::from("ghost"), "text")
            .unwrap_err(),
        StoreError::NotFound { document: "tasks", .. }
    ));
    assert!(matches!(
        productivity
            .set_task_completed(&RecordId::from("ghost"), false)
            .unwrap_err(),
        StoreError::NotFound { .. }
    ));

    let (habit, _) = productivity.add_habit("walk").unwrap();
    productivity.delete_habit(&habit).unwrap();
    assert!(productivity.habits().is_empty());
    productivity.delete_habit(&habit).unwrap();
}

#[test]
fn snapshot_of_matches_each_collection() {
    let companion = Companion::open(Arc::new(MemoryKvStore::new()))
        .unwrap()
        .companion;
    companion.journal().save_entry("2024-03-01", "hello").unwrap();
    companion.productivity().add_habit("stretch").unwrap();

    for collection in CollectionName::ALL {
        let snapshot = companion.snapshot_of(collection);
        assert_eq!(snapshot.name(), collection);
        let expected = match collection {
            CollectionName::Journal | CollectionName::Habits => 1,
            _ => 0,
        };
        assert_eq!(snapshot.len(), expected, "{collection}");
    }
    assert_eq!(
        companion.snapshot_of(CollectionName::Journal),
        CollectionSnapshot::Journal(companion.journal().entries())
    );
}
