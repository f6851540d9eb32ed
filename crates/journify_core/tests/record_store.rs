use journify_core::{
    Collection, DayKey, DimensionalMood, Habit, HabitList, JournalEntries, KvStore,
    MemoryKvStore, MoodEntries, MoodSymbol, ReadFailure, RecordId, RecordStore,
    SliderMoodEntries, SqliteKvStore, StoreError, Task, TaskList,
};
use std::sync::Arc;

fn day(raw: &str) -> DayKey {
    DayKey::parse(raw).unwrap()
}

fn task(id: &str, text: &str, completed: bool) -> Task {
    Task {
        id: RecordId::from(id),
        text: text.to_string(),
        completed,
    }
}

fn roundtrip<C: Collection + std::fmt::Debug>(collection: &C) {
    let decoded = C::decode(&collection.encode().unwrap()).unwrap();
    assert_eq!(&decoded, collection);
}

#[test]
fn every_collection_roundtrips_including_empty() {
    roundtrip(&JournalEntries::default());
    roundtrip(&MoodEntries::default());
    roundtrip(&SliderMoodEntries::default());
    roundtrip(&TaskList::default());
    roundtrip(&HabitList::default());

    let journal: JournalEntries = [
        (day("2024-03-01"), "hello".to_string()),
        (day("2024-03-02"), String::new()),
    ]
    .into_iter()
    .collect();
    roundtrip(&journal);

    let moods: MoodEntries = MoodSymbol::ALL
        .into_iter()
        .enumerate()
        .map(|(offset, symbol)| (day("2024-03-10").days_before(offset as u64), symbol))
        .collect();
    roundtrip(&moods);

    let sliders: SliderMoodEntries = [(day("2024-03-01"), DimensionalMood::new(1, 5, 3).unwrap())]
        .into_iter()
        .collect();
    roundtrip(&sliders);

    let habit = Habit {
        id: RecordId::from("h1"),
        text: "walk".to_string(),
        completed_dates: [day("2024-03-10"), day("2024-03-12")].into_iter().collect(),
    };
    roundtrip(&[habit].into_iter().collect::<HabitList>());
}

#[test]
fn absent_document_loads_as_empty_collection() {
    let store = RecordStore::<TaskList, _>::open(MemoryKvStore::new()).unwrap();
    assert!(store.snapshot().is_empty());
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn remove_after_upsert_drops_key_and_absent_remove_is_noop() {
    let store = RecordStore::<JournalEntries, _>::open(MemoryKvStore::new()).unwrap();
    store.upsert(day("2024-03-01"), "a".to_string()).unwrap();
    store.upsert(day("2024-03-02"), "b".to_string()).unwrap();

    let after_remove = store.remove(&day("2024-03-01")).unwrap();
    assert!(!after_remove.contains(day("2024-03-01")));
    assert!(after_remove.contains(day("2024-03-02")));

    let after_noop = store.remove(&day("2024-01-01")).unwrap();
    assert_eq!(after_noop, after_remove);
}

#[test]
fn sequential_saves_to_same_date_keep_last_value() {
    let kv = Arc::new(SqliteKvStore::open_in_memory().unwrap());
    let store = RecordStore::<MoodEntries, _>::open(kv.clone()).unwrap();
    store.upsert(day("2024-03-01"), MoodSymbol::Sad).unwrap();
    store.upsert(day("2024-03-01"), MoodSymbol::Happy).unwrap();

    assert_eq!(store.snapshot().get(day("2024-03-01")), Some(&MoodSymbol::Happy));
    let reopened = RecordStore::<MoodEntries, _>::open(kv).unwrap();
    assert_eq!(reopened.snapshot().get(day("2024-03-01")), Some(&MoodSymbol::Happy));
}

#[test]
fn concurrent_upserts_never_lose_updates() {
    let kv = Arc::new(SqliteKvStore::open_in_memory().unwrap());
    let store = RecordStore::<JournalEntries, _>::open(kv.clone()).unwrap();
    let start = day("2024-01-01");

    std::thread::scope(|scope| {
        for worker in 0..4_u64 {
            let store = &store;
            scope.spawn(move || {
                for offset in 0..10_u64 {
                    let date = start.days_before(worker * 10 + offset);
                    store.upsert(date, format!("worker {worker}")).unwrap();
                }
            });
        }
    });

    assert_eq!(store.snapshot().len(), 40);
    let reopened = RecordStore::<JournalEntries, _>::open(kv).unwrap();
    assert_eq!(reopened.snapshot().len(), 40);
}

#[test]
fn state_persists_across_reopen_of_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journify.db");

    {
        let store = RecordStore::<TaskList, _>::open(SqliteKvStore::open(&path).unwrap()).unwrap();
        store.upsert(RecordId::from("b"), task("b", "second id, first row", false)).unwrap();
        store.upsert(RecordId::from("a"), task("a", "first id, second row", true)).unwrap();
    }

    let store = RecordStore::<TaskList, _>::open(SqliteKvStore::open(&path).unwrap()).unwrap();
    let ids: Vec<_> = store.snapshot().iter().map(|task| task.id.to_string()).collect();
    assert_eq!(ids, ["b", "a"]);
}

#[test]
fn corrupt_document_fails_open_with_storage_read() {
    let kv = MemoryKvStore::new().with_document("journalEntries", "{not json");
    let err = RecordStore::<JournalEntries, _>::open(kv).err().unwrap();
    assert!(matches!(
        err,
        StoreError::StorageRead {
            document: "journalEntries",
            failure: ReadFailure::Corrupt(_),
        }
    ));
    assert!(!err.is_retriable());
}

#[test]
fn open_or_recover_resets_corrupt_document_to_empty() {
    let kv = MemoryKvStore::new()
        .with_document(
            "sliderMoodEntries",
            r#"{"2024-03-01":{"tiredness":9,"happiness":1,"stress":1}}"#,
        );
    let (store, warning) = RecordStore::<SliderMoodEntries, _>::open_or_recover(kv).unwrap();
    assert!(store.snapshot().is_empty());
    assert_eq!(warning.unwrap().document, "sliderMoodEntries");
}

#[test]
fn validation_failure_never_reaches_storage() {
    let kv = Arc::new(MemoryKvStore::new());
    let store = RecordStore::<TaskList, _>::open(kv.clone()).unwrap();
    let err = store
        .upsert(RecordId::from("t"), task("t", "   ", false))
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(kv.read("tasks").unwrap(), None);
}

#[test]
fn failed_write_can_be_retried() {
    let kv = Arc::new(MemoryKvStore::new());
    let store = RecordStore::<JournalEntries, _>::open(kv.clone()).unwrap();

    kv.set_fail_writes(true);
    let err = store.upsert(day("2024-03-01"), "draft".to_string()).unwrap_err();
    assert!(err.is_retriable());
    assert!(store.snapshot().is_empty());

    kv.set_fail_writes(false);
    store.upsert(day("2024-03-01"), "draft".to_string()).unwrap();
    assert_eq!(store.snapshot().get(day("2024-03-01")).unwrap(), "draft");
}

#[test]
fn reset_deletes_document() {
    let kv = Arc::new(MemoryKvStore::new());
    let store = RecordStore::<JournalEntries, _>::open(kv.clone()).unwrap();
    store.upsert(day("2024-03-01"), "text".to_string()).unwrap();

    assert!(store.reset().unwrap().is_empty());
    assert_eq!(kv.read("journalEntries").unwrap(), None);
}
