use chrono::NaiveDate;
use companion_core::db::{open_db, open_db_in_memory};
use companion_core::{
    FixedClock, ProgressStore, SqliteProgressStore, StoreError, StreakTracker, PROGRESS_KEY,
};
use rusqlite::Connection;

#[test]
fn sqlite_store_reads_last_written_value() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteProgressStore::try_new(&conn).unwrap();

    assert_eq!(store.read(PROGRESS_KEY).unwrap(), None);
    store.write(PROGRESS_KEY, "first").unwrap();
    store.write(PROGRESS_KEY, "second").unwrap();
    assert_eq!(store.read(PROGRESS_KEY).unwrap().as_deref(), Some("second"));

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM progress_store;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn sqlite_store_delete_removes_record() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteProgressStore::try_new(&conn).unwrap();

    store.write(PROGRESS_KEY, "{}").unwrap();
    store.delete(PROGRESS_KEY).unwrap();
    assert_eq!(store.read(PROGRESS_KEY).unwrap(), None);
    store.delete(PROGRESS_KEY).unwrap();
}

#[test]
fn sqlite_store_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteProgressStore::try_new(&conn).err().unwrap();
    assert!(matches!(err, StoreError::Unavailable(_)));
}

#[test]
fn tracker_progress_survives_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("companion.sqlite3");
    let day = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();

    {
        let conn = open_db(&path).unwrap();
        let store = SqliteProgressStore::try_new(&conn).unwrap();
        let mut tracker = StreakTracker::new(store, FixedClock(day));
        assert!(tracker.record_practice("Nutrition in Plants").is_saved());
    }

    let conn = open_db(&path).unwrap();
    let store = SqliteProgressStore::try_new(&conn).unwrap();
    let mut tracker = StreakTracker::new(store, FixedClock(day));
    assert_eq!(
        tracker.study_history(),
        ["Nutrition in Plants".to_string()].as_slice()
    );
    assert_eq!(tracker.streak(), 1);

    assert!(tracker.reset_progress().is_saved());
    assert_eq!(tracker.store().read(PROGRESS_KEY).unwrap(), None);
}
