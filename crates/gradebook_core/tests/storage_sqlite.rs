use gradebook_core::storage::migrations::latest_version;
use gradebook_core::{
    GradebookStore, SqliteStorage, StorageAdapter, StorageError, DEFAULT_DB_FILE_NAME,
    SCORE_DATA_KEY,
};
use rusqlite::Connection;

#[test]
fn absent_key_reads_as_none() {
    let storage = SqliteStorage::open_in_memory().unwrap();
    assert_eq!(storage.get(SCORE_DATA_KEY).unwrap(), None);
}

#[test]
fn set_then_get_round_trips() {
    let mut storage = SqliteStorage::open_in_memory().unwrap();
    storage.set(SCORE_DATA_KEY, r#"{"Math":["","",""]}"#).unwrap();

    assert_eq!(
        storage.get(SCORE_DATA_KEY).unwrap().as_deref(),
        Some(r#"{"Math":["","",""]}"#)
    );
}

#[test]
fn set_overwrites_the_whole_value() {
    let mut storage = SqliteStorage::open_in_memory().unwrap();
    storage.set("k", "first").unwrap();
    storage.set("k", "second").unwrap();

    assert_eq!(storage.get("k").unwrap().as_deref(), Some("second"));
}

#[test]
fn documents_survive_reopening_the_same_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_DB_FILE_NAME);

    {
        let mut store = GradebookStore::load(SqliteStorage::open(&path).unwrap());
        store.add_row("Math");
        store.update_row("Math", 0, "72");
        store.delete_row("Physics");
    }

    let reloaded = GradebookStore::load(SqliteStorage::open(&path).unwrap());
    assert_eq!(reloaded.list_active_rows()[0].total, 72);
    assert!(reloaded.is_deleted("Physics"));
}

#[test]
fn migrations_apply_once_and_are_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_DB_FILE_NAME);

    drop(SqliteStorage::open(&path).unwrap());
    drop(SqliteStorage::open(&path).unwrap());

    let conn = Connection::open(&path).unwrap();
    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());
}

#[test]
fn newer_schema_versions_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_DB_FILE_NAME);

    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch("PRAGMA user_version = 99;").unwrap();
    }

    let result = SqliteStorage::open(&path);
    assert!(matches!(
        result,
        Err(StorageError::UnsupportedSchemaVersion {
            db_version: 99,
            ..
        })
    ));
}
