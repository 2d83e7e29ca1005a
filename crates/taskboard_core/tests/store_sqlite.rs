use rusqlite::Connection;
use taskboard_core::store::migrations::latest_version;
use taskboard_core::store::{open_store, open_store_in_memory};
use taskboard_core::{KeyValueStore, StoreError};

#[test]
fn open_in_memory_applies_all_migrations() {
    let store = open_store_in_memory().unwrap();
    assert_eq!(schema_version(store.connection()), latest_version());

    let exists: i64 = store
        .connection()
        .query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv_entries'
            );",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1);
}

#[test]
fn set_overwrites_and_remove_is_idempotent() {
    let store = open_store_in_memory().unwrap();

    assert_eq!(store.get("todoProjects").unwrap(), None);
    store.set("todoProjects", "one").unwrap();
    store.set("todoProjects", "two").unwrap();
    assert_eq!(store.get("todoProjects").unwrap().as_deref(), Some("two"));

    let rows: i64 = store
        .connection()
        .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);

    store.remove("todoProjects").unwrap();
    store.remove("todoProjects").unwrap();
    assert_eq!(store.get("todoProjects").unwrap(), None);
}

#[test]
fn values_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.sqlite3");

    let store = open_store(&path).unwrap();
    store.set("k", "persisted").unwrap();
    drop(store);

    let reopened = open_store(&path).unwrap();
    assert_eq!(reopened.get("k").unwrap().as_deref(), Some("persisted"));
    assert_eq!(schema_version(reopened.connection()), latest_version());
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_store(&path) {
        Err(StoreError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        }) => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected unsupported schema version"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}
