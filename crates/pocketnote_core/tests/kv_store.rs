use pocketnote_core::storage::migrations::latest_version;
use pocketnote_core::{KeyValueStore, MemoryKvStore, SqliteKvStore};

#[test]
fn get_returns_none_for_unknown_keys() {
    let kv = SqliteKvStore::open_in_memory().unwrap();
    assert_eq!(kv.get("missing").unwrap(), None);
}

#[test]
fn set_overwrites_previous_value_completely() {
    let mut kv = SqliteKvStore::open_in_memory().unwrap();
    kv.set("notes", "[1]").unwrap();
    kv.set("notes", "[1,2]").unwrap();
    assert_eq!(kv.get("notes").unwrap().as_deref(), Some("[1,2]"));
}

#[test]
fn keys_are_independent() {
    let mut kv = SqliteKvStore::open_in_memory().unwrap();
    kv.set("notes", "[]").unwrap();
    kv.set("settings", "{}").unwrap();
    assert_eq!(kv.get("notes").unwrap().as_deref(), Some("[]"));
    assert_eq!(kv.get("settings").unwrap().as_deref(), Some("{}"));
}

#[test]
fn open_applies_migrations_and_mirrors_user_version() {
    let kv = SqliteKvStore::open_in_memory().unwrap();
    let version: u32 = kv
        .connection()
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());
    assert!(latest_version() >= 1);
}

#[test]
fn file_backed_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("kv.sqlite3");

    {
        let mut kv = SqliteKvStore::open(&db_path).unwrap();
        kv.set("notes", r#"[{"fake":"payload"}]"#).unwrap();
    }

    let kv = SqliteKvStore::open(&db_path).unwrap();
    assert_eq!(
        kv.get("notes").unwrap().as_deref(),
        Some(r#"[{"fake":"payload"}]"#)
    );
}

#[test]
fn newer_schema_versions_are_rejected_not_downgraded() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("future.sqlite3");

    {
        let kv = SqliteKvStore::open(&db_path).unwrap();
        kv.connection()
            .execute_batch("PRAGMA user_version = 9999;")
            .unwrap();
    }

    assert!(SqliteKvStore::open(&db_path).is_err());
}

#[test]
fn memory_kv_matches_the_contract() {
    let mut kv = MemoryKvStore::new();
    assert_eq!(kv.get("notes").unwrap(), None);
    kv.set("notes", "[]").unwrap();
    kv.set("notes", "[7]").unwrap();
    assert_eq!(kv.get("notes").unwrap().as_deref(), Some("[7]"));
}
