use mdnote_core::store::migrations::latest_version;
use mdnote_core::store::{SqliteNoteGateway, StoreUri};
use mdnote_core::StoreError;
use rusqlite::Connection;
use std::path::Path;

fn file_uri(path: &Path) -> StoreUri {
    StoreUri::parse(&format!("sqlite://{}", path.display())).unwrap()
}

#[test]
fn connect_creates_notes_collection_at_latest_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.db");

    SqliteNoteGateway::connect(&file_uri(&path))
        .unwrap()
        .disconnect()
        .unwrap();

    let conn = Connection::open(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = 'notes'
            );",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1);
}

#[test]
fn store_with_newer_schema_version_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = SqliteNoteGateway::connect(&file_uri(&path))
        .err()
        .expect("newer schema must be refused");
    match err {
        StoreError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn store_missing_collection_fields_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tampered.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(&format!(
        "CREATE TABLE notes (id TEXT PRIMARY KEY, title TEXT NOT NULL);
         PRAGMA user_version = {};",
        latest_version()
    ))
    .unwrap();
    drop(conn);

    let err = SqliteNoteGateway::connect(&file_uri(&path))
        .err()
        .expect("incomplete collection must be refused");
    assert!(matches!(
        err,
        StoreError::MissingField {
            collection: "notes",
            field: "tags"
        }
    ));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}
