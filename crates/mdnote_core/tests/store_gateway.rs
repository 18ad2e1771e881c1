use mdnote_core::store::{SqliteNoteGateway, StoreUri};
use mdnote_core::{Note, NoteGateway};
use std::path::Path;

fn memory_gateway() -> SqliteNoteGateway {
    SqliteNoteGateway::connect(&StoreUri::parse("sqlite::memory:").unwrap()).unwrap()
}

fn file_uri(path: &Path) -> StoreUri {
    StoreUri::parse(&format!("sqlite://{}", path.display())).unwrap()
}

#[test]
fn insert_roundtrip_preserves_title_tag_order_and_bytes() {
    let gateway = memory_gateway();
    let content = vec![0x23, 0x20, 0x54, 0x0a, 0x00, 0xff, 0xfe];
    let note = Note::new("T", vec!["A".to_string(), "B".to_string()]).with_content(content);

    assert!(gateway.insert_note(&note));

    let stored = gateway.find_by_title("T").unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].note, note);
    assert!(stored[0].created_at > 0);
}

#[test]
fn count_by_title_is_exact_and_case_sensitive() {
    let gateway = memory_gateway();
    assert_eq!(gateway.count_by_title("Existing").unwrap(), 0);

    let note = Note::new("Existing", vec!["X".to_string()]).with_content(b"x".to_vec());
    assert!(gateway.insert_note(&note));

    assert_eq!(gateway.count_by_title("Existing").unwrap(), 1);
    assert_eq!(gateway.count_by_title("existing").unwrap(), 0);
    assert_eq!(gateway.count_by_title("Existing ").unwrap(), 0);
}

#[test]
fn repeated_tags_are_stored_as_entered() {
    let gateway = memory_gateway();
    let note = Note::new(
        "Dupes",
        vec!["X".to_string(), "Y".to_string(), "X".to_string()],
    )
    .with_content(Vec::new());
    assert!(gateway.insert_note(&note));

    let stored = gateway.find_by_title("Dupes").unwrap();
    assert_eq!(stored[0].note.tags, vec!["X", "Y", "X"]);
}

#[test]
fn invalid_note_insert_reports_false() {
    let gateway = memory_gateway();
    let note = Note::new("", vec!["A".to_string()]).with_content(b"body".to_vec());

    assert!(!gateway.insert_note(&note));
    assert_eq!(gateway.count_by_title("").unwrap(), 0);
}

#[test]
fn file_store_persists_across_reconnects() {
    let dir = tempfile::tempdir().unwrap();
    let uri = file_uri(&dir.path().join("notes.db"));

    let first = SqliteNoteGateway::connect(&uri).unwrap();
    let note = Note::new("Persisted", vec!["KEEP".to_string()]).with_content(b"# kept".to_vec());
    assert!(first.insert_note(&note));
    first.disconnect().unwrap();

    let second = SqliteNoteGateway::connect(&uri).unwrap();
    assert_eq!(second.count_by_title("Persisted").unwrap(), 1);
    second.disconnect().unwrap();
}

#[test]
fn connect_fails_when_store_directory_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let uri = file_uri(&dir.path().join("missing").join("notes.db"));

    assert!(SqliteNoteGateway::connect(&uri).is_err());
}
