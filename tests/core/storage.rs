//! Document store integration tests
//!
//! Covers snapshot round-trips on disk, concurrent writers and
//! checkpointing through the public API.

use crate::common::{hamsun_books, payload, BOOKS_SNAPSHOT};
use folk::core::error::FolkError;
use folk::core::storage::{Checkpointer, DocumentStore};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_create_get_roundtrip() {
    let store = DocumentStore::new();
    for json in hamsun_books() {
        let id = store.create(payload(json)).unwrap();
        assert_eq!(store.get(id).unwrap().get(), json);
    }
    assert_eq!(store.size(), 2);
}

#[test]
fn test_dump_load_dump_is_byte_identical() {
    let temp_dir = TempDir::new().unwrap();
    let first = temp_dir.path().join("first.db");
    let second = temp_dir.path().join("second.db");

    let store = DocumentStore::new();
    for json in hamsun_books() {
        store.create(payload(json)).unwrap();
    }
    store.dump(&first).unwrap();

    let reloaded = DocumentStore::from_file(&first).unwrap();
    reloaded.dump(&second).unwrap();

    let first_bytes = fs::read(&first).unwrap();
    assert_eq!(first_bytes, fs::read(&second).unwrap());
    assert_eq!(first_bytes, BOOKS_SNAPSHOT.as_bytes());
}

#[test]
fn test_load_preserves_ids_and_reseeds_counter() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("folk.db");
    fs::write(&path, r#"[{"ID":7,"Data":{"Title":"Pan"}},{"ID":3,"Data":{"Title":"Sult"}}]"#)
        .unwrap();

    let store = DocumentStore::from_file(&path).unwrap();
    assert_eq!(store.ids(), vec![3, 7]);
    assert_eq!(store.get(7).unwrap().get(), r#"{"Title":"Pan"}"#);
    assert_eq!(store.create(payload("{}")).unwrap(), 8);
}

#[test]
fn test_load_null_snapshot_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("folk.db");
    fs::write(&path, "null").unwrap();

    let store = DocumentStore::from_file(&path).unwrap();
    assert_eq!(store.size(), 0);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = DocumentStore::from_file(temp_dir.path().join("absent.db")).unwrap_err();
    assert!(matches!(err, FolkError::IoError(_)));
}

#[test]
fn test_load_truncated_snapshot_commits_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("folk.db");
    fs::write(&path, &BOOKS_SNAPSHOT[..BOOKS_SNAPSHOT.len() - 10]).unwrap();

    let store = DocumentStore::new();
    let err = store.load(&path).unwrap_err();
    assert!(matches!(err, FolkError::MalformedSnapshot(_)));
    assert_eq!(store.size(), 0);
    assert_eq!(store.last_id(), 0);
}

#[test]
fn test_delete_then_get_is_not_found() {
    let store = DocumentStore::new();
    let id = store.create(payload(hamsun_books()[0])).unwrap();

    assert!(store.del(id));
    assert!(store.get(id).unwrap_err().is_not_found());
    assert!(!store.del(id));
    assert_eq!(store.size(), 0);
}

#[test]
fn test_get_several_skips_deleted() {
    let store = DocumentStore::new();
    let sult = store.create(payload(hamsun_books()[0])).unwrap();
    let pan = store.create(payload(hamsun_books()[1])).unwrap();
    store.del(sult);

    let json = store.get_several(&[sult, pan]).unwrap();
    assert_eq!(
        json,
        format!(r#"[{{"ID":{pan},"Data":{}}}]"#, hamsun_books()[1])
    );
}

#[test]
fn test_concurrent_sets_on_one_id() {
    let store = Arc::new(DocumentStore::new());
    let id = store.create(payload("0")).unwrap();

    let handles: Vec<_> = (1..=16)
        .map(|n| {
            let store = store.clone();
            std::thread::spawn(move || {
                for _ in 0..50 {
                    store.set(id, payload(&n.to_string()));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.size(), 1);
    let value: i64 = store.get(id).unwrap().get().parse().unwrap();
    assert!((1..=16).contains(&value), "unexpected payload {value}");
}

#[test]
fn test_concurrent_creates_and_deletes() {
    let store = Arc::new(DocumentStore::new());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = store.clone();
            std::thread::spawn(move || {
                let mut kept = 0;
                for i in 0..100 {
                    let id = store.create(payload("{}")).unwrap();
                    if i % 2 == 0 {
                        assert!(store.del(id));
                    } else {
                        kept += 1;
                    }
                }
                kept
            })
        })
        .collect();

    let kept: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(store.size(), kept);
    assert_eq!(store.last_id(), 800);
}

#[test]
fn test_readers_never_see_torn_state() {
    let store = Arc::new(DocumentStore::new());
    let writer = {
        let store = store.clone();
        std::thread::spawn(move || {
            for _ in 0..500 {
                let id = store.create(payload("{}")).unwrap();
                store.del(id);
            }
        })
    };

    for _ in 0..500 {
        let all: serde_json::Value = serde_json::from_str(&store.all().unwrap()).unwrap();
        assert!(all.as_array().unwrap().len() <= 1);
    }
    writer.join().unwrap();
}

#[test]
fn test_checkpointer_writes_loadable_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data").join("folk.db");
    let store = Arc::new(DocumentStore::new());
    let checkpointer = Checkpointer::new(store.clone(), &path, 2);

    for json in hamsun_books() {
        store.create(payload(json)).unwrap();
        checkpointer.record_mutation();
    }

    assert_eq!(fs::read_to_string(&path).unwrap(), BOOKS_SNAPSHOT);
}
