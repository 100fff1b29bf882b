//! Record store error-message, atomic-write-safety, and init integration tests.
//! Layout: ~/.plunk/tutorials/<key>.yaml

use assert_fs::prelude::*;
use plunk_core::{
    store::{self, TutorialEntry},
    RemoteId, StoreError, TutorialFile, TutorialRecord,
};
use predicates::prelude::predicate;
use std::fs;

fn entry(web_path: &str) -> TutorialEntry {
    TutorialEntry::new(TutorialRecord::new(
        "Event loop",
        web_path,
        None,
        vec![TutorialFile::new("index.html", "<!DOCTYPE html>")],
    ))
}

// ---------------------------------------------------------------------------
// 1. Load error messages
// ---------------------------------------------------------------------------

#[test]
fn load_missing_record_returns_not_found() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let err = store::load_at(home.path(), "event-loop").unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }), "got: {err}");
    assert!(err.to_string().contains("tutorial record not found"));
    assert!(err.to_string().contains("event-loop.yaml"));
}

#[test]
fn load_corrupt_yaml_returns_parse_error_with_path() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let dir = home.path().join(".plunk").join("tutorials");
    fs::create_dir_all(&dir).expect("mkdir");
    fs::write(dir.join("event-loop.yaml"), b": : corrupt : yaml : !!!\n  - broken: [unclosed")
        .expect("write");

    let err = store::load_at(home.path(), "event-loop").unwrap_err();
    assert!(matches!(err, StoreError::Parse { .. }), "got: {err}");
    assert!(err.to_string().contains("event-loop.yaml"), "must contain file path, got: {err}");
}

#[test]
fn load_wrong_type_yaml_returns_parse_error() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let dir = home.path().join(".plunk").join("tutorials");
    fs::create_dir_all(&dir).expect("mkdir");
    fs::write(dir.join("event-loop.yaml"), b"- this is a list, not a mapping\n").expect("write");

    let err = store::load_at(home.path(), "event-loop").unwrap_err();
    assert!(matches!(err, StoreError::Parse { .. }), "got: {err}");
}

// ---------------------------------------------------------------------------
// 2. Atomic write safety
// ---------------------------------------------------------------------------

#[test]
fn mid_write_crash_leaves_original_intact() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    store::save_at(home.path(), &entry("event-loop")).expect("save");

    let yaml_path = store::record_path_at(home.path(), "event-loop");
    let original_bytes = fs::read(&yaml_path).expect("read original");

    // Simulate crash: .tmp written but process died before rename
    let tmp = yaml_path.with_extension("yaml.tmp");
    fs::write(&tmp, b"CRASH - INCOMPLETE WRITE").expect("write crash tmp");

    let current_bytes = fs::read(&yaml_path).expect("read after crash");
    assert_eq!(original_bytes, current_bytes, "original must be unchanged after crash");

    // Orphaned .yaml.tmp files are not records.
    let list = store::list_at(home.path()).expect("list");
    assert_eq!(list.len(), 1);
}

#[test]
fn saved_file_is_private() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    store::save_at(home.path(), &entry("event-loop")).expect("save");

    home.child(".plunk/tutorials/event-loop.yaml")
        .assert(predicate::path::exists());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let path = store::record_path_at(home.path(), "event-loop");
        let mode = fs::metadata(&path).expect("meta").permissions().mode() & 0o777;
        assert_eq!(mode, 0o600, "expected 0600, got {mode:o}");
    }
}

#[test]
fn saved_yaml_uses_record_field_names() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let mut e = entry("event-loop");
    e.record.remote_id = Some(RemoteId::from("Xk3a9qB"));
    store::save_at(home.path(), &e).expect("save");

    home.child(".plunk/tutorials/event-loop.yaml")
        .assert(predicate::str::contains("webPath: event-loop"))
        .assert(predicate::str::contains("remoteId: Xk3a9qB"))
        .assert(predicate::str::contains("createdAt:"));
}

// ---------------------------------------------------------------------------
// 3. Init and list
// ---------------------------------------------------------------------------

#[test]
fn init_creates_record_under_sanitized_key() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let created = store::init_at(home.path(), "Promises", "/async/promise").expect("init");

    home.child(".plunk/tutorials/__async__promise.yaml")
        .assert(predicate::path::exists());

    let loaded = store::load_at(home.path(), "/async/promise").expect("load");
    assert_eq!(loaded, created);
    assert_eq!(loaded.record.web_path, "/async/promise");
    assert!(loaded.record.remote_id.is_none());
    assert!(loaded.synced_at.is_none());
}

#[test]
fn list_is_sorted_and_deterministic() {
    let home = assert_fs::TempDir::new().expect("tempdir");

    // Register beta before alpha intentionally
    store::init_at(home.path(), "b", "beta").expect("beta");
    store::init_at(home.path(), "a", "alpha").expect("alpha");

    let list = store::list_at(home.path()).expect("list");
    let paths: Vec<_> = list.iter().map(|e| e.record.web_path.as_str()).collect();
    assert_eq!(paths, vec!["alpha", "beta"]);
}
