//! JSON session store behaviour on a real filesystem.

use std::fs;

use pwv_model::{Constraints, Cursor, InputProfile, SessionId, SessionRecord};
use pwv_persistence::{JsonSessionStore, PersistenceError, SessionStore, sessions_by_recency};
use tempfile::tempdir;

fn record(id: &str) -> SessionRecord {
    SessionRecord::new(
        SessionId::new(id).unwrap(),
        InputProfile::new(vec!["anna".into()], vec!["1/2/1990".into()], vec![]),
        Constraints::default(),
    )
}

#[test]
fn missing_file_loads_empty() {
    let dir = tempdir().unwrap();
    let store = JsonSessionStore::in_dir(dir.path());
    assert!(store.load().is_empty());
}

#[test]
fn corrupt_file_loads_empty() {
    let dir = tempdir().unwrap();
    let store = JsonSessionStore::in_dir(dir.path());
    fs::write(store.path(), "{ not json").unwrap();
    assert!(store.load().is_empty());

    fs::write(store.path(), r#"{"session_id": "abc"}"#).unwrap();
    assert!(store.load().is_empty());
}

#[test]
fn append_then_reload() {
    let dir = tempdir().unwrap();
    let store = JsonSessionStore::in_dir(&dir.path().join("nested"));
    store.append(record("aaa")).unwrap();
    store.append(record("bbb")).unwrap();

    let reopened = JsonSessionStore::in_dir(&dir.path().join("nested"));
    let ids: Vec<String> = reopened
        .load()
        .iter()
        .map(|r| r.session_id.to_string())
        .collect();
    assert_eq!(ids, ["aaa", "bbb"]);
    assert!(!store.path().with_extension("json.tmp").exists());
}

#[test]
fn saved_file_is_a_pretty_flat_array() {
    let dir = tempdir().unwrap();
    let store = JsonSessionStore::in_dir(dir.path());
    store.append(record("aaa")).unwrap();

    let text = fs::read_to_string(store.path()).unwrap();
    assert!(text.starts_with("[\n"));
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let first = &value[0];
    assert_eq!(first["session_id"], "aaa");
    assert_eq!(first["strings"][0], "anna");
    assert_eq!(first["current_rule_index"], 0);
}

#[test]
fn update_persists_cursor_and_refreshes_timestamp() {
    let dir = tempdir().unwrap();
    let store = JsonSessionStore::in_dir(dir.path());
    let mut stale = record("aaa");
    stale.updated_at = "2000-01-01T00:00:00+00:00".into();
    store.save(&[stale, record("bbb")]).unwrap();

    store
        .update("aaa", &mut |r| {
            r.cursor = Cursor::new(2, 17);
            r.total_generated += 17;
        })
        .unwrap();

    let found = store.find_by_id("aaa").unwrap();
    assert_eq!(found.cursor, Cursor::new(2, 17));
    assert_eq!(found.total_generated, 17);
    assert_ne!(found.updated_at, "2000-01-01T00:00:00+00:00");

    let recent = sessions_by_recency(store.load());
    assert_eq!(recent.len(), 2);
}

#[test]
fn unknown_id_is_reported() {
    let dir = tempdir().unwrap();
    let store = JsonSessionStore::in_dir(dir.path());
    store.append(record("aaa")).unwrap();
    let error = store.find_by_id("zzz").unwrap_err();
    assert!(matches!(error, PersistenceError::SessionNotFound { .. }));
    assert!(error.suggestion().is_some());
}
