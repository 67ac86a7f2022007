//! Single-writer transactions: read-your-writes inside the session,
//! nothing observable through the index until commit, no WAL effect on
//! abort.

use brinedb::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn abort_discards_commit_applies() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.db");
    let db = Database::open(&path).unwrap();

    db.begin();
    db.set("x", "10").unwrap();
    assert_eq!(db.get("x"), Some("10".to_string()));
    db.abort();
    assert_eq!(db.get("x"), None);

    db.begin();
    db.set("x", "10").unwrap();
    db.commit().unwrap();
    assert_eq!(db.get("x"), Some("10".to_string()));

    // the aborted attempt left no trace in the log
    let log = fs::read_to_string(&path).unwrap();
    assert_eq!(log.matches("SET x 10").count(), 1);
}

#[test]
fn buffered_writes_do_not_reach_index_or_log() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.db");
    let db = Database::open(&path).unwrap();

    db.set("base", "1").unwrap();
    db.begin();
    db.set("staged", "2").unwrap();

    // range reads the index, so the staged key is not there yet
    assert_eq!(db.range("", ""), vec!["base"]);
    assert_eq!(fs::read_to_string(&path).unwrap(), "SET base 1\n");

    db.commit().unwrap();
    assert_eq!(db.range("", ""), vec!["base", "staged"]);
}

#[test]
fn tombstone_shadows_index_within_transaction() {
    let dir = TempDir::new().unwrap();
    let db = Database::open(dir.path().join("data.db")).unwrap();

    db.set("k", "v").unwrap();
    db.begin();
    assert!(db.delete("k").unwrap());
    assert_eq!(db.get("k"), None);
    assert!(!db.exists("k"));
    // deleting again inside the same transaction reports absent
    assert!(!db.delete("k").unwrap());

    db.commit().unwrap();
    assert_eq!(db.get("k"), None);
}

#[test]
fn rebegin_discards_previous_buffer() {
    let dir = TempDir::new().unwrap();
    let db = Database::open(dir.path().join("data.db")).unwrap();

    db.begin();
    db.set("a", "1").unwrap();
    db.begin();
    db.set("b", "2").unwrap();
    db.commit().unwrap();

    assert_eq!(db.get("a"), None);
    assert_eq!(db.get("b"), Some("2".to_string()));
}

#[test]
fn committed_transaction_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.db");

    {
        let db = Database::open(&path).unwrap();
        db.set("stale", "x").unwrap();
        db.begin();
        db.set("fresh", "1").unwrap();
        db.delete("stale").unwrap();
        db.commit().unwrap();
    }

    let db = Database::open(&path).unwrap();
    assert_eq!(db.get("fresh"), Some("1".to_string()));
    assert_eq!(db.get("stale"), None);
}

#[test]
fn last_staged_write_per_key_wins() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.db");
    let db = Database::open(&path).unwrap();

    db.begin();
    db.set("k", "first").unwrap();
    db.set("k", "second").unwrap();
    db.commit().unwrap();

    assert_eq!(db.get("k"), Some("second".to_string()));
    // one buffer entry per key means one log record per key
    assert_eq!(fs::read_to_string(&path).unwrap(), "SET k second\n");
}
