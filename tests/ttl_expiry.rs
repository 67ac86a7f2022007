//! TTL visibility: a key whose expiry has passed is invisible to every
//! read-shaped operation, and expiries are themselves logged so they
//! survive restarts.

use brinedb::prelude::*;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn open_with_clock(path: &std::path::Path, clock: Arc<ManualClock>) -> Database {
    Database::builder(path).clock(clock).open().unwrap()
}

#[test]
fn expired_key_is_invisible_to_all_reads() {
    let dir = TempDir::new().unwrap();
    let clock = Arc::new(ManualClock::new(1_000));
    let db = open_with_clock(&dir.path().join("data.db"), clock.clone());

    db.set("k", "v").unwrap();
    assert!(db.expire("k", 50).unwrap());

    clock.advance(49);
    assert_eq!(db.get("k"), Some("v".to_string()));

    clock.advance(51);
    assert_eq!(db.get("k"), None);
    assert!(!db.exists("k"));
    assert_eq!(db.ttl("k"), TtlStatus::Missing);
    assert_eq!(db.mget(&["k"]), vec![None]);
    assert!(db.range("", "").is_empty());
}

#[test]
fn ttl_transitions() {
    let dir = TempDir::new().unwrap();
    let clock = Arc::new(ManualClock::new(1_000));
    let db = open_with_clock(&dir.path().join("data.db"), clock.clone());

    assert_eq!(db.ttl("k"), TtlStatus::Missing);

    db.set("k", "v").unwrap();
    assert_eq!(db.ttl("k"), TtlStatus::NoExpiry);

    db.expire("k", 500).unwrap();
    clock.advance(200);
    assert_eq!(db.ttl("k"), TtlStatus::Remaining(300));

    assert!(db.persist("k").unwrap());
    assert_eq!(db.ttl("k"), TtlStatus::NoExpiry);
}

#[test]
fn nonpositive_expire_is_immediate() {
    let dir = TempDir::new().unwrap();
    let clock = Arc::new(ManualClock::new(1_000));
    let db = open_with_clock(&dir.path().join("data.db"), clock);

    db.set("k", "v").unwrap();
    assert!(db.expire("k", 0).unwrap());
    assert_eq!(db.get("k"), None);
}

#[test]
fn expiry_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.db");
    let clock = Arc::new(ManualClock::new(1_000));

    {
        let db = open_with_clock(&path, clock.clone());
        db.set("k", "v").unwrap();
        db.expire("k", 50).unwrap();
    }

    // the log carries the absolute expiry, not a duration
    let log = fs::read_to_string(&path).unwrap();
    assert!(log.contains("EXPIRE k 1050"));

    let db = open_with_clock(&path, clock.clone());
    assert_eq!(db.ttl("k"), TtlStatus::Remaining(50));

    clock.advance(100);
    assert_eq!(db.get("k"), None);
}

#[test]
fn persist_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.db");
    let clock = Arc::new(ManualClock::new(1_000));

    {
        let db = open_with_clock(&path, clock.clone());
        db.set("k", "v").unwrap();
        db.expire("k", 50).unwrap();
        assert!(db.persist("k").unwrap());
    }

    let db = open_with_clock(&path, clock.clone());
    clock.advance(1_000_000);
    assert_eq!(db.get("k"), Some("v".to_string()));
    assert_eq!(db.ttl("k"), TtlStatus::NoExpiry);
}

#[test]
fn replayed_ttl_without_index_entry_is_harmless() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.db");
    fs::write(&path, "EXPIRE ghost 900\nSET a 1\n").unwrap();

    let clock = Arc::new(ManualClock::new(1_000));
    let db = open_with_clock(&path, clock);

    assert_eq!(db.get("ghost"), None);
    assert_eq!(db.ttl("ghost"), TtlStatus::Missing);
    assert!(!db.delete("ghost").unwrap());
    assert_eq!(db.get("a"), Some("1".to_string()));
}

#[test]
fn overwriting_set_keeps_existing_ttl() {
    // SET does not touch the TTL table; only DEL and PERSIST disarm
    let dir = TempDir::new().unwrap();
    let clock = Arc::new(ManualClock::new(1_000));
    let db = open_with_clock(&dir.path().join("data.db"), clock.clone());

    db.set("k", "v1").unwrap();
    db.expire("k", 100).unwrap();
    db.set("k", "v2").unwrap();

    clock.advance(200);
    assert_eq!(db.get("k"), None);
}
