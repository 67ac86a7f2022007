//! Database struct and open/replay logic
//!
//! The `Database` is the embeddable entry point. Opening it replays the
//! write-ahead log into the index and TTL table before any command is
//! accepted; after that, every read routes through the transaction
//! buffer and the TTL visibility gate, and every mutation either
//! applies-and-logs immediately (autocommit) or stages into the buffer
//! (inside a transaction).
//!
//! ## Visibility rules
//!
//! - A key whose expiry has passed is invisible to `get`, `exists`,
//!   `mget`, `range`, and `ttl`, whether or not its index entry was
//!   ever physically removed.
//! - `delete` and `expire` test bare presence, without the TTL gate.
//! - `ttl` and `range` consult the index directly and ignore the
//!   transaction buffer.
//!
//! Expired entries are never evicted by reads; the gate alone keeps
//! replayed and live states observationally identical.

use crate::transaction::{TransactionState, WriteOp};
use brine_core::{Clock, Error, Result, SystemClock};
use brine_durability::{Wal, WalRecord};
use brine_storage::{OrderedIndex, TtlManager};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Reply shape for a TTL query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtlStatus {
    /// Key is absent or already expired
    Missing,
    /// Key exists with no TTL armed
    NoExpiry,
    /// Key exists; this many milliseconds remain (clamped at 0)
    Remaining(u64),
}

/// Configuration for opening a database
///
/// The builder exists for the two knobs the store has: the log path and
/// the clock. Tests inject a `ManualClock` to make TTL behavior
/// deterministic; production code uses `Database::open`.
pub struct DatabaseBuilder {
    path: PathBuf,
    clock: Arc<dyn Clock>,
}

impl DatabaseBuilder {
    /// Start building a database over the log at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Substitute the time source
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Open the log, replay it, and return the ready database
    pub fn open(self) -> Result<Database> {
        let wal = Wal::open(self.path)?;
        let mut index = OrderedIndex::new();
        let mut ttl = TtlManager::new(self.clock);
        wal.replay(&mut index, &mut ttl)?;

        Ok(Database {
            inner: Mutex::new(Inner {
                index,
                ttl,
                wal,
                txn: TransactionState::new(),
            }),
        })
    }
}

/// Embeddable single-writer key-value store
///
/// `Send + Sync`; the internal mutex serializes access so the handle
/// can be shared, but execution remains one command at a time. Create
/// with [`Database::open`] or [`Database::builder`].
pub struct Database {
    inner: Mutex<Inner>,
}

struct Inner {
    index: OrderedIndex,
    ttl: TtlManager,
    wal: Wal,
    txn: TransactionState,
}

impl Database {
    /// Open (creating if necessary) the store backed by the log at `path`
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        DatabaseBuilder::new(path).open()
    }

    /// Builder for overriding the clock
    pub fn builder(path: impl Into<PathBuf>) -> DatabaseBuilder {
        DatabaseBuilder::new(path)
    }

    // ========== Reads ==========

    /// Value bound to `key`, honoring the transaction buffer and TTL
    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.lock().read_visible(key)
    }

    /// Whether `key` is visible (present and not expired)
    pub fn exists(&self, key: &str) -> bool {
        self.inner.lock().read_visible(key).is_some()
    }

    /// `get` for each key in order
    pub fn mget(&self, keys: &[&str]) -> Vec<Option<String>> {
        let inner = self.inner.lock();
        keys.iter().map(|k| inner.read_visible(k)).collect()
    }

    /// All visible keys `k` with `start <= k <= end`, ascending
    ///
    /// Empty bounds are unbounded on that side. Expired keys are
    /// filtered out; staged transaction writes are not consulted.
    pub fn range(&self, start: &str, end: &str) -> Vec<String> {
        let inner = self.inner.lock();
        inner
            .index
            .range_scan(start, end)
            .into_iter()
            .filter(|k| !inner.ttl.is_expired(k))
            .collect()
    }

    /// Remaining TTL for `key`
    pub fn ttl(&self, key: &str) -> TtlStatus {
        let inner = self.inner.lock();
        if inner.index.get(key).is_none() || inner.ttl.is_expired(key) {
            return TtlStatus::Missing;
        }
        match inner.ttl.remaining(key) {
            Some(ms) => TtlStatus::Remaining(ms),
            None => TtlStatus::NoExpiry,
        }
    }

    // ========== Mutations ==========

    /// Bind `key` to `value`
    ///
    /// Autocommit: applied to the index and durably logged before the
    /// call returns. In a transaction: staged in the buffer. Keys must
    /// be non-empty and free of whitespace, and values free of line
    /// breaks, so every binding survives the log round trip verbatim.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.inner.lock().set(key, value)
    }

    /// `set` for each pair, through the same write path
    pub fn mset(&self, pairs: &[(&str, &str)]) -> Result<()> {
        let mut inner = self.inner.lock();
        for (key, value) in pairs {
            inner.set(key, value)?;
        }
        Ok(())
    }

    /// Remove `key`; returns whether it was present
    ///
    /// Presence is the buffered read without the TTL gate, so deleting
    /// an expired-but-present key reports true and cleans it up.
    pub fn delete(&self, key: &str) -> Result<bool> {
        self.inner.lock().delete(key)
    }

    /// Arm a TTL of `ms` milliseconds on `key`
    ///
    /// Returns false (and does nothing) when the key is absent.
    /// `ms <= 0` expires the key immediately. The absolute expiry is
    /// logged so replay is independent of process start time.
    pub fn expire(&self, key: &str, ms: i64) -> Result<bool> {
        let mut inner = self.inner.lock();
        if inner.read_raw(key).is_none() {
            return Ok(false);
        }
        let expiry_ms = inner.ttl.set(key, ms);
        inner.wal.append(&WalRecord::Expire {
            key: key.to_string(),
            expiry_ms,
        })?;
        Ok(true)
    }

    /// Drop any TTL on `key`; returns whether one was armed
    pub fn persist(&self, key: &str) -> Result<bool> {
        let mut inner = self.inner.lock();
        if !inner.ttl.persist(key) {
            return Ok(false);
        }
        inner.wal.append(&WalRecord::Persist {
            key: key.to_string(),
        })?;
        Ok(true)
    }

    // ========== Transactions ==========

    /// Enter a transaction; a transaction already in progress is reset
    pub fn begin(&self) {
        self.inner.lock().txn.begin();
    }

    /// Apply and log every staged mutation, then return to autocommit
    ///
    /// Entries are applied in key order, one WAL record each. A failure
    /// mid-commit leaves the already-applied prefix in place and
    /// durable, mirroring what a crash at the same point would leave.
    pub fn commit(&self) -> Result<()> {
        self.inner.lock().commit()
    }

    /// Discard the transaction buffer with no index or WAL effect
    pub fn abort(&self) {
        self.inner.lock().txn.abort();
    }
}

impl Inner {
    /// Buffered read: staged value, staged tombstone, or the index
    fn read_raw(&self, key: &str) -> Option<&str> {
        if self.txn.is_active() {
            match self.txn.staged(key) {
                Some(WriteOp::Put(value)) => return Some(value.as_str()),
                Some(WriteOp::Tombstone) => return None,
                None => {}
            }
        }
        self.index.get(key)
    }

    /// Buffered read behind the TTL visibility gate
    fn read_visible(&self, key: &str) -> Option<String> {
        let value = self.read_raw(key)?;
        if self.ttl.is_expired(key) {
            return None;
        }
        Some(value.to_string())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if key.is_empty() || key.chars().any(char::is_whitespace) {
            return Err(Error::InvalidKey(
                "key must be non-empty and contain no whitespace".to_string(),
            ));
        }
        if value.contains('\n') || value.contains('\r') {
            // a line break would split the record and break replay
            return Err(Error::InvalidOperation(
                "value cannot contain line breaks".to_string(),
            ));
        }
        if self.txn.is_active() {
            self.txn.stage_put(key, value);
            return Ok(());
        }
        self.index.set(key, value);
        self.wal.append(&WalRecord::Set {
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    fn delete(&mut self, key: &str) -> Result<bool> {
        if self.read_raw(key).is_none() {
            return Ok(false);
        }
        if self.txn.is_active() {
            self.txn.stage_tombstone(key);
            return Ok(true);
        }
        self.index.delete(key);
        self.ttl.delete(key);
        self.wal.append(&WalRecord::Del {
            key: key.to_string(),
        })?;
        Ok(true)
    }

    fn commit(&mut self) -> Result<()> {
        if !self.txn.is_active() {
            return Ok(());
        }
        let buffer = self.txn.take_buffer();
        let entries = buffer.len();
        for (key, op) in buffer {
            match op {
                WriteOp::Tombstone => {
                    self.index.delete(&key);
                    self.ttl.delete(&key);
                    self.wal.append(&WalRecord::Del { key })?;
                }
                WriteOp::Put(value) => {
                    self.index.set(&key, &value);
                    self.wal.append(&WalRecord::Set { key, value })?;
                }
            }
        }
        debug!(entries, "transaction committed");
        Ok(())
    }
}
