//! Single-writer transaction state
//!
//! Two states: autocommit (the default) and in-transaction. While a
//! transaction is active, mutations land in a buffer that shadows the
//! index for this session's reads; nothing becomes observable through
//! the index or the WAL until commit. `begin` inside a transaction
//! silently discards the previous buffer, and `commit`/`abort` outside
//! one are no-ops.

use std::collections::BTreeMap;

/// A buffered mutation: a pending write or a pending delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    /// Pending `key -> value` binding
    Put(String),
    /// Pending deletion marker
    Tombstone,
}

/// Transaction buffer and activity flag
///
/// The buffer maps each key to its latest staged operation; keys are
/// unique within the buffer, so commit order across distinct keys is
/// not observable. BTreeMap makes the commit iteration deterministic.
#[derive(Debug, Default)]
pub struct TransactionState {
    active: bool,
    buffer: BTreeMap<String, WriteOp>,
}

impl TransactionState {
    /// Create in autocommit state with an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a transaction is active
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enter a transaction, discarding any previously staged mutations
    pub fn begin(&mut self) {
        self.active = true;
        self.buffer.clear();
    }

    /// Leave the transaction, discarding the buffer
    pub fn abort(&mut self) {
        self.active = false;
        self.buffer.clear();
    }

    /// Stage a write for `key`
    pub fn stage_put(&mut self, key: &str, value: &str) {
        self.buffer
            .insert(key.to_string(), WriteOp::Put(value.to_string()));
    }

    /// Stage a deletion for `key`
    pub fn stage_tombstone(&mut self, key: &str) {
        self.buffer.insert(key.to_string(), WriteOp::Tombstone);
    }

    /// The staged operation for `key`, if any
    ///
    /// Only consulted while active; a `Tombstone` shadows the index as
    /// "absent" for read-your-writes.
    pub fn staged(&self, key: &str) -> Option<&WriteOp> {
        self.buffer.get(key)
    }

    /// Leave the transaction and hand the buffer to the committer
    pub fn take_buffer(&mut self) -> BTreeMap<String, WriteOp> {
        self.active = false;
        std::mem::take(&mut self.buffer)
    }
}
