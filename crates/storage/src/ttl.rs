//! Per-key TTL bookkeeping
//!
//! Maps keys to absolute expiry instants in ms since the Unix epoch.
//! Absolute times are what get written to the WAL, so replay does not
//! depend on when the process started. Expiry is a lazy visibility
//! gate: nothing in here evicts keys on its own, callers ask
//! `is_expired` on the read path.

use brine_core::Clock;
use std::collections::HashMap;
use std::sync::Arc;

/// Absolute expiry timestamps, keyed by user key
///
/// Absence of an entry means "no TTL": the key never expires by this
/// mechanism. An entry may exist for a key with no index binding
/// (transiently, during replay); it is cleaned on the next delete.
pub struct TtlManager {
    expiry: HashMap<String, u64>,
    clock: Arc<dyn Clock>,
}

impl TtlManager {
    /// Create an empty manager reading time from `clock`
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            expiry: HashMap::new(),
            clock,
        }
    }

    /// Arm a TTL of `ms` milliseconds from now; returns the absolute expiry
    ///
    /// `ms <= 0` arms an already-expired TTL (`now - 1`), making the key
    /// immediately invisible. The returned absolute time is what the
    /// caller writes into the `EXPIRE` WAL record.
    pub fn set(&mut self, key: &str, ms: i64) -> u64 {
        let now = self.clock.now_ms();
        let expiry_ms = if ms <= 0 {
            now.saturating_sub(1)
        } else {
            now.saturating_add(ms as u64)
        };
        self.expiry.insert(key.to_string(), expiry_ms);
        expiry_ms
    }

    /// Install an absolute expiry directly (WAL replay only)
    pub fn replay_set(&mut self, key: &str, abs_ms: u64) {
        self.expiry.insert(key.to_string(), abs_ms);
    }

    /// Whether `key`'s TTL has elapsed
    ///
    /// False when no TTL is armed; otherwise true iff `now >= expiry`.
    pub fn is_expired(&self, key: &str) -> bool {
        match self.expiry.get(key) {
            Some(expiry_ms) => self.clock.now_ms() >= *expiry_ms,
            None => false,
        }
    }

    /// Drop any TTL entry for `key` silently
    pub fn delete(&mut self, key: &str) {
        self.expiry.remove(key);
    }

    /// Drop the TTL for `key`; returns true iff one was armed
    ///
    /// The caller is responsible for writing the `PERSIST` WAL record
    /// when this returns true.
    pub fn persist(&mut self, key: &str) -> bool {
        self.expiry.remove(key).is_some()
    }

    /// Milliseconds until expiry, clamped at 0; None when no TTL is armed
    pub fn remaining(&self, key: &str) -> Option<u64> {
        self.expiry
            .get(key)
            .map(|expiry_ms| expiry_ms.saturating_sub(self.clock.now_ms()))
    }

    /// Number of armed TTLs
    pub fn len(&self) -> usize {
        self.expiry.len()
    }

    /// Check if no TTLs are armed
    pub fn is_empty(&self) -> bool {
        self.expiry.is_empty()
    }
}

impl std::fmt::Debug for TtlManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlManager")
            .field("expiry", &self.expiry)
            .finish()
    }
}
