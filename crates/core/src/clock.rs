//! Millisecond wall-clock abstraction
//!
//! All TTL bookkeeping runs on milliseconds since the Unix epoch. Times
//! written to the WAL are absolute, so replay is independent of process
//! start time. The `Clock` trait is the single seam for time: production
//! code uses `SystemClock`, tests substitute `ManualClock` to make TTL
//! behavior deterministic.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of "now" in milliseconds since the Unix epoch
pub trait Clock: Send + Sync {
    /// Current time in ms since 1970-01-01 00:00:00 UTC
    fn now_ms(&self) -> u64;
}

/// Wall clock backed by `SystemTime`
///
/// Returns epoch (0) if the system clock is before the Unix epoch
/// (e.g., clock went backwards due to NTP adjustment).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Manually advanced clock for deterministic tests
///
/// Starts at the given instant and only moves when told to. Shared via
/// `Arc` between the test and the store under test.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    /// Create a clock frozen at `start_ms`
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: AtomicU64::new(start_ms),
        }
    }

    /// Move the clock forward by `delta_ms`
    pub fn advance(&self, delta_ms: u64) {
        self.now.fetch_add(delta_ms, Ordering::SeqCst);
    }

    /// Jump the clock to an absolute instant
    pub fn set(&self, now_ms: u64) {
        self.now.store(now_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}
