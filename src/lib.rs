//! # BrineDB
//!
//! An embeddable, single-node key-value store with durable append-only
//! persistence, ordered key indexing, per-key TTL expiry, and
//! single-writer transactions with buffered commit.
//!
//! Once an operation returns success its effect is recoverable after a
//! crash: every mutation is written to a write-ahead log and fsynced
//! before it is acknowledged, and opening the store replays the log
//! from the beginning.
//!
//! # Quick Start
//!
//! ```no_run
//! use brinedb::{Database, TtlStatus};
//!
//! fn main() -> brinedb::Result<()> {
//!     let db = Database::open("./data.db")?;
//!
//!     // Autocommit: applied, logged, and fsynced before returning
//!     db.set("user:name", "Alice")?;
//!     assert_eq!(db.get("user:name"), Some("Alice".to_string()));
//!
//!     // Lexicographic range scans, inclusive on both sides
//!     assert_eq!(db.range("user:", "user:~"), vec!["user:name"]);
//!
//!     // Per-key TTL in milliseconds
//!     db.expire("user:name", 60_000)?;
//!     assert!(matches!(db.ttl("user:name"), TtlStatus::Remaining(_)));
//!
//!     // Buffered transactions with read-your-writes
//!     db.begin();
//!     db.set("a", "1")?;
//!     db.set("b", "2")?;
//!     db.commit()?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The [`Database`] handle is the main entry point; the `brine` binary
//! wraps it in a line-oriented command protocol over stdin/stdout.
//! Internal crates (storage, durability, engine) are not exposed; only
//! the surface re-exported here is stable. [`JsonLogStore`] is a small
//! standalone append-only JSON-line store sharing the same
//! replay-from-log idea.

pub mod prelude;

// Re-export the public API from brine-engine
pub use brine_engine::{Database, DatabaseBuilder, JsonLogStore, TtlStatus};

// Error handling
pub use brine_core::{Error, Result};

// Time source, swappable for deterministic TTL tests
pub use brine_core::{Clock, ManualClock, SystemClock};
