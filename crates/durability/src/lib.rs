//! Durability layer for the Brine store
//!
//! The write-ahead log is both the durability mechanism and the
//! authoritative recovery source: every acknowledged mutation has its
//! record flushed and fsynced before the acknowledgement leaves the
//! engine, and startup replays the log from the beginning to rebuild
//! the in-memory index and TTL table.
//!
//! - `record`: the text record grammar (`SET`/`DEL`/`EXPIRE`/`PERSIST`)
//! - `wal`: append with per-record fsync, and resilient replay

pub mod record;
pub mod wal;

pub use record::WalRecord;
pub use wal::{ReplayStats, Wal};
