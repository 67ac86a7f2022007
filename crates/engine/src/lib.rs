//! Engine layer for the Brine store
//!
//! Orchestrates the in-memory state, the write-ahead log, and the
//! transaction buffer behind one embeddable handle:
//!
//! - `database`: the `Database` type; open/replay, reads with TTL
//!   visibility, autocommit and transactional mutation
//! - `transaction`: the single-writer transaction state machine
//! - `jsonlog`: the standalone append-only JSON-line store
//!
//! Command execution is strictly serial; the internal lock exists so a
//! `Database` handle is `Send + Sync` for embedding, not to support
//! concurrent writers.

pub mod database;
pub mod jsonlog;
pub mod transaction;

pub use brine_core::{Error, Result};
pub use database::{Database, DatabaseBuilder, TtlStatus};
pub use jsonlog::JsonLogStore;
pub use transaction::{TransactionState, WriteOp};
