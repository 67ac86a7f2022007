//! In-memory state for the Brine store
//!
//! This crate holds the two volatile structures the engine reads from:
//! - OrderedIndex: the ordered key -> value map (point and range access)
//! - TtlManager: per-key absolute expiry timestamps (visibility gate)
//!
//! Both are rebuilt from the write-ahead log on startup; neither touches
//! disk itself. The WAL in `brine-durability` is the durable source of
//! truth, these maps are the read path.

pub mod index;
pub mod ttl;

pub use index::OrderedIndex;
pub use ttl::TtlManager;
