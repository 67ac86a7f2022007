//! Core types for the Brine key-value store
//!
//! This crate defines the foundational pieces shared by every layer:
//! - Error: unified error type for all Brine APIs
//! - Result: crate-wide result alias
//! - Clock: millisecond wall-clock abstraction (swappable in tests)
//!
//! Keys and values are plain `String`s throughout the system. Keys are
//! compared byte-lexicographically, which is exactly the `Ord` of `str`,
//! so no newtype is needed.

pub mod clock;
pub mod error;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Error, Result};
