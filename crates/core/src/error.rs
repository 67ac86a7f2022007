//! Error types for the Brine store
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! ### Error Categories
//!
//! - **I/O**: WAL append or fsync failures; the acknowledgement for the
//!   affected command is withheld
//! - **Corruption**: log content that cannot be recovered locally
//! - **Validation**: invalid input (empty keys, bad operations)

use std::io;
use thiserror::Error;

/// Result type alias for Brine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the Brine store
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (WAL append, fsync, file open)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Data corruption detected
    #[error("Data corruption: {0}")]
    Corruption(String),

    /// Key rejected by validation (empty keys are not allowed)
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Invalid operation or state
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl Error {
    /// Check if this error is a durability (I/O) failure
    ///
    /// Durability failures mean the WAL record for an acknowledged-path
    /// mutation may not have reached disk. Callers must withhold the
    /// success reply when this returns true.
    pub fn is_durability(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_is_durability() {
        let err = Error::from(io::Error::new(io::ErrorKind::Other, "fsync failed"));
        assert!(err.is_durability());
    }

    #[test]
    fn test_validation_error_is_not_durability() {
        let err = Error::InvalidKey("empty key".to_string());
        assert!(!err.is_durability());
        assert_eq!(err.to_string(), "Invalid key: empty key");
    }
}
