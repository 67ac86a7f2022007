//! Convenient imports for Brine.
//!
//! Re-exports the commonly used types so one import gets you started:
//!
//! ```no_run
//! use brinedb::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let db = Database::open("./data.db")?;
//!     db.set("key", "value")?;
//!     Ok(())
//! }
//! ```

// Main entry point
pub use crate::{Database, DatabaseBuilder};

// Error handling
pub use crate::{Error, Result};

// TTL query replies
pub use crate::TtlStatus;

// Time source
pub use crate::{Clock, ManualClock, SystemClock};

// The standalone JSON-line store
pub use crate::JsonLogStore;
