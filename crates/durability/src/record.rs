//! WAL record grammar
//!
//! One line of text per record, fields separated by single spaces:
//!
//! ```text
//! SET      <key> <value>       value may contain spaces
//! DEL      <key>
//! EXPIRE   <key> <expiry_ms>   absolute ms since epoch, float or int
//! PERSIST  <key>
//! ```
//!
//! Parsing splits into at most three fields so a `SET` value containing
//! spaces survives verbatim as the third field, without any escaping.

/// A single durable operation, one per WAL line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalRecord {
    /// Bind `key` to `value` (value may contain spaces)
    Set { key: String, value: String },
    /// Remove `key` and any TTL it carries
    Del { key: String },
    /// Arm an absolute expiry for `key`, in ms since the Unix epoch
    Expire { key: String, expiry_ms: u64 },
    /// Drop any TTL armed for `key`
    Persist { key: String },
}

impl WalRecord {
    /// The key this record operates on
    pub fn key(&self) -> &str {
        match self {
            WalRecord::Set { key, .. }
            | WalRecord::Del { key }
            | WalRecord::Expire { key, .. }
            | WalRecord::Persist { key } => key,
        }
    }

    /// Render the record as its log line (without the trailing newline)
    pub fn encode(&self) -> String {
        match self {
            WalRecord::Set { key, value } => format!("SET {} {}", key, value),
            WalRecord::Del { key } => format!("DEL {}", key),
            WalRecord::Expire { key, expiry_ms } => format!("EXPIRE {} {}", key, expiry_ms),
            WalRecord::Persist { key } => format!("PERSIST {}", key),
        }
    }

    /// Parse one log line; `None` means the line must be skipped
    ///
    /// Skipped lines are the WAL's crash-recovery tolerance: unknown
    /// opcodes, too few fields, empty keys, and non-numeric expiries are
    /// all treated as a torn or foreign record, never as a fatal error.
    pub fn parse(line: &str) -> Option<WalRecord> {
        let mut fields = line.splitn(3, ' ');
        let op = fields.next()?;
        let key = fields.next().unwrap_or("");
        if key.is_empty() {
            return None;
        }
        let rest = fields.next();

        match op {
            "SET" => rest.map(|value| WalRecord::Set {
                key: key.to_string(),
                value: value.to_string(),
            }),
            "DEL" => Some(WalRecord::Del {
                key: key.to_string(),
            }),
            "EXPIRE" => {
                let ts: f64 = rest?.parse().ok()?;
                if !ts.is_finite() {
                    return None;
                }
                Some(WalRecord::Expire {
                    key: key.to_string(),
                    expiry_ms: ts.max(0.0) as u64,
                })
            }
            "PERSIST" => Some(WalRecord::Persist {
                key: key.to_string(),
            }),
            _ => None,
        }
    }
}
