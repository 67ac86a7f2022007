//! Write-ahead log file operations
//!
//! Append contract: each record is written as one line, flushed, and
//! fsynced before `append` returns. Only one process writes the log, so
//! the file is opened in append mode per call and grows monotonically
//! for the process lifetime. Write and fsync failures propagate to the
//! caller so the acknowledgement for the mutation can be withheld.
//!
//! Replay contract: records are applied strictly in file order into an
//! empty index and TTL table. Replay tolerates empty lines, unknown
//! opcodes, malformed records, and a torn final line with no trailing
//! newline. A torn tail never prevents recovery of the durable prefix,
//! and is truncated away so post-recovery appends land on a record
//! boundary.

use crate::record::WalRecord;
use brine_core::Result;
use brine_storage::{OrderedIndex, TtlManager};
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Counters from a replay pass, logged on startup
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplayStats {
    /// Records applied to the index / TTL table
    pub applied: usize,
    /// Lines skipped (empty, malformed, unknown opcode, torn tail)
    pub skipped: usize,
}

/// Append-only log backing the store
///
/// The log is a single regular UTF-8 text file with LF terminators, one
/// record per line, no header and no checksum. It is created empty on
/// first use.
#[derive(Debug)]
pub struct Wal {
    path: PathBuf,
}

impl Wal {
    /// Open the log at `path`, creating it empty if missing
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        OpenOptions::new().append(true).create(true).open(&path)?;
        Ok(Self { path })
    }

    /// Path of the underlying log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Durably append one record
    ///
    /// Opens the file in append mode, writes the record line, flushes,
    /// and fsyncs. The call completes only after fsync returns; a
    /// failure anywhere propagates and the caller must not acknowledge
    /// the mutation.
    pub fn append(&self, record: &WalRecord) -> Result<()> {
        self.append_line(&record.encode())
    }

    fn append_line(&self, line: &str) -> Result<()> {
        let result = (|| -> io::Result<()> {
            let mut file = OpenOptions::new().append(true).create(true).open(&self.path)?;
            file.write_all(line.as_bytes())?;
            file.write_all(b"\n")?;
            file.flush()?;
            file.sync_all()
        })();

        if let Err(ref e) = result {
            error!(path = %self.path.display(), error = %e, "WAL append failed");
        }
        Ok(result?)
    }

    /// Rebuild `index` and `ttl` by applying the log in file order
    ///
    /// Last-writer-wins across records yields the final state. Returns
    /// counters for applied and skipped lines.
    ///
    /// When a torn tail is found it is truncated away after the scan,
    /// so the next append starts on a record boundary instead of
    /// concatenating onto the partial line.
    pub fn replay(&self, index: &mut OrderedIndex, ttl: &mut TtlManager) -> Result<ReplayStats> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            // no log yet: an empty store
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ReplayStats::default()),
            Err(e) => return Err(e.into()),
        };

        let mut reader = BufReader::new(file);
        let mut stats = ReplayStats::default();
        let mut line = String::new();
        let mut durable_bytes: u64 = 0;
        let mut torn = false;

        loop {
            line.clear();
            let n = match reader.read_line(&mut line) {
                Ok(n) => n,
                // a torn tail can hold arbitrary bytes; stop at the durable prefix
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    warn!(path = %self.path.display(), "non-UTF-8 tail in WAL, stopping replay");
                    stats.skipped += 1;
                    torn = true;
                    break;
                }
                Err(e) => return Err(e.into()),
            };
            if n == 0 {
                break;
            }

            if !line.ends_with('\n') {
                // partial final record from a crash mid-append
                warn!(path = %self.path.display(), "torn final WAL line, skipping");
                stats.skipped += 1;
                torn = true;
                break;
            }
            durable_bytes += n as u64;

            let trimmed = line.trim_end_matches(['\n', '\r']);
            if trimmed.is_empty() {
                continue;
            }

            match WalRecord::parse(trimmed) {
                Some(record) => {
                    Self::apply(&record, index, ttl);
                    stats.applied += 1;
                }
                None => {
                    warn!(line = trimmed, "skipping malformed WAL line");
                    stats.skipped += 1;
                }
            }
        }

        if torn {
            let file = OpenOptions::new().write(true).open(&self.path)?;
            file.set_len(durable_bytes)?;
            warn!(
                path = %self.path.display(),
                durable_bytes,
                "truncated torn WAL tail"
            );
        }

        info!(
            path = %self.path.display(),
            applied = stats.applied,
            skipped = stats.skipped,
            "WAL replay complete"
        );
        Ok(stats)
    }

    fn apply(record: &WalRecord, index: &mut OrderedIndex, ttl: &mut TtlManager) {
        match record {
            WalRecord::Set { key, value } => index.set(key, value),
            WalRecord::Del { key } => {
                index.delete(key);
                ttl.delete(key);
            }
            WalRecord::Expire { key, expiry_ms } => ttl.replay_set(key, *expiry_ms),
            WalRecord::Persist { key } => ttl.delete(key),
        }
    }
}
