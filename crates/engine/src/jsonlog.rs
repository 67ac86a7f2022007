//! Standalone append-only JSON-line store
//!
//! A degenerate sibling of the main store: same replay-from-log idea,
//! but one JSON object per line, a flat unordered map, no TTLs and no
//! transactions. Deletion is a `"value": null` tombstone. Appends are
//! flushed but not fsynced; durability here is best-effort by design.

use brine_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// One log line: a binding, or a tombstone when `value` is `None`
#[derive(Debug, Serialize, Deserialize)]
struct LogEntry {
    key: String,
    value: Option<String>,
}

/// Append-only JSON-log store with an in-memory map
///
/// The log file is replayed on open; last writer wins, tombstones
/// remove. Keys are returned in no particular order.
#[derive(Debug)]
pub struct JsonLogStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl JsonLogStore {
    /// Open the store at `path`, rebuilding the map from the log
    ///
    /// Parent directories are created if missing. Corrupt lines are
    /// skipped with a warning; they never abort the rebuild.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut store = Self {
            path,
            entries: HashMap::new(),
        };
        store.rebuild()?;
        Ok(store)
    }

    fn rebuild(&mut self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let reader = BufReader::new(File::open(&self.path)?);
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<LogEntry>(&line) {
                Ok(LogEntry { key, value: Some(v) }) => {
                    self.entries.insert(key, v);
                }
                Ok(LogEntry { key, value: None }) => {
                    self.entries.remove(&key);
                }
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e, "skipping corrupt log line");
                }
            }
        }
        Ok(())
    }

    fn append(&self, entry: &LogEntry) -> Result<()> {
        let mut file = OpenOptions::new().append(true).create(true).open(&self.path)?;
        let line = serde_json::to_string(entry)
            .map_err(|e| Error::InvalidOperation(format!("unencodable entry: {}", e)))?;
        file.write_all(line.as_bytes())?;
        file.write_all(b"\n")?;
        file.flush()?;
        Ok(())
    }

    /// Path of the underlying log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bind `key` to `value`, appending to the log
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if key.is_empty() {
            return Err(Error::InvalidKey("key cannot be empty".to_string()));
        }
        self.append(&LogEntry {
            key: key.to_string(),
            value: Some(value.to_string()),
        })?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Value bound to `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Remove `key` by logging a tombstone; returns whether it existed
    pub fn delete(&mut self, key: &str) -> Result<bool> {
        if !self.entries.contains_key(key) {
            return Ok(false);
        }
        self.append(&LogEntry {
            key: key.to_string(),
            value: None,
        })?;
        self.entries.remove(key);
        Ok(true)
    }

    /// All keys currently bound, in no particular order
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Number of live bindings
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Delete the log file and forget all entries (testing aid)
    pub fn clear_storage(&mut self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        self.entries.clear();
        Ok(())
    }
}
