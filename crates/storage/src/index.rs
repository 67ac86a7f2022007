//! Ordered key -> value index
//!
//! The in-memory source of truth for reads. Backed by a BTreeMap, which
//! gives unique keys, O(log n) mutation, and ordered traversal in
//! byte-lexicographic key order. Range scans are inclusive on both sides
//! with the empty string meaning unbounded on that side.

use std::collections::BTreeMap;
use std::ops::Bound;

/// Ordered map of key -> value
///
/// Keys are unique and totally ordered; iteration between two bounds is
/// monotone non-decreasing. The index knows nothing about TTLs or
/// transactions; callers layer visibility on top.
#[derive(Debug, Default)]
pub struct OrderedIndex {
    map: BTreeMap<String, String>,
}

impl OrderedIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    /// Establish the binding `key -> value`, replacing any existing value
    pub fn set(&mut self, key: &str, value: &str) {
        self.map.insert(key.to_string(), value.to_string());
    }

    /// Look up the value bound to `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    /// Remove `key`; returns true iff it was present
    pub fn delete(&mut self, key: &str) -> bool {
        self.map.remove(key).is_some()
    }

    /// All keys `k` with `start <= k <= end`, ascending
    ///
    /// An empty `start` means unbounded below, an empty `end` unbounded
    /// above. Inverted bounds yield an empty result rather than a panic
    /// from the underlying range query.
    pub fn range_scan(&self, start: &str, end: &str) -> Vec<String> {
        if !start.is_empty() && !end.is_empty() && start > end {
            return Vec::new();
        }
        let lower = if start.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Included(start)
        };
        let upper = if end.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Included(end)
        };
        self.map
            .range::<str, _>((lower, upper))
            .map(|(k, _)| k.clone())
            .collect()
    }

    /// Number of live bindings
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
