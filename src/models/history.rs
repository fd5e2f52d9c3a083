//! Calculation history and the bounded newest-first log used by every
//! history surface

use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Capacity of the in-calculator history strip
pub const CALCULATOR_HISTORY_CAPACITY: usize = 10;

/// Capacity of the persisted per-user history
pub const GLOBAL_HISTORY_CAPACITY: usize = 50;

/// Capacity of the persisted activity log
pub const ACTIVITY_LOG_CAPACITY: usize = 100;

/// One completed calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Expression as typed, e.g. `7 + 3`
    pub calculation: String,

    /// Rendered result, e.g. `10`
    pub result: String,

    pub occurred_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(calculation: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            calculation: calculation.into(),
            result: result.into(),
            occurred_at: Utc::now(),
        }
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.calculation, self.result)
    }
}

/// A fixed-capacity list that keeps the newest entry first and evicts the
/// oldest on overflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundedLog<T> {
    capacity: usize,
    entries: VecDeque<T>,
}

impl<T> BoundedLog<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Build from a newest-first list, dropping anything past `capacity`
    pub fn from_newest_first(capacity: usize, entries: Vec<T>) -> Self {
        let mut entries: VecDeque<T> = entries.into();
        entries.truncate(capacity);
        Self { capacity, entries }
    }

    /// Add an entry at the front; returns the evicted entry, if any
    pub fn push(&mut self, entry: T) -> Option<T> {
        if self.capacity == 0 {
            return Some(entry);
        }
        self.entries.push_front(entry);
        if self.entries.len() > self.capacity {
            self.entries.pop_back()
        } else {
            None
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Newest entry
    pub fn latest(&self) -> Option<&T> {
        self.entries.front()
    }

    /// Iterate newest to oldest
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    /// Remove every entry matching the predicate
    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        self.entries.retain(keep);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Newest-first copy of the entries
    pub fn into_vec(self) -> Vec<T> {
        self.entries.into()
    }
}

impl<T: Clone> BoundedLog<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.entries.iter().cloned().collect()
    }
}

impl<'a, T> IntoIterator for &'a BoundedLog<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_display() {
        let entry = HistoryEntry::new("7 + 3", "10");
        assert_eq!(entry.to_string(), "7 + 3 = 10");
    }

    #[test]
    fn test_newest_first() {
        let mut log = BoundedLog::new(3);
        log.push(1);
        log.push(2);
        assert_eq!(log.to_vec(), vec![2, 1]);
        assert_eq!(log.latest(), Some(&2));
    }

    #[test]
    fn test_never_exceeds_capacity() {
        for capacity in [
            CALCULATOR_HISTORY_CAPACITY,
            GLOBAL_HISTORY_CAPACITY,
            ACTIVITY_LOG_CAPACITY,
        ] {
            let mut log = BoundedLog::new(capacity);
            for i in 0..capacity * 3 {
                log.push(i);
                assert!(log.len() <= capacity);
            }
            assert_eq!(log.len(), capacity);
            // Oldest entries were evicted
            assert_eq!(log.latest(), Some(&(capacity * 3 - 1)));
            assert_eq!(log.iter().last(), Some(&(capacity * 2)));
        }
    }

    #[test]
    fn test_push_returns_evicted() {
        let mut log = BoundedLog::new(2);
        assert_eq!(log.push("a"), None);
        assert_eq!(log.push("b"), None);
        assert_eq!(log.push("c"), Some("a"));
    }

    #[test]
    fn test_from_newest_first_truncates() {
        let log = BoundedLog::from_newest_first(2, vec![5, 4, 3]);
        assert_eq!(log.to_vec(), vec![5, 4]);
    }

    #[test]
    fn test_serde_round_trip_keeps_order() {
        let mut log = BoundedLog::new(10);
        log.push(HistoryEntry::new("1 + 1", "2"));
        log.push(HistoryEntry::new("2 + 2", "4"));
        let json = serde_json::to_string(&log).unwrap();
        let back: BoundedLog<HistoryEntry> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, log);
        assert_eq!(back.latest().unwrap().result, "4");
    }
}
