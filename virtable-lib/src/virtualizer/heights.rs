//! Keyed row heights with lazily rebuilt prefix sums.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Cache entries are pruned once they outnumber twice the rows, but never
/// below this many.
const MIN_CACHE_ENTRIES: usize = 256;

/// Row heights for one row sequence.
///
/// `cumulative[i]` is the offset where row `i` starts and
/// `cumulative[len]` is the total height. Entries past `valid` are stale and
/// are rebuilt on the next [`Heights::refresh`].
#[derive(Debug, Clone)]
pub(super) struct Heights<K> {
    keys: Vec<K>,
    measured: HashMap<K, u32>,
    cumulative: Vec<u64>,
    valid: usize,
    estimate: u32,
}

impl<K: Clone + Eq + Hash> Heights<K> {
    pub fn new(estimate: u32) -> Self {
        Self {
            keys: Vec::new(),
            measured: HashMap::new(),
            cumulative: vec![0],
            valid: 0,
            estimate,
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn key(&self, index: usize) -> Option<&K> {
        self.keys.get(index)
    }

    /// Replace the row sequence. Measurements are kept by key.
    pub fn set_keys(&mut self, keys: Vec<K>) {
        self.keys = keys;
        self.valid = 0;
        if self.measured.len() > (self.keys.len() * 2).max(MIN_CACHE_ENTRIES) {
            let live: HashSet<&K> = self.keys.iter().collect();
            self.measured.retain(|key, _| live.contains(key));
        }
    }

    /// Record a measured height. Returns whether anything changed.
    pub fn set(&mut self, index: usize, size: u32) -> bool {
        let Some(key) = self.keys.get(index) else {
            return false;
        };
        if self.measured.get(key) == Some(&size) {
            return false;
        }
        self.measured.insert(key.clone(), size);
        self.valid = self.valid.min(index);
        true
    }

    pub fn clear_measurements(&mut self) {
        self.measured.clear();
        self.valid = 0;
    }

    pub fn measured_len(&self) -> usize {
        self.measured.len()
    }

    /// Height of the row at `index`, measured or estimated.
    pub fn size(&self, index: usize) -> u32 {
        self.keys
            .get(index)
            .and_then(|key| self.measured.get(key))
            .copied()
            .unwrap_or(self.estimate)
    }

    /// Rebuild stale prefix sums.
    pub fn refresh(&mut self) {
        if self.valid == self.keys.len() && self.cumulative.len() == self.keys.len() + 1 {
            return;
        }
        self.cumulative.truncate(self.valid + 1);
        let mut total = self.cumulative[self.valid];
        for index in self.valid..self.keys.len() {
            total += u64::from(self.size(index));
            self.cumulative.push(total);
        }
        self.valid = self.keys.len();
    }

    /// Offset where row `index` starts. Requires a prior `refresh`.
    pub fn start(&self, index: usize) -> u64 {
        let last = self.cumulative.len() - 1;
        self.cumulative[index.min(last)]
    }

    /// Total height. Requires a prior `refresh`.
    pub fn total(&self) -> u64 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    /// Row containing offset `y`. O(log n). Requires a prior `refresh`.
    ///
    /// Offsets past the end return the last row.
    pub fn index_at(&self, y: u64) -> usize {
        self.cumulative
            .partition_point(|&h| h <= y)
            .saturating_sub(1)
            .min(self.keys.len().saturating_sub(1))
    }

    /// Number of rows starting before offset `y`. Requires a prior `refresh`.
    pub fn count_starting_before(&self, y: u64) -> usize {
        self.cumulative
            .partition_point(|&h| h < y)
            .min(self.keys.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heights(n: u32) -> Heights<u32> {
        let mut h = Heights::new(10);
        h.set_keys((0..n).collect());
        h.refresh();
        h
    }

    #[test]
    fn uniform_estimates() {
        let h = heights(4);
        assert_eq!(h.total(), 40);
        assert_eq!(h.start(2), 20);
        assert_eq!(h.index_at(0), 0);
        assert_eq!(h.index_at(19), 1);
        assert_eq!(h.index_at(20), 2);
        assert_eq!(h.index_at(1000), 3);
    }

    #[test]
    fn measurement_invalidates_suffix_only() {
        let mut h = heights(4);
        assert!(h.set(2, 25));
        assert_eq!(h.valid, 2);
        h.refresh();
        assert_eq!(h.start(2), 20);
        assert_eq!(h.start(3), 45);
        assert_eq!(h.total(), 55);
        assert!(!h.set(2, 25));
    }

    #[test]
    fn measurements_follow_keys() {
        let mut h = heights(3);
        h.set(0, 30);
        h.set_keys(vec![7, 0]);
        h.refresh();
        assert_eq!(h.size(0), 10);
        assert_eq!(h.size(1), 30);
        assert_eq!(h.total(), 40);
    }

    #[test]
    fn empty_sequence() {
        let mut h: Heights<u32> = Heights::new(10);
        h.refresh();
        assert_eq!(h.total(), 0);
        assert_eq!(h.len(), 0);
        assert!(!h.set(0, 5));
    }
}
