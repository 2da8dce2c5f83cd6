//! Helpers for collecting statistics.

use std::collections::*;
use itertools::*;

use crate::branch::*;

/// Counts correct and incorrect predictions made by a single predictor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PerformanceTracker {
    correct: u64,
    incorrect: u64,
}
impl PerformanceTracker {
    pub fn new() -> Self { Self::default() }

    /// Record the result of one prediction.
    pub fn record(&mut self, predicted: Outcome, actual: Outcome) {
        if predicted == actual {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
    }

    pub fn correct(&self) -> u64 { self.correct }
    pub fn incorrect(&self) -> u64 { self.incorrect }
    pub fn total(&self) -> u64 { self.correct + self.incorrect }

    /// Percentage of correct predictions.
    ///
    /// Returns `None` if nothing has been recorded yet.
    pub fn accuracy(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            n => Some(self.correct as f64 / n as f64 * 100.0),
        }
    }

    /// Percentage of incorrect predictions (`100 - accuracy`).
    pub fn misprediction_rate(&self) -> Option<f64> {
        self.accuracy().map(|acc| 100.0 - acc)
    }
}

/// Per-branch statistics gathered while evaluating some predictor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BranchData {
    /// Number of times this branch was encountered.
    pub occ: u64,

    /// Number of correct predictions for this branch.
    pub hits: u64,

    /// Number of times this branch was taken.
    pub taken: u64,
}
impl BranchData {
    /// Number of incorrect predictions for this branch.
    pub fn misses(&self) -> u64 { self.occ - self.hits }

    /// Return the fraction of executions where this branch was taken.
    pub fn taken_rate(&self) -> f64 {
        self.taken as f64 / self.occ as f64
    }
}

/// Container for per-branch statistics (keyed by branch address).
#[derive(Clone, Debug, Default)]
pub struct BranchStats {
    pub data: BTreeMap<u64, BranchData>,
}
impl BranchStats {
    pub fn new() -> Self { Self::default() }

    /// Update per-branch statistics with one prediction.
    pub fn update(&mut self, record: &BranchRecord, predicted: Outcome) {
        let data = self.get_mut(record.addr);
        data.occ += 1;
        if record.is_taken() { data.taken += 1; }
        if predicted == record.outcome { data.hits += 1; }
    }

    /// Returns a reference to data collected for a particular branch.
    pub fn get(&self, addr: u64) -> Option<&BranchData> {
        self.data.get(&addr)
    }

    /// Returns a mutable reference to data collected for a particular branch.
    /// Creates a new entry if one doesn't already exist.
    pub fn get_mut(&mut self, addr: u64) -> &mut BranchData {
        self.data.entry(addr).or_default()
    }

    /// Returns the number of unique observed branches.
    pub fn num_unique_branches(&self) -> usize {
        self.data.len()
    }

    /// Returns the `n` branches with the most mispredictions.
    /// Ties are broken by address.
    pub fn worst_branches(&self, n: usize) -> Vec<(u64, &BranchData)> {
        self.data.iter()
            .filter(|(_, s)| s.misses() > 0)
            .sorted_by(|x, y| {
                y.1.misses().cmp(&x.1.misses()).then(x.0.cmp(y.0))
            })
            .take(n)
            .map(|(addr, s)| (*addr, s))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_tracker_is_undefined() {
        let t = PerformanceTracker::new();
        assert_eq!(t.total(), 0);
        assert_eq!(t.accuracy(), None);
        assert_eq!(t.misprediction_rate(), None);
    }

    #[test]
    fn accuracy_and_rate() {
        let mut t = PerformanceTracker::new();
        t.record(Outcome::T, Outcome::T);
        t.record(Outcome::T, Outcome::T);
        t.record(Outcome::N, Outcome::N);
        t.record(Outcome::N, Outcome::T);
        assert_eq!((t.correct(), t.incorrect()), (3, 1));
        assert_eq!(t.accuracy(), Some(75.0));
        assert_eq!(t.misprediction_rate(), Some(25.0));
    }

    #[test]
    fn worst_branches_sorted_by_misses() {
        let mut s = BranchStats::new();
        for _ in 0..3 {
            s.update(&BranchRecord::new(0x10, true), Outcome::N);
        }
        s.update(&BranchRecord::new(0x20, true), Outcome::N);
        s.update(&BranchRecord::new(0x08, true), Outcome::N);
        s.update(&BranchRecord::new(0x30, false), Outcome::N);

        let worst = s.worst_branches(2);
        assert_eq!(worst.len(), 2);
        assert_eq!(worst[0].0, 0x10);
        assert_eq!(worst[0].1.misses(), 3);
        assert_eq!(worst[1].0, 0x08);
        assert_eq!(s.num_unique_branches(), 4);
        assert_eq!(s.get(0x30).map(|d| d.misses()), Some(0));
    }
}
