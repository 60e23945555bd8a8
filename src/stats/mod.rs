//! Sampling statistics
//!
//! Counts how often each candidate was drawn and compares the observed share of
//! every candidate with its expected (normalized) share.
//!
//! Counts are kept per candidate index, not per value: the candidate list may
//! contain duplicates and each position carries its own weight.
//!
//! # Example
//!
//! ```
//! use weightgen::stats::FrequencyStats;
//!
//! let mut stats = FrequencyStats::new(3);
//! stats.record(0);
//! stats.record(2);
//! stats.record(2);
//!
//! assert_eq!(stats.total(), 3);
//! assert_eq!(stats.count(2), 2);
//! ```

pub mod aggregator;

use crate::distribution::WeightedTable;
use serde::{Deserialize, Serialize};

/// Per-candidate draw counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyStats {
    /// Draws per candidate index
    counts: Vec<u64>,

    /// Total number of draws
    total: u64,
}

impl FrequencyStats {
    /// Create empty statistics for `candidates` candidates
    pub fn new(candidates: usize) -> Self {
        Self {
            counts: vec![0; candidates],
            total: 0,
        }
    }

    /// Record one draw of the candidate at `index`
    ///
    /// Hot path: called once per sample.
    #[inline(always)]
    pub fn record(&mut self, index: usize) {
        self.counts[index] += 1;
        self.total += 1;
    }

    /// Add another set of counts into this one
    ///
    /// Both sides must describe the same candidate list. An empty
    /// `FrequencyStats::default()` adopts the other side's shape.
    pub fn merge(&mut self, other: &FrequencyStats) {
        if self.counts.len() < other.counts.len() {
            self.counts.resize(other.counts.len(), 0);
        }
        for (mine, theirs) in self.counts.iter_mut().zip(&other.counts) {
            *mine += theirs;
        }
        self.total += other.total;
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Draws of the candidate at `index` (0 if out of range)
    pub fn count(&self, index: usize) -> u64 {
        self.counts.get(index).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Observed fraction of draws for `index`, in `[0, 1]`
    pub fn share(&self, index: usize) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(index) as f64 / self.total as f64
    }

    /// Compare observed shares against the table's normalized weights
    pub fn compare(&self, table: &WeightedTable) -> Vec<CandidateShare> {
        table
            .values()
            .iter()
            .zip(table.normalized())
            .enumerate()
            .map(|(index, (&value, &expected))| {
                let expected_pct = expected * 100.0;
                let observed_pct = self.share(index) * 100.0;
                CandidateShare {
                    index,
                    value,
                    count: self.count(index),
                    expected_pct,
                    observed_pct,
                    deviation_pp: observed_pct - expected_pct,
                }
            })
            .collect()
    }

    /// Largest absolute deviation between observed and expected share,
    /// in percentage points
    pub fn max_deviation_pp(&self, table: &WeightedTable) -> f64 {
        self.compare(table)
            .iter()
            .map(|share| share.deviation_pp.abs())
            .fold(0.0, f64::max)
    }
}

/// Observed vs expected share of a single candidate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateShare {
    pub index: usize,
    pub value: i64,
    pub count: u64,
    /// Normalized weight, as a percentage
    pub expected_pct: f64,
    /// Observed share of draws, as a percentage
    pub observed_pct: f64,
    /// `observed_pct - expected_pct`
    pub deviation_pp: f64,
}
