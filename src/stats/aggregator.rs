//! Statistics aggregation
//!
//! Collects per-worker frequency counts and merges them into one aggregate
//! view, keeping the per-worker counts for the JSON report.
//!
//! # Example
//!
//! ```
//! use weightgen::stats::{FrequencyStats, aggregator::SampleAggregator};
//!
//! let mut worker0 = FrequencyStats::new(2);
//! worker0.record(0);
//!
//! let mut worker1 = FrequencyStats::new(2);
//! worker1.record(1);
//! worker1.record(1);
//!
//! let mut aggregator = SampleAggregator::new();
//! aggregator.add_worker(0, worker0);
//! aggregator.add_worker(1, worker1);
//!
//! let aggregate = aggregator.aggregate();
//! assert_eq!(aggregate.total(), 3);
//! assert_eq!(aggregate.counts(), &[1, 2]);
//! ```

use crate::stats::FrequencyStats;
use std::collections::BTreeMap;

/// Frequency counts for multiple workers
#[derive(Debug, Default)]
pub struct SampleAggregator {
    /// Per-worker counts (worker_id → stats), ordered by worker id
    workers: BTreeMap<usize, FrequencyStats>,
}

impl SampleAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add counts from a worker, replacing any earlier counts for that id
    pub fn add_worker(&mut self, worker_id: usize, stats: FrequencyStats) {
        self.workers.insert(worker_id, stats);
    }

    pub fn num_workers(&self) -> usize {
        self.workers.len()
    }

    /// Merge all workers into one view
    pub fn aggregate(&self) -> FrequencyStats {
        let mut aggregate = FrequencyStats::default();
        for stats in self.workers.values() {
            aggregate.merge(stats);
        }
        aggregate
    }

    pub fn worker_stats(&self, worker_id: usize) -> Option<&FrequencyStats> {
        self.workers.get(&worker_id)
    }

    /// Per-worker counts in ascending worker id order
    pub fn per_worker(&self) -> impl Iterator<Item = (usize, &FrequencyStats)> {
        self.workers.iter().map(|(id, stats)| (*id, stats))
    }
}
