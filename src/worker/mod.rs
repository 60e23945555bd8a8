//! Sampling workers
//!
//! A run draws `samples` values from one shared [`WeightedTable`]. In summary
//! mode the draws are split across worker threads; every worker owns its own
//! [`WeightedSampler`] (and PRNG), so no state is shared between threads apart
//! from the immutable table.
//!
//! # Seeding
//!
//! With a base seed, worker `i` is seeded with `base + i` (wrapping). Results
//! are merged by worker id, so a seeded run gives the same counts no matter
//! how rayon schedules the workers.
//!
//! # Example
//!
//! ```
//! use weightgen::config::RunConfig;
//! use weightgen::distribution::WeightedTable;
//! use weightgen::worker::run_summary;
//! use std::sync::Arc;
//!
//! let table = Arc::new(WeightedTable::new(vec![1, 2], vec![0.3, 0.7])?);
//! let run = RunConfig { samples: 10_000, threads: 2, ..Default::default() };
//!
//! let summary = run_summary(table, &run, Some(42))?;
//! assert_eq!(summary.stats().total(), 10_000);
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::config::RunConfig;
use crate::distribution::{Generator, WeightedSampler, WeightedTable};
use crate::stats::aggregator::SampleAggregator;
use crate::stats::FrequencyStats;
use crate::util::time::calculate_rate;
use crate::Result;
use anyhow::Context;
use rayon::prelude::*;
use std::io::{BufWriter, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A single sampling worker
pub struct Worker {
    id: usize,
    sampler: WeightedSampler,
    samples: u64,
}

impl Worker {
    /// Create a worker drawing `samples` values from `table`
    ///
    /// Without a seed the worker's PRNG is seeded from OS entropy.
    pub fn new(id: usize, table: Arc<WeightedTable>, samples: u64, seed: Option<u64>) -> Self {
        let sampler = match seed {
            Some(base) => WeightedSampler::from_table_seeded(table, worker_seed(base, id)),
            None => WeightedSampler::from_table(table),
        };

        Self { id, sampler, samples }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Draw all samples and count them per candidate
    pub fn run(&mut self) -> FrequencyStats {
        let mut stats = FrequencyStats::new(self.sampler.table().len());
        for _ in 0..self.samples {
            stats.record(self.sampler.next_index());
        }
        stats
    }
}

/// Seed for worker `id` derived from a base seed
pub fn worker_seed(base: u64, id: usize) -> u64 {
    base.wrapping_add(id as u64)
}

/// Share of `total` samples assigned to worker `id` out of `workers`
///
/// The remainder goes to the lowest ids, one extra sample each.
pub fn split_samples(total: u64, workers: usize, id: usize) -> u64 {
    let workers = workers as u64;
    let id = id as u64;
    total / workers + u64::from(id < total % workers)
}

/// Result of a summary run
#[derive(Debug)]
pub struct RunSummary {
    pub aggregator: SampleAggregator,
    pub elapsed: Duration,
    pub threads: usize,
    /// Counts merged across all workers
    merged: FrequencyStats,
}

impl RunSummary {
    pub fn new(aggregator: SampleAggregator, elapsed: Duration, threads: usize) -> Self {
        let merged = aggregator.aggregate();
        Self {
            aggregator,
            elapsed,
            threads,
            merged,
        }
    }

    /// Counts merged across all workers
    pub fn stats(&self) -> &FrequencyStats {
        &self.merged
    }

    /// Samples drawn per second
    pub fn rate(&self) -> f64 {
        calculate_rate(self.stats().total(), self.elapsed)
    }
}

/// Draw `run.samples` values across `run.threads` workers and count them
pub fn run_summary(table: Arc<WeightedTable>, run: &RunConfig, seed: Option<u64>) -> Result<RunSummary> {
    let threads = run.effective_threads().max(1);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("Failed to create worker thread pool")?;

    let start = Instant::now();
    let results: Vec<(usize, FrequencyStats)> = pool.install(|| {
        (0..threads)
            .into_par_iter()
            .map(|id| {
                let samples = split_samples(run.samples, threads, id);
                let mut worker = Worker::new(id, Arc::clone(&table), samples, seed);
                (worker.id(), worker.run())
            })
            .collect()
    });
    let elapsed = start.elapsed();

    let mut aggregator = SampleAggregator::new();
    for (id, stats) in results {
        aggregator.add_worker(id, stats);
    }

    Ok(RunSummary::new(aggregator, elapsed, threads))
}

/// Write `samples` values to `out`, one per line, on the calling thread
///
/// Uses the same seed derivation as worker 0, so a seeded stream matches the
/// draws of a seeded single-thread summary run.
pub fn run_stream<W: Write>(
    table: Arc<WeightedTable>,
    samples: u64,
    seed: Option<u64>,
    out: W,
) -> Result<u64> {
    let mut sampler = match seed {
        Some(base) => WeightedSampler::from_table_seeded(table, worker_seed(base, 0)),
        None => WeightedSampler::from_table(table),
    };

    let mut out = BufWriter::new(out);
    for _ in 0..samples {
        writeln!(out, "{}", sampler.next_value()).context("Failed to write value")?;
    }
    out.flush().context("Failed to flush output")?;

    Ok(samples)
}
