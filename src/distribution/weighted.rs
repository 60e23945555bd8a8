//! Weighted discrete distribution
//!
//! Selects one value out of a fixed candidate list, where each candidate is
//! chosen with probability proportional to its weight.
//!
//! # Design
//!
//! The distribution is split in two:
//!
//! - [`WeightedTable`]: the validated candidates and their normalized weights.
//!   Immutable once built, and a pure function of a uniform draw
//!   ([`WeightedTable::select`]).
//! - [`WeightedSampler`]: a table plus a PRNG. Each call draws `u` in `[0, 1)`
//!   and maps it through the table.
//!
//! The table is shared behind an `Arc`, so many samplers (one per worker
//! thread) can read it without synchronization.
//!
//! # Selection
//!
//! Inverse CDF by linear scan: walk the normalized weights in index order,
//! accumulating a running sum, and stop at the first candidate whose
//! cumulative weight reaches `u`. Cost is O(n) per draw.
//!
//! # Example
//!
//! ```
//! use weightgen::distribution::{Generator, weighted::WeightedSampler};
//!
//! let mut sampler = WeightedSampler::with_seed(vec![1, 2, 3], vec![0.2, 0.3, 0.5], 42).unwrap();
//! for _ in 0..10 {
//!     let value = sampler.next_value();
//!     assert!([1, 2, 3].contains(&value));
//! }
//! ```

use super::error::InvalidInput;
use super::Generator;
use rand::Rng;
use rand::RngCore;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::sync::Arc;

/// Smallest accepted raw weight
const LOW_WEIGHT: f64 = 0.0;

/// Largest accepted raw weight
const HIGH_WEIGHT: f64 = 1.0;

/// Validated candidates with their normalized weights
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedTable {
    values: Vec<i64>,
    normalized: Vec<f64>,

    /// Index of the last candidate with a non-zero normalized weight
    last_positive: usize,
}

impl WeightedTable {
    /// Build a table from candidate values and index-aligned weights
    ///
    /// Weights must be finite, in `[0, 1]`, and not all zero. They are
    /// normalized to sum to 1.
    pub fn new(values: Vec<i64>, weights: Vec<f64>) -> Result<Self, InvalidInput> {
        Self::from_optional(Some(values), Some(weights))
    }

    /// Build a table from inputs that may be missing
    ///
    /// A missing list is reported as
    /// [`InvalidInputKind::NullInput`](super::error::InvalidInputKind::NullInput)
    /// before any other check runs. Configuration layers use this directly so
    /// an absent `values` or `weights` key maps onto the same error.
    pub fn from_optional(
        values: Option<Vec<i64>>,
        weights: Option<Vec<f64>>,
    ) -> Result<Self, InvalidInput> {
        let (values, weights) = match (values, weights) {
            (Some(values), Some(weights)) => (values, weights),
            _ => return Err(InvalidInput::null_input()),
        };

        if values.is_empty() || weights.is_empty() {
            return Err(InvalidInput::empty_input());
        }

        if values.len() != weights.len() {
            return Err(InvalidInput::length_mismatch(values.len(), weights.len()));
        }

        // Left-to-right sum; keep this order so normalized weights are reproducible
        let mut weight_sum = 0.0;
        for (index, &weight) in weights.iter().enumerate() {
            if weight.is_infinite() {
                return Err(InvalidInput::infinite_weight(index));
            }
            if weight.is_nan() {
                return Err(InvalidInput::not_a_number_weight(index));
            }
            if weight < LOW_WEIGHT || weight > HIGH_WEIGHT {
                return Err(InvalidInput::out_of_range_weight(index, weight));
            }
            weight_sum += weight;
        }

        if weight_sum == 0.0 {
            return Err(InvalidInput::all_zero_weight());
        }

        let normalized = normalize(&weights, weight_sum);

        // The largest weight is at least sum/n, so some entry is positive
        let last_positive = normalized
            .iter()
            .rposition(|&p| p > 0.0)
            .unwrap_or(0);

        Ok(Self {
            values,
            normalized,
            last_positive,
        })
    }

    /// Candidate values in construction order
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Normalized weights, index-aligned with [`values`](Self::values)
    pub fn normalized(&self) -> &[f64] {
        &self.normalized
    }

    /// Number of candidates (always at least 1)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`: construction rejects empty input
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Map a uniform draw `u` in `[0, 1)` to a candidate index
    ///
    /// A draw of exactly 0 selects index 0, even when that candidate has zero
    /// weight. Any `u > 0` only ever selects candidates with positive weight.
    /// If rounding leaves the total cumulative weight just below `u`, the last
    /// positive-weight candidate is selected.
    #[inline]
    pub fn select_index(&self, u: f64) -> usize {
        let mut cumulative = 0.0;
        let mut index = 0;

        while cumulative < u && index < self.normalized.len() {
            cumulative += self.normalized[index];
            index += 1;
        }

        if cumulative < u {
            return self.last_positive;
        }

        // index is 0 only when the loop never ran (u <= 0)
        index.saturating_sub(1)
    }

    /// Map a uniform draw `u` in `[0, 1)` to a candidate value
    #[inline]
    pub fn select(&self, u: f64) -> i64 {
        self.values[self.select_index(u)]
    }
}

/// Scale weights by the reciprocal of their sum
fn normalize(weights: &[f64], weight_sum: f64) -> Vec<f64> {
    let coefficient = 1.0 / weight_sum;
    weights.iter().map(|w| w * coefficient).collect()
}

/// Weighted value generator
///
/// Owns its PRNG, so one sampler per thread. Share the underlying
/// [`WeightedTable`] between samplers with [`WeightedSampler::with_rng`] or
/// [`WeightedSampler::from_table_seeded`].
#[derive(Debug, Clone)]
pub struct WeightedSampler<R = Xoshiro256PlusPlus> {
    table: Arc<WeightedTable>,
    rng: R,
}

impl WeightedSampler<Xoshiro256PlusPlus> {
    /// Create a sampler with a random seed
    pub fn new(values: Vec<i64>, weights: Vec<f64>) -> Result<Self, InvalidInput> {
        let table = WeightedTable::new(values, weights)?;
        Ok(Self::from_table(Arc::new(table)))
    }

    /// Create a sampler with a specific seed
    ///
    /// Useful for reproducible tests.
    pub fn with_seed(values: Vec<i64>, weights: Vec<f64>, seed: u64) -> Result<Self, InvalidInput> {
        let table = WeightedTable::new(values, weights)?;
        Ok(Self::from_table_seeded(Arc::new(table), seed))
    }

    /// Sample from an existing table with a random seed
    pub fn from_table(table: Arc<WeightedTable>) -> Self {
        Self::with_rng(table, Xoshiro256PlusPlus::from_entropy())
    }

    /// Sample from an existing table with a specific seed
    pub fn from_table_seeded(table: Arc<WeightedTable>, seed: u64) -> Self {
        Self::with_rng(table, Xoshiro256PlusPlus::seed_from_u64(seed))
    }
}

impl<R: RngCore> WeightedSampler<R> {
    /// Sample from an existing table using any random source
    pub fn with_rng(table: Arc<WeightedTable>, rng: R) -> Self {
        Self { table, rng }
    }

    pub fn table(&self) -> &WeightedTable {
        &self.table
    }

    /// Draw the index of the next candidate
    #[inline]
    pub fn next_index(&mut self) -> usize {
        let u: f64 = self.rng.gen();
        self.table.select_index(u)
    }
}

impl<R: RngCore + Send> Generator for WeightedSampler<R> {
    #[inline]
    fn next_value(&mut self) -> i64 {
        let index = self.next_index();
        self.table.values[index]
    }
}

/// Endless stream of values; `next()` never returns `None`
impl<R: RngCore> Iterator for WeightedSampler<R> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let index = self.next_index();
        Some(self.table.values[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::error::InvalidInputKind;
    use rand::rngs::mock::StepRng;

    /// Replays a fixed list of uniform draws
    struct FixedDraws {
        draws: Vec<f64>,
        pos: usize,
    }

    impl FixedDraws {
        fn new(draws: &[f64]) -> Self {
            Self {
                draws: draws.to_vec(),
                pos: 0,
            }
        }
    }

    impl RngCore for FixedDraws {
        fn next_u32(&mut self) -> u32 {
            (self.next_u64() >> 32) as u32
        }

        fn next_u64(&mut self) -> u64 {
            // rand turns a u64 into an f64 in [0, 1) from its top 53 bits
            let u = self.draws[self.pos % self.draws.len()];
            self.pos += 1;
            ((u * (1u64 << 53) as f64) as u64) << 11
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(8) {
                let bytes = self.next_u64().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    fn kind_of(values: Option<Vec<i64>>, weights: Option<Vec<f64>>) -> InvalidInputKind {
        WeightedTable::from_optional(values, weights)
            .expect_err("input should be rejected")
            .kind()
    }

    #[test]
    fn test_weighted_basic() {
        let mut sampler = WeightedSampler::new(vec![1, 2, 3], vec![0.1, 0.31, 0.4]).unwrap();

        for _ in 0..100 {
            let value = sampler.next_value();
            assert!([1, 2, 3].contains(&value));
        }
    }

    #[test]
    fn test_weighted_null_input() {
        assert_eq!(kind_of(None, Some(vec![0.5])), InvalidInputKind::NullInput);
        assert_eq!(kind_of(Some(vec![1, 2, 3]), None), InvalidInputKind::NullInput);
        assert_eq!(kind_of(None, None), InvalidInputKind::NullInput);
        // Missing wins over empty
        assert_eq!(kind_of(Some(vec![]), None), InvalidInputKind::NullInput);
    }

    #[test]
    fn test_weighted_empty_input() {
        assert_eq!(
            kind_of(Some(vec![]), Some(vec![0.1, 0.5, 0.4])),
            InvalidInputKind::EmptyInput
        );
        assert_eq!(
            kind_of(Some(vec![1, 2, 3]), Some(vec![])),
            InvalidInputKind::EmptyInput
        );
    }

    #[test]
    fn test_weighted_length_mismatch() {
        let err = WeightedTable::new(vec![1, 2, 3], vec![0.1, 0.5]).unwrap_err();
        assert_eq!(err.kind(), InvalidInputKind::LengthMismatch);
    }

    #[test]
    fn test_weighted_infinite_weight() {
        let err = WeightedTable::new(vec![1, 2, 3], vec![f64::INFINITY, 0.5, 0.1]).unwrap_err();
        assert_eq!(err.kind(), InvalidInputKind::InfiniteWeight);

        let err = WeightedTable::new(vec![1, 2, 3], vec![0.5, 0.1, f64::NEG_INFINITY]).unwrap_err();
        assert_eq!(err.kind(), InvalidInputKind::InfiniteWeight);
        assert!(err.message().contains("index 2"));
    }

    #[test]
    fn test_weighted_nan_weight() {
        let err = WeightedTable::new(vec![1, 2, 3], vec![f64::NAN, 0.5, 0.1]).unwrap_err();
        assert_eq!(err.kind(), InvalidInputKind::NotANumberWeight);
    }

    #[test]
    fn test_weighted_out_of_range_weight() {
        let err = WeightedTable::new(vec![1, 2, 3], vec![0.1, 1.5, 0.1]).unwrap_err();
        assert_eq!(err.kind(), InvalidInputKind::OutOfRangeWeight);

        let err = WeightedTable::new(vec![1, 2, 3], vec![-0.1, 0.5, 0.1]).unwrap_err();
        assert_eq!(err.kind(), InvalidInputKind::OutOfRangeWeight);
    }

    #[test]
    fn test_weighted_all_zero_weights() {
        let err = WeightedTable::new(vec![1, 2, 3], vec![0.0, 0.0, 0.0]).unwrap_err();
        assert_eq!(err.kind(), InvalidInputKind::AllZeroWeight);

        let err = WeightedTable::new(vec![1, 2], vec![-0.0, 0.0]).unwrap_err();
        assert_eq!(err.kind(), InvalidInputKind::AllZeroWeight);
    }

    #[test]
    fn test_weighted_first_failure_wins() {
        // Scan stops at the first bad weight, in index order
        let err = WeightedTable::new(vec![1, 2], vec![f64::NAN, f64::INFINITY]).unwrap_err();
        assert_eq!(err.kind(), InvalidInputKind::NotANumberWeight);

        let err = WeightedTable::new(vec![1, 2], vec![2.0, f64::NAN]).unwrap_err();
        assert_eq!(err.kind(), InvalidInputKind::OutOfRangeWeight);

        // Length is checked before weights
        let err = WeightedTable::new(vec![1, 2, 3], vec![f64::NAN, 0.5]).unwrap_err();
        assert_eq!(err.kind(), InvalidInputKind::LengthMismatch);
    }

    #[test]
    fn test_weighted_raw_weights_above_one_rejected() {
        let err = WeightedTable::new(vec![1, 2, 3], vec![1.0, 1.0, 2.0]).unwrap_err();
        assert_eq!(err.kind(), InvalidInputKind::OutOfRangeWeight);
        assert!(err.message().contains("index 2"));
    }

    #[test]
    fn test_weighted_normalization() {
        let table = WeightedTable::new(vec![1, 2, 3], vec![0.2, 0.2, 0.4]).unwrap();
        let reference = WeightedTable::new(vec![1, 2, 3], vec![0.25, 0.25, 0.5]).unwrap();

        let sum: f64 = table.normalized().iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);

        for (a, b) in table.normalized().iter().zip(reference.normalized()) {
            assert!((a - b).abs() < 1e-12, "{} != {}", a, b);
        }
    }

    #[test]
    fn test_weighted_select_deterministic() {
        let table = WeightedTable::new(vec![1, 2, 3], vec![0.1, 0.31, 0.59]).unwrap();

        assert_eq!(table.select(0.05), 1);
        assert_eq!(table.select(0.15), 2);
        assert_eq!(table.select(0.99), 3);
    }

    #[test]
    fn test_weighted_zero_draw_selects_first() {
        // A draw of exactly 0 selects index 0 even when it has zero weight
        let table = WeightedTable::new(vec![10, 20, 30], vec![0.0, 0.5, 0.5]).unwrap();
        assert_eq!(table.select_index(0.0), 0);
        assert_eq!(table.select(0.0), 10);
    }

    #[test]
    fn test_weighted_zero_weight_never_selected() {
        let table = WeightedTable::new(vec![10, 20, 30, 40], vec![0.0, 0.5, 0.0, 0.5]).unwrap();

        for step in 1..1000 {
            let u = step as f64 / 1000.0;
            let value = table.select(u);
            assert!(value == 20 || value == 40, "u={} selected {}", u, value);
        }
    }

    #[test]
    fn test_weighted_draw_past_total_selects_last_positive() {
        let table = WeightedTable::new(vec![1, 2, 3], vec![0.3, 0.7, 0.0]).unwrap();

        // Cumulative total is 1.0; a draw above it models rounding shortfall
        assert_eq!(table.select_index(1.5), 1);
        assert_eq!(table.select(1.5), 2);
    }

    #[test]
    fn test_weighted_duplicate_values() {
        let table = WeightedTable::new(vec![5, 5, 6], vec![0.25, 0.25, 0.5]).unwrap();

        // Each position keeps its own weight; order decides which 5 is hit
        assert_eq!(table.select_index(0.1), 0);
        assert_eq!(table.select_index(0.3), 1);
        assert_eq!(table.select(0.3), 5);
        assert_eq!(table.select_index(0.6), 2);

        let mut stats = crate::stats::FrequencyStats::new(table.len());
        for u in [0.1, 0.2, 0.3, 0.4, 0.45, 0.6] {
            stats.record(table.select_index(u));
        }
        assert_eq!(stats.counts(), &[2, 3, 1]);

        let shares = stats.compare(&table);
        assert_eq!(shares[0].value, 5);
        assert_eq!(shares[1].value, 5);
        assert!((shares[0].expected_pct - 25.0).abs() < 1e-9);
        assert!((shares[1].expected_pct - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_weighted_single_candidate() {
        let mut sampler = WeightedSampler::new(vec![7], vec![1.0]).unwrap();
        for _ in 0..100 {
            assert_eq!(sampler.next_value(), 7);
        }

        let mut sampler = WeightedSampler::new(vec![7], vec![0.01]).unwrap();
        for _ in 0..100 {
            assert_eq!(sampler.next_value(), 7);
        }
    }

    #[test]
    fn test_weighted_fixed_draws() {
        let table = Arc::new(WeightedTable::new(vec![1, 2, 3], vec![0.1, 0.31, 0.59]).unwrap());
        let mut sampler = WeightedSampler::with_rng(table, FixedDraws::new(&[0.05, 0.15, 0.99, 0.0]));

        assert_eq!(sampler.next_value(), 1);
        assert_eq!(sampler.next_value(), 2);
        assert_eq!(sampler.next_value(), 3);
        assert_eq!(sampler.next_value(), 1);
    }

    #[test]
    fn test_weighted_step_rng_zero_draw() {
        // StepRng(0, 0) always yields 0, so every draw is exactly 0.0
        let table = Arc::new(WeightedTable::new(vec![5, 6], vec![0.0, 1.0]).unwrap());
        let mut sampler = WeightedSampler::with_rng(table, StepRng::new(0, 0));

        assert_eq!(sampler.next_value(), 5);
    }

    #[test]
    fn test_weighted_seeded() {
        let mut sampler1 = WeightedSampler::with_seed(vec![1, 2, 3], vec![0.2, 0.3, 0.5], 12345).unwrap();
        let mut sampler2 = WeightedSampler::with_seed(vec![1, 2, 3], vec![0.2, 0.3, 0.5], 12345).unwrap();

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(sampler1.next_value(), sampler2.next_value());
        }
    }

    #[test]
    fn test_weighted_iterator() {
        let sampler = WeightedSampler::with_seed(vec![4, 5], vec![0.5, 0.5], 7).unwrap();
        let values: Vec<i64> = sampler.take(50).collect();

        assert_eq!(values.len(), 50);
        assert!(values.iter().all(|v| *v == 4 || *v == 5));
    }

    #[test]
    fn test_weighted_convergence() {
        let values = vec![-1, 0, 1, 2, 3];
        let weights = vec![0.01, 0.3, 0.58, 0.1, 0.01];
        let samples = 1_000_000;

        let mut sampler = WeightedSampler::with_seed(values.clone(), weights.clone(), 42).unwrap();
        let mut counts = vec![0u64; values.len()];

        for _ in 0..samples {
            counts[sampler.next_index()] += 1;
        }

        let expected = sampler.table().normalized().to_vec();
        for (i, count) in counts.iter().enumerate() {
            let observed_pct = *count as f64 / samples as f64 * 100.0;
            let expected_pct = expected[i] * 100.0;
            assert!(
                (observed_pct - expected_pct).abs() <= 1.0,
                "value {}: observed {:.3}% expected {:.3}%",
                values[i],
                observed_pct,
                expected_pct
            );
        }
    }

    #[test]
    fn test_weighted_shared_table() {
        let table = Arc::new(WeightedTable::new(vec![1, 2], vec![0.5, 0.5]).unwrap());
        let mut a = WeightedSampler::from_table_seeded(Arc::clone(&table), 1);
        let mut b = WeightedSampler::from_table_seeded(Arc::clone(&table), 1);

        assert_eq!(Arc::strong_count(&table), 3);
        assert_eq!(a.next_value(), b.next_value());
    }
}
