//! Weighted random value generation
//!
//! This module turns a fixed list of candidate values and their weights into an
//! endless stream of values, where each value appears with a long-run frequency
//! equal to its share of the total weight.
//!
//! # Components
//!
//! - **[`weighted::WeightedTable`]**: validated, normalized, immutable
//! - **[`weighted::WeightedSampler`]**: a table plus a PRNG
//! - **[`error::InvalidInput`]**: why a table could not be built
//!
//! # Example
//!
//! ```
//! use weightgen::distribution::{Generator, weighted::WeightedSampler};
//!
//! let mut sampler = WeightedSampler::new(vec![-1, 0, 1], vec![0.1, 0.6, 0.3]).unwrap();
//! let value = sampler.next_value();
//! assert!((-1..=1).contains(&value));
//! ```

/// Value generator trait
///
/// Implemented by every sampler that can produce an endless stream of
/// candidate values.
///
/// # Thread Safety
///
/// Generators must be `Send` so they can be moved into worker threads. Each
/// worker owns its own generator; generators are not meant to be shared.
pub trait Generator: Send {
    /// Generate the next value
    ///
    /// Never fails: a generator only exists once its inputs were validated.
    fn next_value(&mut self) -> i64;
}

pub mod error;
pub mod weighted;

pub use error::{InvalidInput, InvalidInputKind};
pub use weighted::{WeightedSampler, WeightedTable};
