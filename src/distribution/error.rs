//! Construction errors for weighted distributions
//!
//! Every failure is an input-validation failure raised while building a
//! [`WeightedTable`](super::weighted::WeightedTable). Once a table exists,
//! sampling from it cannot fail.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Which validation rule rejected the input
///
/// Checks run in declaration order and the first failure wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidInputKind {
    /// The candidate list or the weight list is missing
    NullInput,
    /// The candidate list or the weight list has no elements
    EmptyInput,
    /// Candidate and weight lists differ in length
    LengthMismatch,
    /// A weight is positive or negative infinity
    InfiniteWeight,
    /// A weight is NaN
    NotANumberWeight,
    /// A weight lies outside `[0, 1]`
    ///
    /// The range is checked before normalization, so raw relative weights
    /// such as `[2, 3, 5]` are rejected even though they would normalize
    /// cleanly. This is likely an unintended restriction; it is kept so that
    /// inputs accepted here are accepted everywhere the format is used.
    OutOfRangeWeight,
    /// Every weight is exactly zero
    AllZeroWeight,
}

impl InvalidInputKind {
    /// Stable identifier, used in JSON output and diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NullInput => "null_input",
            Self::EmptyInput => "empty_input",
            Self::LengthMismatch => "length_mismatch",
            Self::InfiniteWeight => "infinite_weight",
            Self::NotANumberWeight => "not_a_number_weight",
            Self::OutOfRangeWeight => "out_of_range_weight",
            Self::AllZeroWeight => "all_zero_weight",
        }
    }
}

impl fmt::Display for InvalidInputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected weighted-distribution input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid input ({kind}): {message}")]
pub struct InvalidInput {
    kind: InvalidInputKind,
    message: String,
}

impl InvalidInput {
    pub fn new(kind: InvalidInputKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn null_input() -> Self {
        Self::new(InvalidInputKind::NullInput, "an input list is missing")
    }

    pub(crate) fn empty_input() -> Self {
        Self::new(InvalidInputKind::EmptyInput, "an input list is empty")
    }

    pub(crate) fn length_mismatch(values: usize, weights: usize) -> Self {
        Self::new(
            InvalidInputKind::LengthMismatch,
            format!("{} values but {} weights", values, weights),
        )
    }

    pub(crate) fn infinite_weight(index: usize) -> Self {
        Self::new(
            InvalidInputKind::InfiniteWeight,
            format!("weight at index {} is infinite", index),
        )
    }

    pub(crate) fn not_a_number_weight(index: usize) -> Self {
        Self::new(
            InvalidInputKind::NotANumberWeight,
            format!("weight at index {} is NaN", index),
        )
    }

    pub(crate) fn out_of_range_weight(index: usize, weight: f64) -> Self {
        Self::new(
            InvalidInputKind::OutOfRangeWeight,
            format!("weight at index {} is {}, expected a value in [0, 1]", index, weight),
        )
    }

    pub(crate) fn all_zero_weight() -> Self {
        Self::new(InvalidInputKind::AllZeroWeight, "all weights are zero")
    }

    /// Which rule rejected the input
    pub fn kind(&self) -> InvalidInputKind {
        self.kind
    }

    /// Human-readable detail, without the kind prefix
    pub fn message(&self) -> &str {
        &self.message
    }
}
