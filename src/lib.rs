//! weightgen - weighted random value generator
//!
//! Draws values from a fixed list of candidates, each chosen with probability
//! proportional to its weight. Useful for simulation, load generation and A/B
//! selection.
//!
//! # Architecture
//!
//! - **Distribution**: validated, normalized weight table and inverse-CDF sampler
//! - **Workers**: thread-confined samplers sharing one immutable table
//! - **Stats**: per-candidate counts and deviation from expected shares
//! - **Config/Output**: CLI + TOML configuration, text and JSON reports

pub mod config;
pub mod distribution;
pub mod output;
pub mod stats;
pub mod util;
pub mod worker;

// Re-export commonly used types
pub use config::Config;
pub use distribution::{Generator, InvalidInput, InvalidInputKind, WeightedSampler, WeightedTable};

/// Result type used throughout weightgen
pub type Result<T> = anyhow::Result<T>;
