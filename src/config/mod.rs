//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.
//!
//! A run is described by three sections:
//!
//! - `[generator]`: candidate values, weights, optional seed
//! - `[run]`: how many samples, on how many threads, stream or summary
//! - `[output]`: summary format, JSON destination, deviation tolerance
//!
//! CLI arguments take precedence over the configuration file.

pub mod cli;
pub mod cli_convert;
pub mod toml;
pub mod validator;

use crate::distribution::{InvalidInput, WeightedTable};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Complete run configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Validate the generator inputs and build the shared table
    ///
    /// A missing `values` or `weights` list is reported as a null input.
    pub fn build_table(&self) -> Result<WeightedTable, InvalidInput> {
        WeightedTable::from_optional(self.generator.values.clone(), self.generator.weights.clone())
    }
}

/// Candidate values and their weights
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Candidate values, in selection order
    pub values: Option<Vec<i64>>,
    /// Weights in `[0, 1]`, index-aligned with `values`
    pub weights: Option<Vec<f64>>,
    /// Seed for reproducible runs (random if absent)
    pub seed: Option<u64>,
}

/// Sampling run settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of values to draw
    #[serde(default = "default_samples")]
    pub samples: u64,
    /// Worker threads for summary runs (0 = one per CPU)
    #[serde(default = "default_threads")]
    pub threads: usize,
    /// Stream every value, or only report frequencies
    #[serde(default)]
    pub mode: RunMode,
}

impl RunConfig {
    /// Thread count with 0 resolved to the number of CPUs
    pub fn effective_threads(&self) -> usize {
        if self.threads == 0 {
            num_cpus::get()
        } else {
            self.threads
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            samples: default_samples(),
            threads: default_threads(),
            mode: RunMode::default(),
        }
    }
}

fn default_samples() -> u64 {
    1_000_000
}

fn default_threads() -> usize {
    1
}

/// What a run produces
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Print every drawn value, one per line
    Stream,
    /// Count draws and print observed vs expected shares
    #[default]
    Summary,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Stream => write!(f, "stream"),
            RunMode::Summary => write!(f, "summary"),
        }
    }
}

/// Summary output settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Write the JSON summary here instead of stdout
    pub json_path: Option<PathBuf>,
    /// Fail the run if any share deviates by more than this many percentage points
    pub tolerance: Option<f64>,
}

/// Summary format
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
