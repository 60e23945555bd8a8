//! CLI to Config conversion utilities

use crate::config::{cli, OutputFormat, RunMode};
use anyhow::{Context, Result};

/// Parse a sample count (e.g., "1000", "10k", "1m", "2g") to a number
///
/// Suffixes are decimal: `k` = 1,000, `m` = 1,000,000, `g` = 1,000,000,000.
/// Underscores are ignored, so "1_000_000" is accepted.
pub fn parse_count(s: &str) -> Result<u64> {
    let s = s.trim().to_lowercase().replace('_', "");

    let (num_str, multiplier) = if s.ends_with('k') {
        (s.trim_end_matches('k'), 1_000u64)
    } else if s.ends_with('m') {
        (s.trim_end_matches('m'), 1_000_000)
    } else if s.ends_with('g') {
        (s.trim_end_matches('g'), 1_000_000_000)
    } else {
        (s.as_str(), 1)
    };

    let num: u64 = num_str
        .parse()
        .with_context(|| format!("Invalid count format: {}", s))?;

    num.checked_mul(multiplier)
        .with_context(|| format!("Count too large: {}", s))
}

/// Parse a comma-separated list of integer values
///
/// An empty string yields an empty list so the generator reports it as empty
/// input rather than a parse error.
pub fn parse_value_list(s: &str) -> Result<Vec<i64>> {
    split_list(s)
        .map(|item| {
            item.parse::<i64>()
                .with_context(|| format!("Invalid value: {:?}", item))
        })
        .collect()
}

/// Parse a comma-separated list of weights
///
/// Accepts anything `f64` parses, including `inf` and `NaN`; range checks
/// belong to the generator.
pub fn parse_weight_list(s: &str) -> Result<Vec<f64>> {
    split_list(s)
        .map(|item| {
            item.parse::<f64>()
                .with_context(|| format!("Invalid weight: {:?}", item))
        })
        .collect()
}

fn split_list(s: &str) -> impl Iterator<Item = &str> {
    let s = s.trim();
    let items = if s.is_empty() { None } else { Some(s.split(',')) };
    items.into_iter().flatten().map(str::trim)
}

/// Convert CLI RunMode to config RunMode
pub fn convert_run_mode(mode: cli::RunMode) -> RunMode {
    match mode {
        cli::RunMode::Stream => RunMode::Stream,
        cli::RunMode::Summary => RunMode::Summary,
    }
}

/// Convert CLI OutputFormat to config OutputFormat
pub fn convert_output_format(format: cli::OutputFormat) -> OutputFormat {
    match format {
        cli::OutputFormat::Text => OutputFormat::Text,
        cli::OutputFormat::Json => OutputFormat::Json,
    }
}
