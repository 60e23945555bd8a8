//! TOML configuration file parsing

use super::*;
use crate::config::cli::Cli;
use crate::config::cli_convert::{
    convert_output_format, convert_run_mode, parse_count, parse_value_list, parse_weight_list,
};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Build the run configuration from CLI arguments
///
/// Starts from the `--config` file when given, otherwise from defaults, then
/// applies CLI overrides.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => parse_toml_file(path)?,
        None => Config::default(),
    };

    merge_cli_with_config(cli, config)
}

/// Merge CLI arguments with TOML configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: Config) -> Result<Config> {
    // Override generator input
    if let Some(values) = &cli.values {
        config.generator.values = Some(parse_value_list(values).context("Invalid --values")?);
    }
    if let Some(weights) = &cli.weights {
        config.generator.weights = Some(parse_weight_list(weights).context("Invalid --weights")?);
    }
    if let Some(seed) = cli.seed {
        config.generator.seed = Some(seed);
    }

    // Override run settings
    if let Some(samples) = &cli.samples {
        config.run.samples = parse_count(samples).context("Invalid --samples")?;
    }
    if let Some(threads) = cli.threads {
        config.run.threads = threads;
    }
    if let Some(mode) = cli.mode {
        config.run.mode = convert_run_mode(mode);
    }

    // Override output settings
    if let Some(format) = cli.format {
        config.output.format = convert_output_format(format);
    }
    if let Some(path) = &cli.json_output {
        config.output.json_path = Some(path.clone());
        // A JSON destination implies JSON output
        config.output.format = OutputFormat::Json;
    }
    if let Some(tolerance) = cli.tolerance {
        config.output.tolerance = Some(tolerance);
    }

    Ok(config)
}
