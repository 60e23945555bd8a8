//! Configuration validation
//!
//! Checks run and output settings. Generator input (values and weights) is
//! validated separately when the weighted table is built, so its errors keep
//! their specific kind.

use super::*;
use anyhow::Result;

/// Upper bound on worker threads
const MAX_THREADS: usize = 1024;

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_run(&config.run)?;
    validate_output(&config.output, config.run.mode)?;

    Ok(())
}

/// Validate run configuration
pub fn validate_run(run: &RunConfig) -> Result<()> {
    if run.samples == 0 {
        anyhow::bail!("samples must be at least 1");
    }

    if run.threads > MAX_THREADS {
        anyhow::bail!("threads must be between 0 and {}, got {}", MAX_THREADS, run.threads);
    }

    Ok(())
}

/// Validate output configuration
pub fn validate_output(output: &OutputConfig, mode: RunMode) -> Result<()> {
    if let Some(tolerance) = output.tolerance {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            anyhow::bail!("tolerance must be a positive number of percentage points, got {}", tolerance);
        }
    }

    if output.json_path.is_some() && output.format != OutputFormat::Json {
        anyhow::bail!("json_path requires format = \"json\", got \"{}\"", output.format);
    }

    if mode == RunMode::Stream {
        if output.tolerance.is_some() {
            anyhow::bail!("tolerance applies to summary mode only");
        }
        if output.format == OutputFormat::Json || output.json_path.is_some() {
            anyhow::bail!("JSON output applies to summary mode only; stream mode prints values");
        }
    }

    Ok(())
}
