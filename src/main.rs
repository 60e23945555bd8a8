//! weightgen CLI entry point

use anyhow::{Context, Result};
use std::io;
use std::sync::Arc;
use std::time::Instant;
use weightgen::config::{cli::Cli, toml::load_config, validator, Config, OutputFormat, RunMode};
use weightgen::output::{json, text};
use weightgen::worker;
use weightgen::WeightedTable;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    cli.validate()?;

    let config_start = Instant::now();
    let config = load_config(&cli)?;
    validator::validate_config(&config).context("Configuration validation failed")?;
    if cli.debug {
        eprintln!(
            "DEBUG TIMING: Config build: {:.3}s",
            config_start.elapsed().as_secs_f64()
        );
    }

    let table = config.build_table().context("Invalid generator input")?;
    if cli.debug {
        eprintln!(
            "DEBUG: {} candidates, mode={}, samples={}, seed={:?}",
            table.len(),
            config.run.mode,
            config.run.samples,
            config.generator.seed
        );
    }

    if cli.dry_run {
        text::print_distribution(&table).context("Failed to write distribution")?;
        println!();
        println!("Dry run mode - configuration validated successfully");
        return Ok(());
    }

    let table = Arc::new(table);
    match config.run.mode {
        RunMode::Stream => run_stream(table, &config, cli.debug),
        RunMode::Summary => run_summary(table, &config, cli.debug),
    }
}

/// Print every drawn value to stdout
fn run_stream(table: Arc<WeightedTable>, config: &Config, debug: bool) -> Result<()> {
    if debug && config.run.threads != 1 {
        eprintln!("DEBUG: stream mode runs on one thread, ignoring threads={}", config.run.threads);
    }

    let start = Instant::now();
    let stdout = io::stdout();
    let written = worker::run_stream(table, config.run.samples, config.generator.seed, stdout.lock())?;
    if debug {
        eprintln!(
            "DEBUG TIMING: Streamed {} values in {:.3}s",
            written,
            start.elapsed().as_secs_f64()
        );
    }

    Ok(())
}

/// Count draws across workers and report observed vs expected shares
fn run_summary(table: Arc<WeightedTable>, config: &Config, debug: bool) -> Result<()> {
    let summary = worker::run_summary(Arc::clone(&table), &config.run, config.generator.seed)?;
    if debug {
        eprintln!(
            "DEBUG TIMING: Sampling: {:.3}s on {} threads",
            summary.elapsed.as_secs_f64(),
            summary.threads
        );
    }

    match config.output.format {
        OutputFormat::Text => {
            text::print_results(&summary, &table, config).context("Failed to write results")?
        }
        OutputFormat::Json => {
            let document = json::build_json_summary(&summary, &table, config);
            match &config.output.json_path {
                Some(path) => {
                    json::write_json_output(path, &document, true)?;
                    if debug {
                        eprintln!("DEBUG: JSON summary written to {}", path.display());
                    }
                }
                None => println!("{}", json::to_json_string(&document, true)?),
            }
        }
    }

    if let Some(tolerance) = config.output.tolerance {
        let max_deviation = summary.stats().max_deviation_pp(&table);
        if max_deviation > tolerance {
            anyhow::bail!(
                "observed shares deviate by {:.4} pp, above tolerance {:.4} pp",
                max_deviation,
                tolerance
            );
        }
    }

    Ok(())
}
