//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Run mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    /// Print every drawn value, one per line
    Stream,
    /// Print observed vs expected frequencies (default)
    Summary,
}

/// Summary output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Text,
    /// JSON document
    Json,
}

/// weightgen - weighted random value generator
#[derive(Parser, Debug)]
#[command(name = "weightgen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// TOML configuration file (CLI options override its values)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    // === Generator Options ===
    /// Comma-separated candidate values (e.g., -1,0,1,2)
    #[arg(long, value_name = "LIST", allow_hyphen_values = true)]
    pub values: Option<String>,

    /// Comma-separated weights in [0, 1], one per value (e.g., 0.1,0.6,0.3)
    #[arg(long, value_name = "LIST", allow_hyphen_values = true)]
    pub weights: Option<String>,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    // === Run Options ===
    /// Number of values to draw (e.g., 1000, 10k, 1m)
    #[arg(short = 'n', long)]
    pub samples: Option<String>,

    /// Worker threads for summary mode (0 = one per CPU)
    #[arg(short = 't', long)]
    pub threads: Option<usize>,

    /// Run mode: stream or summary
    #[arg(long, value_enum)]
    pub mode: Option<RunMode>,

    // === Output Options ===
    /// Summary format: text or json
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write the JSON summary to this file
    #[arg(long, value_name = "FILE")]
    pub json_output: Option<PathBuf>,

    /// Fail if any observed share deviates from its weight by more than this
    /// many percentage points
    #[arg(long)]
    pub tolerance: Option<f64>,

    // === Misc ===
    /// Validate configuration and print the normalized distribution only
    #[arg(long)]
    pub dry_run: bool,

    /// Print debug diagnostics to stderr
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate CLI arguments
    ///
    /// Only checks what can be judged from the flags alone; generator input is
    /// validated when the table is built.
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(tolerance) = self.tolerance {
            if !tolerance.is_finite() || tolerance <= 0.0 {
                anyhow::bail!("tolerance must be a positive number of percentage points");
            }
        }

        if self.config.is_none() && self.values.is_none() && self.weights.is_none() {
            anyhow::bail!("must specify --config or --values and --weights");
        }

        Ok(())
    }
}
