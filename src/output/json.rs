//! JSON output formatting
//!
//! Serializes a summary run: run parameters, timing, per-candidate shares
//! (expected vs observed), and raw per-worker counts.

use crate::config::Config;
use crate::distribution::WeightedTable;
use crate::stats::CandidateShare;
use crate::util::time::format_duration;
use crate::worker::RunSummary;
use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use std::time::Duration;

/// Duration with both microseconds and human-readable format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonDuration {
    pub micros: u64,
    pub human: String,
}

impl JsonDuration {
    pub fn from_duration(d: Duration) -> Self {
        let micros = d.as_micros() as u64;
        let human = format_duration(d);
        Self { micros, human }
    }
}

/// Counts drawn by one worker
#[derive(Debug, Clone, Serialize)]
pub struct JsonWorker {
    pub worker_id: usize,
    pub samples: u64,
    pub counts: Vec<u64>,
}

/// Complete summary document
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// RFC 3339 timestamp of when the summary was produced
    pub generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub samples: u64,
    pub threads: usize,
    pub elapsed: JsonDuration,
    pub samples_per_sec: f64,
    /// Largest |observed - expected| share, in percentage points
    pub max_deviation_pp: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerance_pp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub within_tolerance: Option<bool>,
    pub candidates: Vec<CandidateShare>,
    pub workers: Vec<JsonWorker>,
}

/// Build the JSON summary for a finished run
pub fn build_json_summary(summary: &RunSummary, table: &WeightedTable, config: &Config) -> JsonSummary {
    let stats = summary.stats();
    let max_deviation_pp = stats.max_deviation_pp(table);
    let tolerance_pp = config.output.tolerance;

    let workers = summary
        .aggregator
        .per_worker()
        .map(|(worker_id, worker_stats)| JsonWorker {
            worker_id,
            samples: worker_stats.total(),
            counts: worker_stats.counts().to_vec(),
        })
        .collect();

    JsonSummary {
        generated_at: chrono::Utc::now().to_rfc3339(),
        seed: config.generator.seed,
        samples: stats.total(),
        threads: summary.threads,
        elapsed: JsonDuration::from_duration(summary.elapsed),
        samples_per_sec: summary.rate(),
        max_deviation_pp,
        tolerance_pp,
        within_tolerance: tolerance_pp.map(|tolerance| max_deviation_pp <= tolerance),
        candidates: stats.compare(table),
        workers,
    }
}

/// Serialize the summary to a JSON string
pub fn to_json_string(summary: &JsonSummary, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(summary)?
    } else {
        serde_json::to_string(summary)?
    };
    Ok(json)
}

/// Write JSON output to file
pub fn write_json_output(output_path: &Path, summary: &JsonSummary, pretty: bool) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create JSON output: {}", output_path.display()))?;

    if pretty {
        serde_json::to_writer_pretty(file, summary)?;
    } else {
        serde_json::to_writer(file, summary)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use crate::worker::run_summary;
    use std::sync::Arc;

    fn sample_summary(tolerance: Option<f64>) -> JsonSummary {
        let table = Arc::new(WeightedTable::new(vec![3, 4, 5], vec![0.2, 0.3, 0.5]).unwrap());
        let mut config = Config::default();
        config.generator.seed = Some(11);
        config.output.tolerance = tolerance;
        let run = RunConfig {
            samples: 3_000,
            threads: 3,
            ..Default::default()
        };

        let summary = run_summary(Arc::clone(&table), &run, Some(11)).unwrap();
        build_json_summary(&summary, &table, &config)
    }

    #[test]
    fn test_build_json_summary() {
        let json = sample_summary(Some(100.0));

        assert_eq!(json.samples, 3_000);
        assert_eq!(json.threads, 3);
        assert_eq!(json.seed, Some(11));
        assert_eq!(json.candidates.len(), 3);
        assert_eq!(json.workers.len(), 3);
        assert_eq!(json.workers.iter().map(|w| w.samples).sum::<u64>(), 3_000);
        assert_eq!(json.within_tolerance, Some(true));
    }

    #[test]
    fn test_json_fields() {
        let json = sample_summary(None);
        let value: serde_json::Value = serde_json::from_str(&to_json_string(&json, false).unwrap()).unwrap();

        assert_eq!(value["samples"], 3_000);
        assert_eq!(value["candidates"][2]["value"], 5);
        assert!(value["elapsed"]["micros"].is_u64());
        assert!(value.get("tolerance_pp").is_none());
        assert!(value.get("within_tolerance").is_none());
        assert!(chrono::DateTime::parse_from_rfc3339(value["generated_at"].as_str().unwrap()).is_ok());
    }

    #[test]
    fn test_write_json_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");

        write_json_output(&path, &sample_summary(None), true).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value["threads"], 3);
    }
}
