//! Human-readable text output

use crate::config::Config;
use crate::distribution::WeightedTable;
use crate::stats::FrequencyStats;
use crate::util::time::{format_duration, format_number, format_rate};
use crate::worker::RunSummary;
use std::io::{self, Write};

const RULE: &str = "═══════════════════════════════════════════════════════════";

/// Print the normalized distribution (dry run)
pub fn print_distribution(table: &WeightedTable) -> io::Result<()> {
    let stdout = io::stdout();
    write_distribution(&mut stdout.lock(), table)
}

/// Print run results to console
pub fn print_results(summary: &RunSummary, table: &WeightedTable, config: &Config) -> io::Result<()> {
    let stdout = io::stdout();
    write_results(&mut stdout.lock(), summary, table, config)
}

/// Write the candidate table with normalized weights
pub fn write_distribution<W: Write>(out: &mut W, table: &WeightedTable) -> io::Result<()> {
    writeln!(out, "Distribution ({} candidates):", table.len())?;
    writeln!(out, "  {:>6}  {:>20}  {:>10}", "Index", "Value", "Weight")?;
    for (index, (value, weight)) in table.values().iter().zip(table.normalized()).enumerate() {
        writeln!(out, "  {:>6}  {:>20}  {:>9.4}%", index, value, weight * 100.0)?;
    }
    Ok(())
}

/// Write run results: totals, timing, and per-candidate shares
pub fn write_results<W: Write>(
    out: &mut W,
    summary: &RunSummary,
    table: &WeightedTable,
    config: &Config,
) -> io::Result<()> {
    let stats = summary.stats();

    writeln!(out, "{}", RULE)?;
    writeln!(out, "                    SAMPLING RESULTS")?;
    writeln!(out, "{}", RULE)?;
    writeln!(out)?;

    writeln!(out, "Samples:  {}", format_number(stats.total()))?;
    writeln!(out, "Threads:  {}", summary.threads)?;
    writeln!(out, "Elapsed:  {}", format_duration(summary.elapsed))?;
    writeln!(out, "Rate:     {} samples/s", format_rate(summary.rate()))?;
    if let Some(seed) = config.generator.seed {
        writeln!(out, "Seed:     {}", seed)?;
    }
    writeln!(out)?;

    write_shares(out, stats, table)?;
    writeln!(out)?;

    let max_deviation = stats.max_deviation_pp(table);
    match config.output.tolerance {
        Some(tolerance) => {
            let verdict = if max_deviation <= tolerance { "PASS" } else { "FAIL" };
            writeln!(
                out,
                "Max deviation: {:.4} pp (tolerance {:.4} pp) - {}",
                max_deviation, tolerance, verdict
            )?;
        }
        None => writeln!(out, "Max deviation: {:.4} pp", max_deviation)?,
    }

    writeln!(out, "{}", RULE)?;
    Ok(())
}

fn write_shares<W: Write>(out: &mut W, stats: &FrequencyStats, table: &WeightedTable) -> io::Result<()> {
    writeln!(
        out,
        "  {:>20}  {:>14}  {:>10}  {:>10}  {:>10}",
        "Value", "Count", "Expected", "Observed", "Deviation"
    )?;
    for share in stats.compare(table) {
        writeln!(
            out,
            "  {:>20}  {:>14}  {:>9.4}%  {:>9.4}%  {:>+8.4}pp",
            share.value,
            format_number(share.count),
            share.expected_pct,
            share.observed_pct,
            share.deviation_pp
        )?;
    }
    Ok(())
}
