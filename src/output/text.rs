//! Human-readable text output

use crate::bench::{RunResult, RunSummary};
use crate::config::Config;
use crate::util::time::{format_bytes, format_duration, format_throughput};
use std::fmt::Write;

const RULE: &str = "═══════════════════════════════════════════════════════════";

/// Print the effective configuration before the first run
pub fn print_configuration(config: &Config) {
    println!("{}", RULE);
    println!("                    CONFIGURATION");
    println!("{}", RULE);
    println!("{}", config);
}

/// Print the result of one run
pub fn print_run_result(result: &RunResult) {
    print!("{}", render_run_result(result));
}

/// Print the multi-run summary
pub fn print_summary(summary: &RunSummary) {
    print!("{}", render_summary(summary));
}

/// Render one run's result
///
/// Throughput is always shown in KiB/s, followed by an auto-scaled figure.
pub fn render_run_result(result: &RunResult) -> String {
    let throughput = result.throughput();
    let mut out = String::new();

    let _ = writeln!(out, "Run {}: {} ({})", result.run, result.path.display(), result.open_mode);
    let _ = writeln!(
        out,
        "  Wrote {} in {} chunks of {} ({} source)",
        format_bytes(result.bytes),
        result.chunks,
        format_bytes(result.buffer_size as u64),
        result.source
    );
    let _ = writeln!(out, "  Elapsed seconds: {:.6}", result.elapsed_secs());
    if throughput.is_finite() {
        let _ = writeln!(
            out,
            "  Transfer rate:   {:.2} KiB/s ({})",
            throughput / 1024.0,
            format_throughput(throughput)
        );
    } else {
        let _ = writeln!(out, "  Transfer rate:   {}", format_throughput(throughput));
    }
    out
}

/// Render the summary over all runs
pub fn render_summary(summary: &RunSummary) -> String {
    let mut out = String::new();

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "                    SUMMARY");
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "Runs:          {}", summary.runs);
    let _ = writeln!(out, "Total written: {}", format_bytes(summary.total_bytes));
    let _ = writeln!(out, "Total elapsed: {}", format_duration(summary.total_elapsed));
    let _ = writeln!(out, "Throughput:");
    let _ = writeln!(out, "  Min:  {}", format_throughput(summary.min_throughput));
    let _ = writeln!(out, "  Mean: {}", format_throughput(summary.mean_throughput));
    let _ = writeln!(out, "  Max:  {}", format_throughput(summary.max_throughput));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::OpenMode;
    use std::path::PathBuf;
    use std::time::Duration;

    fn result(elapsed: Duration) -> RunResult {
        RunResult {
            run: 2,
            path: PathBuf::from("/sd/big.dat"),
            bytes: 0x0100_0000,
            chunks: 2048,
            buffer_size: 8192,
            open_mode: OpenMode::Reuse,
            source: "sampled",
            elapsed,
        }
    }

    #[test]
    fn test_render_run_result() {
        let text = render_run_result(&result(Duration::from_secs(4)));

        assert!(text.starts_with("Run 2: /sd/big.dat (reuse)\n"));
        assert!(text.contains("Wrote 16.00 MiB in 2048 chunks of 8.00 KiB (sampled source)"));
        assert!(text.contains("Elapsed seconds: 4.000000"));
        assert!(text.contains("Transfer rate:   4096.00 KiB/s (4.00 MiB/s)"));
    }

    #[test]
    fn test_render_zero_elapsed() {
        let text = render_run_result(&result(Duration::ZERO));
        assert!(text.contains("Elapsed seconds: 0.000000"));
        assert!(text.contains("Transfer rate:   unbounded"));
    }

    #[test]
    fn test_render_summary() {
        let summary = RunSummary {
            runs: 2,
            total_bytes: 2 * 1024 * 1024,
            total_elapsed: Duration::from_secs(2),
            min_throughput: 512.0 * 1024.0,
            mean_throughput: 1024.0 * 1024.0,
            max_throughput: 1536.0 * 1024.0,
        };

        let text = render_summary(&summary);
        assert!(text.contains("Runs:          2"));
        assert!(text.contains("Total written: 2.00 MiB"));
        assert!(text.contains("Total elapsed: 2.00s"));
        assert!(text.contains("Min:  512.00 KiB/s"));
        assert!(text.contains("Mean: 1.00 MiB/s"));
        assert!(text.contains("Max:  1.50 MiB/s"));
    }
}
