//! JSON output formatting
//!
//! Machine-readable report with one entry per run plus the multi-run summary,
//! stamped with the host name and the report time.

use crate::bench::{RunResult, RunSummary};
use crate::config::Config;
use crate::util::time::{format_duration, format_throughput};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Duration;

/// Duration with both microseconds and human-readable format
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonDuration {
    pub micros: u64,
    pub human: String,
}

impl JsonDuration {
    pub fn from_duration(d: Duration) -> Self {
        Self {
            micros: d.as_micros() as u64,
            human: format_duration(d),
        }
    }
}

/// Throughput with bytes/sec and human-readable format
///
/// `bytes_per_sec` is `null` when the run finished below clock resolution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonThroughput {
    pub bytes_per_sec: Option<f64>,
    pub human: String,
}

impl JsonThroughput {
    pub fn new(bytes_per_sec: f64) -> Self {
        Self {
            bytes_per_sec: bytes_per_sec.is_finite().then_some(bytes_per_sec),
            human: format_throughput(bytes_per_sec),
        }
    }
}

/// Benchmark parameters echoed into the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonTestConfig {
    pub path: String,
    pub file_size: u64,
    pub chunk_size: u64,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    pub sync: bool,
    pub fsync: bool,
    pub verify: bool,
}

/// One run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRun {
    pub run: usize,
    pub open_mode: String,
    pub bytes: u64,
    pub chunks: u64,
    pub buffer_size: usize,
    pub elapsed: JsonDuration,
    pub throughput: JsonThroughput,
}

impl From<&RunResult> for JsonRun {
    fn from(result: &RunResult) -> Self {
        Self {
            run: result.run,
            open_mode: result.open_mode.to_string(),
            bytes: result.bytes,
            chunks: result.chunks,
            buffer_size: result.buffer_size,
            elapsed: JsonDuration::from_duration(result.elapsed),
            throughput: JsonThroughput::new(result.throughput()),
        }
    }
}

/// Aggregate over all runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSummary {
    pub runs: usize,
    pub total_bytes: u64,
    pub total_elapsed: JsonDuration,
    pub min_throughput: JsonThroughput,
    pub mean_throughput: JsonThroughput,
    pub max_throughput: JsonThroughput,
}

impl From<&RunSummary> for JsonSummary {
    fn from(summary: &RunSummary) -> Self {
        Self {
            runs: summary.runs,
            total_bytes: summary.total_bytes,
            total_elapsed: JsonDuration::from_duration(summary.total_elapsed),
            min_throughput: JsonThroughput::new(summary.min_throughput),
            mean_throughput: JsonThroughput::new(summary.mean_throughput),
            max_throughput: JsonThroughput::new(summary.max_throughput),
        }
    }
}

/// Complete JSON report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    /// RFC 3339 time the report was produced
    pub timestamp: String,
    pub config: JsonTestConfig,
    pub runs: Vec<JsonRun>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<JsonSummary>,
}

/// Build the report for a completed set of runs
pub fn build_report(config: &Config, results: &[RunResult]) -> JsonReport {
    let bench = &config.benchmark;
    let source_name = results
        .first()
        .map(|r| r.source.to_string())
        .unwrap_or_else(|| config.source.kind.name().to_string());

    JsonReport {
        hostname: hostname::get().ok().and_then(|h| h.into_string().ok()),
        timestamp: chrono::Local::now().to_rfc3339(),
        config: JsonTestConfig {
            path: bench.path.display().to_string(),
            file_size: bench.file_size,
            chunk_size: bench.chunk_size,
            source: source_name,
            seed: (config.source.kind == crate::config::SourceKind::Lfsr)
                .then_some(config.source.seed),
            sync: bench.sync,
            fsync: bench.fsync,
            verify: bench.verify,
        },
        runs: results.iter().map(JsonRun::from).collect(),
        summary: RunSummary::from_results(results).as_ref().map(JsonSummary::from),
    }
}

/// Write a report to `path` as pretty-printed JSON
pub fn write_json_report(path: &Path, report: &JsonReport) -> crate::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create JSON output file: {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)
        .with_context(|| format!("Failed to write JSON report: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BenchConfig, OutputConfig, SourceConfig, SourceKind};
    use crate::store::OpenMode;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn config(kind: SourceKind) -> Config {
        Config {
            benchmark: BenchConfig::new("/sd/big.dat"),
            source: SourceConfig {
                kind,
                ..SourceConfig::default()
            },
            output: OutputConfig::default(),
        }
    }

    fn result(run: usize, elapsed: Duration) -> RunResult {
        RunResult {
            run,
            path: PathBuf::from("/sd/big.dat"),
            bytes: 0x0100_0000,
            chunks: 2048,
            buffer_size: 8192,
            open_mode: OpenMode::Fresh,
            source: "lfsr",
            elapsed,
        }
    }

    #[test]
    fn test_json_throughput_unbounded_is_null() {
        let t = JsonThroughput::new(f64::INFINITY);
        assert_eq!(t.bytes_per_sec, None);
        assert_eq!(t.human, "unbounded");

        let value = serde_json::to_value(&t).unwrap();
        assert!(value["bytes_per_sec"].is_null());
    }

    #[test]
    fn test_json_duration() {
        let d = JsonDuration::from_duration(Duration::from_millis(1500));
        assert_eq!(d.micros, 1_500_000);
        assert_eq!(d.human, "1.50s");
    }

    #[test]
    fn test_build_report() {
        let results = vec![
            result(1, Duration::from_secs(2)),
            result(2, Duration::from_secs(4)),
        ];
        let report = build_report(&config(SourceKind::Lfsr), &results);

        assert_eq!(report.runs.len(), 2);
        assert_eq!(report.runs[1].run, 2);
        assert_eq!(report.config.source, "lfsr");
        assert_eq!(report.config.seed, Some(1));
        let summary = report.summary.unwrap();
        assert_eq!(summary.runs, 2);
        assert_eq!(summary.max_throughput.bytes_per_sec, Some(8.0 * 1024.0 * 1024.0));
        assert!(chrono::DateTime::parse_from_rfc3339(&report.timestamp).is_ok());
    }

    #[test]
    fn test_report_omits_seed_for_timing_sources() {
        let report = build_report(&config(SourceKind::Counter), &[]);
        assert_eq!(report.config.seed, None);
        assert_eq!(report.config.source, "counter");
        assert!(report.summary.is_none());
    }

    #[test]
    fn test_write_json_report() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.json");
        let report = build_report(&config(SourceKind::Lfsr), &[result(1, Duration::from_secs(1))]);

        write_json_report(&path, &report).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["runs"][0]["bytes"], 0x0100_0000);
        assert_eq!(value["runs"][0]["open_mode"], "fresh");
        assert_eq!(value["config"]["file_size"], 0x0100_0000);
    }
}
