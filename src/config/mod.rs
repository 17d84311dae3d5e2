//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.

pub mod cli;
pub mod cli_convert;
pub mod toml;
pub mod validator;

use crate::util::time::format_bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Default target file size, 16 MiB
pub const DEFAULT_FILE_SIZE: u64 = 0x0100_0000;

/// Default chunk capacity, 8 KiB
pub const DEFAULT_CHUNK_SIZE: u64 = 8 * 1024;

/// Default LFSR seed
pub const DEFAULT_SEED: u32 = 1;

/// Complete benchmark configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub benchmark: BenchConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Write benchmark parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Path of the file to write on the mounted store
    pub path: PathBuf,
    /// Total bytes written per run
    #[serde(default = "default_file_size")]
    pub file_size: u64,
    /// Maximum bytes per write call
    #[serde(default = "default_chunk_size")]
    pub chunk_size: u64,
    /// Number of consecutive runs against the same path
    #[serde(default = "default_runs")]
    pub runs: usize,
    /// Open the file with O_SYNC
    #[serde(default)]
    pub sync: bool,
    /// Flush file data to the media before close (inside the timed window)
    #[serde(default)]
    pub fsync: bool,
    /// Read the file back after each run and compare it to the generated data
    #[serde(default)]
    pub verify: bool,
}

fn default_file_size() -> u64 {
    DEFAULT_FILE_SIZE
}

fn default_chunk_size() -> u64 {
    DEFAULT_CHUNK_SIZE
}

fn default_runs() -> usize {
    1
}

fn default_seed() -> u32 {
    DEFAULT_SEED
}

impl BenchConfig {
    /// Configuration with defaults for everything but the path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file_size: DEFAULT_FILE_SIZE,
            chunk_size: DEFAULT_CHUNK_SIZE,
            runs: 1,
            sync: false,
            fsync: false,
            verify: false,
        }
    }
}

/// Data source selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Analog samples packed with a timing byte
    #[default]
    Sampled,
    /// Byte-wide counters packed with a timing byte
    Counter,
    /// Galois LFSR, reproducible from the seed
    Lfsr,
}

impl SourceKind {
    /// Name used in reports, matching `DataSource::name`
    pub fn name(&self) -> &'static str {
        match self {
            SourceKind::Sampled => "sampled",
            SourceKind::Counter => "counter",
            SourceKind::Lfsr => "lfsr",
        }
    }
}

/// Word layout for the sampled source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SampleLayout {
    /// Three samples truncated to 8 bits each
    #[default]
    #[serde(rename = "3x8")]
    ThreeByEight,
    /// Two full 12-bit samples
    #[serde(rename = "2x12")]
    TwoByTwelve,
}

/// Counter arrangement for the counter source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CounterLayout {
    /// One incrementing counter
    Single,
    /// Incrementing, decrementing and strided counters
    #[default]
    Multi,
}

/// Data source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,
    #[serde(default)]
    pub sample_layout: SampleLayout,
    #[serde(default)]
    pub counter_layout: CounterLayout,
    /// LFSR seed (must be non-zero)
    #[serde(default = "default_seed")]
    pub seed: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            sample_layout: SampleLayout::default(),
            counter_layout: CounterLayout::default(),
            seed: DEFAULT_SEED,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Write a JSON report to this path
    pub json_output: Option<PathBuf>,
    /// Skip the per-run text report, print the summary only
    #[serde(default)]
    pub quiet: bool,
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Configuration:")?;
        writeln!(f, "  Benchmark: {}", self.benchmark)?;
        writeln!(f, "  Source: {}", self.source)?;
        writeln!(f, "  Output: {}", self.output)?;
        Ok(())
    }
}

impl fmt::Display for BenchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, size={}, chunk={}, runs={}",
            self.path.display(),
            format_bytes(self.file_size),
            format_bytes(self.chunk_size),
            self.runs
        )?;
        if self.sync {
            write!(f, ", O_SYNC")?;
        }
        if self.fsync {
            write!(f, ", fsync")?;
        }
        if self.verify {
            write!(f, ", verify")?;
        }
        Ok(())
    }
}

impl fmt::Display for SourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SourceKind::Sampled => write!(f, "sampled ({})", self.sample_layout),
            SourceKind::Counter => write!(f, "counter ({})", self.counter_layout),
            SourceKind::Lfsr => write!(f, "lfsr (seed={:#x})", self.seed),
        }
    }
}

impl fmt::Display for SampleLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleLayout::ThreeByEight => write!(f, "3x8"),
            SampleLayout::TwoByTwelve => write!(f, "2x12"),
        }
    }
}

impl fmt::Display for CounterLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CounterLayout::Single => write!(f, "single"),
            CounterLayout::Multi => write!(f, "multi"),
        }
    }
}

impl fmt::Display for OutputConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "text")?;
        if let Some(ref path) = self.json_output {
            write!(f, ", json={}", path.display())?;
        }
        if self.quiet {
            write!(f, ", quiet")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bench_config_defaults() {
        let config = BenchConfig::new("/sd/big.dat");
        assert_eq!(config.file_size, 0x0100_0000);
        assert_eq!(config.chunk_size, 8192);
        assert_eq!(config.runs, 1);
        assert!(!config.sync && !config.fsync && !config.verify);
    }

    #[test]
    fn test_source_config_default() {
        let source = SourceConfig::default();
        assert_eq!(source.kind, SourceKind::Sampled);
        assert_eq!(source.sample_layout, SampleLayout::ThreeByEight);
        assert_eq!(source.seed, 1);
    }

    #[test]
    fn test_display() {
        let config = Config {
            benchmark: BenchConfig::new("big.dat"),
            source: SourceConfig {
                kind: SourceKind::Lfsr,
                seed: 0x10,
                ..SourceConfig::default()
            },
            output: OutputConfig::default(),
        };
        let text = config.to_string();
        assert!(text.contains("big.dat, size=16.00 MiB, chunk=8.00 KiB, runs=1"));
        assert!(text.contains("lfsr (seed=0x10)"));
    }
}
