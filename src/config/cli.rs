//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// WritePulse - Sustained sequential write benchmark
#[derive(Parser, Debug)]
#[command(name = "writepulse")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Target file on the mounted store
    ///
    /// Optional when a config file provides it
    #[arg(value_name = "PATH")]
    pub target: Option<PathBuf>,

    /// TOML configuration file (CLI options override it)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    // === Sizing Options ===
    /// Total bytes written per run (e.g., 16M, 1G, 0x01000000)
    #[arg(short = 's', long)]
    pub file_size: Option<String>,

    /// Maximum bytes per write call (e.g., 8k, 64k)
    #[arg(short = 'b', long)]
    pub chunk_size: Option<String>,

    /// Number of consecutive runs against the same path
    #[arg(short = 'r', long)]
    pub runs: Option<usize>,

    // === Source Options ===
    /// Data source generating the file contents
    #[arg(long, value_enum)]
    pub source: Option<SourceType>,

    /// Word layout for the sampled source
    #[arg(long, value_enum)]
    pub sample_layout: Option<SampleLayoutType>,

    /// Counter arrangement for the counter source
    #[arg(long, value_enum)]
    pub counter_layout: Option<CounterLayoutType>,

    /// LFSR seed (non-zero, decimal or 0x-prefixed hex)
    #[arg(long)]
    pub seed: Option<String>,

    // === Durability Options ===
    /// Open the file with O_SYNC
    #[arg(long)]
    pub sync: bool,

    /// Flush to the media before closing (counted in the elapsed time)
    #[arg(long)]
    pub fsync: bool,

    /// Read the file back after each run and compare (lfsr source only)
    #[arg(long)]
    pub verify: bool,

    // === Output Options ===
    /// Write a JSON report to this path
    #[arg(long)]
    pub json_output: Option<PathBuf>,

    /// Print only the summary
    #[arg(short = 'q', long)]
    pub quiet: bool,

    // === Runtime Options ===
    /// Validate and print the configuration without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Verbose diagnostic logging to stderr
    #[arg(long, env = "WRITEPULSE_DEBUG")]
    pub debug: bool,
}

/// Data source type
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceType {
    /// Analog samples packed with a timing byte
    Sampled,
    /// Byte-wide counters packed with a timing byte
    Counter,
    /// Reproducible LFSR sequence
    Lfsr,
}

/// Sampled source layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SampleLayoutType {
    /// Three 8-bit samples per word
    #[value(name = "3x8")]
    ThreeByEight,
    /// Two 12-bit samples per word
    #[value(name = "2x12")]
    TwoByTwelve,
}

/// Counter source layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CounterLayoutType {
    /// One incrementing counter
    Single,
    /// Incrementing, decrementing and strided counters
    Multi,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate CLI arguments
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.target.is_none() && self.config.is_none() {
            anyhow::bail!("must specify a target PATH or --config");
        }

        if self.runs == Some(0) {
            anyhow::bail!("runs must be at least 1");
        }

        Ok(())
    }
}
