//! CLI to Config conversion utilities

use crate::config::{cli, CounterLayout, SampleLayout, SourceKind};
use anyhow::{Context, Result};

/// Parse a size string (e.g., "16M", "8k", "0x01000000") to bytes
pub fn parse_size(s: &str) -> Result<u64> {
    let s = s.trim().to_lowercase();

    if let Some(hex) = s.strip_prefix("0x") {
        return u64::from_str_radix(hex, 16)
            .with_context(|| format!("Invalid size format: {}", s));
    }

    let (num_str, multiplier) = if s.ends_with("k") || s.ends_with("kb") || s.ends_with("kib") {
        (s.trim_end_matches("kib").trim_end_matches("kb").trim_end_matches("k"), 1024u64)
    } else if s.ends_with("m") || s.ends_with("mb") || s.ends_with("mib") {
        (s.trim_end_matches("mib").trim_end_matches("mb").trim_end_matches("m"), 1024 * 1024)
    } else if s.ends_with("g") || s.ends_with("gb") || s.ends_with("gib") {
        (s.trim_end_matches("gib").trim_end_matches("gb").trim_end_matches("g"), 1024 * 1024 * 1024)
    } else {
        (s.as_str(), 1)
    };

    let num: u64 = num_str.parse()
        .with_context(|| format!("Invalid size format: {}", s))?;

    num.checked_mul(multiplier)
        .with_context(|| format!("Size out of range: {}", s))
}

/// Parse a seed string, decimal or 0x-prefixed hex
pub fn parse_seed(s: &str) -> Result<u32> {
    let s = s.trim().to_lowercase();
    let seed = match s.strip_prefix("0x") {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    seed.with_context(|| format!("Invalid seed: {}", s))
}

/// Convert CLI SourceType to config SourceKind
pub fn convert_source_type(cli_type: cli::SourceType) -> SourceKind {
    match cli_type {
        cli::SourceType::Sampled => SourceKind::Sampled,
        cli::SourceType::Counter => SourceKind::Counter,
        cli::SourceType::Lfsr => SourceKind::Lfsr,
    }
}

/// Convert CLI SampleLayoutType to config SampleLayout
pub fn convert_sample_layout(cli_layout: cli::SampleLayoutType) -> SampleLayout {
    match cli_layout {
        cli::SampleLayoutType::ThreeByEight => SampleLayout::ThreeByEight,
        cli::SampleLayoutType::TwoByTwelve => SampleLayout::TwoByTwelve,
    }
}

/// Convert CLI CounterLayoutType to config CounterLayout
pub fn convert_counter_layout(cli_layout: cli::CounterLayoutType) -> CounterLayout {
    match cli_layout {
        cli::CounterLayoutType::Single => CounterLayout::Single,
        cli::CounterLayoutType::Multi => CounterLayout::Multi,
    }
}
