//! TOML configuration file parsing

use super::*;
use crate::config::cli::Cli;
use crate::config::cli_convert::{
    convert_counter_layout, convert_sample_layout, convert_source_type, parse_seed, parse_size,
};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Build the configuration for a CLI invocation
///
/// Starts from `--config` when given, otherwise from defaults for the target
/// path, then applies the CLI overrides.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let base = match (&cli.config, &cli.target) {
        (Some(path), _) => parse_toml_file(path)?,
        (None, Some(target)) => Config {
            benchmark: BenchConfig::new(target.clone()),
            source: SourceConfig::default(),
            output: OutputConfig::default(),
        },
        (None, None) => anyhow::bail!("must specify a target PATH or --config"),
    };

    merge_cli_with_config(cli, base)
}

/// Merge CLI arguments with TOML configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: Config) -> Result<Config> {
    // Override target path
    if let Some(ref target) = cli.target {
        config.benchmark.path = target.clone();
    }

    // Override sizing
    if let Some(ref size_str) = cli.file_size {
        config.benchmark.file_size = parse_size(size_str).context("Invalid file size")?;
    }
    if let Some(ref chunk_str) = cli.chunk_size {
        config.benchmark.chunk_size = parse_size(chunk_str).context("Invalid chunk size")?;
    }
    if let Some(runs) = cli.runs {
        config.benchmark.runs = runs;
    }

    // Override durability flags
    if cli.sync {
        config.benchmark.sync = true;
    }
    if cli.fsync {
        config.benchmark.fsync = true;
    }
    if cli.verify {
        config.benchmark.verify = true;
    }

    // Override source
    if let Some(source) = cli.source {
        config.source.kind = convert_source_type(source);
    }
    if let Some(layout) = cli.sample_layout {
        config.source.sample_layout = convert_sample_layout(layout);
    }
    if let Some(layout) = cli.counter_layout {
        config.source.counter_layout = convert_counter_layout(layout);
    }
    if let Some(ref seed_str) = cli.seed {
        config.source.seed = parse_seed(seed_str)?;
    }

    // Override output settings
    if let Some(ref path) = cli.json_output {
        config.output.json_output = Some(path.clone());
    }
    if cli.quiet {
        config.output.quiet = true;
    }

    Ok(config)
}
