//! WritePulse CLI entry point

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use writepulse::bench::{Benchmark, RunSummary};
use writepulse::config::cli::Cli;
use writepulse::config::{toml::load_config, validator::validate_config};
use writepulse::output::{json, text};
use writepulse::source::{self, analog::ClockJitterAnalog};
use writepulse::store::local::LocalStore;

/// Initialize tracing subscriber
///
/// Warnings always reach stderr; `--debug` raises everything to TRACE.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    println!("WritePulse v{}", env!("CARGO_PKG_VERSION"));
    println!("Sustained sequential write benchmark");
    println!();

    let cli = Cli::parse_args();
    cli.validate()?;
    init_tracing(cli.debug);

    let config = load_config(&cli)?;
    validate_config(&config).context("Configuration validation failed")?;

    text::print_configuration(&config);

    if cli.dry_run {
        println!();
        println!("Dry run mode - configuration validated successfully");
        return Ok(());
    }

    let store = LocalStore::with_sync(config.benchmark.sync);
    let data_source = source::from_config(&config.source, Box::new(ClockJitterAnalog::new()))
        .context("Failed to configure data source")?;
    let mut benchmark = Benchmark::new(store, data_source, config.benchmark.clone());

    println!();
    println!("Starting test...");
    println!();

    let quiet = config.output.quiet;
    let results = benchmark
        .run_all(|result| {
            if !quiet {
                text::print_run_result(result);
            }
        })
        .context("Benchmark run failed")?;

    if results.len() > 1 || config.output.quiet {
        if let Some(summary) = RunSummary::from_results(&results) {
            text::print_summary(&summary);
        }
    }

    if let Some(ref path) = config.output.json_output {
        let report = json::build_report(&config, &results);
        json::write_json_report(path, &report)?;
        println!();
        println!("JSON report written to {}", path.display());
    }

    Ok(())
}
