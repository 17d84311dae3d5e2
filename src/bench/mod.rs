//! Benchmark runner
//!
//! One run sizes the buffer, opens the target (reusing an existing file when
//! its size allows), writes the whole file chunk by chunk and closes it. The
//! timed window starts once the file is open and positioned, and ends after the
//! close returns, so metadata flushes performed by close are included.
//!
//! # Failure handling
//!
//! Every error is fatal for the run. Once the file is open it is closed exactly
//! once on every path. When several steps fail, the first failure is reported
//! (write, then sync, then close).

pub mod sizing;
pub mod verify;
pub mod write_loop;

use crate::config::BenchConfig;
use crate::error::BenchError;
use crate::source::DataSource;
use crate::store::{FileStore, OpenMode};
use crate::util::buffer::{WriteBuffer, SECTOR_SIZE};
use crate::util::time::{calculate_throughput, Timestamp};
use std::path::PathBuf;
use std::time::Duration;

use sizing::open_target;
use write_loop::{write_chunks, WritePlan};

/// Outcome of one successful run
#[derive(Debug, Clone)]
pub struct RunResult {
    /// 1-based run number
    pub run: usize,
    pub path: PathBuf,
    /// Bytes written, always the configured file size
    pub bytes: u64,
    /// Number of write calls
    pub chunks: u64,
    pub buffer_size: usize,
    pub open_mode: OpenMode,
    /// Name of the data source that filled the file
    pub source: &'static str,
    /// Time from the first write to the end of close
    pub elapsed: Duration,
}

impl RunResult {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Bytes per second; infinite if the run finished below clock resolution
    pub fn throughput(&self) -> f64 {
        calculate_throughput(self.bytes, self.elapsed)
    }
}

/// Execute one write run
///
/// Configuration problems (indivisible sizes) are reported before any store
/// call is made. The buffer is allocated before the file is opened, so an
/// allocation failure leaves nothing to clean up.
pub fn run_benchmark<S: FileStore>(
    store: &mut S,
    config: &BenchConfig,
    source: &mut dyn DataSource,
) -> Result<RunResult, BenchError> {
    let plan = WritePlan::new(config.file_size, config.chunk_size)?;
    let mut buffer = WriteBuffer::new(plan.buffer_size, SECTOR_SIZE)?;
    let path = config.path.as_path();

    source.restart();

    let (mut handle, open_mode) = open_target(store, path, plan.file_size)?;

    tracing::info!(
        path = %path.display(),
        bytes = plan.file_size,
        buffer_size = plan.buffer_size,
        chunks = plan.chunk_count(),
        %open_mode,
        source = source.name(),
        "starting write"
    );

    let start = Timestamp::now();

    let written = write_chunks(store, &mut handle, path, &plan, &mut buffer, source);

    let synced = match (&written, config.fsync) {
        (Ok(_), true) => store.sync(&mut handle).map_err(|source| BenchError::Sync {
            path: path.to_path_buf(),
            source,
        }),
        _ => Ok(()),
    };

    let closed = store.close(handle).map_err(|source| BenchError::Close {
        path: path.to_path_buf(),
        source,
    });

    let elapsed = start.elapsed();

    let bytes = written?;
    synced?;
    closed?;

    tracing::info!(
        path = %path.display(),
        bytes,
        elapsed_us = elapsed.as_micros() as u64,
        "write complete"
    );

    Ok(RunResult {
        run: 1,
        path: path.to_path_buf(),
        bytes,
        chunks: plan.chunk_count(),
        buffer_size: plan.buffer_size,
        open_mode,
        source: source.name(),
        elapsed,
    })
}

/// A store, a data source and a configuration bound together for repeated runs
pub struct Benchmark<S: FileStore> {
    store: S,
    source: Box<dyn DataSource>,
    config: BenchConfig,
    completed: usize,
}

impl<S: FileStore> Benchmark<S> {
    pub fn new(store: S, source: Box<dyn DataSource>, config: BenchConfig) -> Self {
        Self {
            store,
            source,
            config,
            completed: 0,
        }
    }

    /// Run once more against the same path
    ///
    /// When verification is enabled and the source is reproducible, the file
    /// is read back through the store after the timed window closes.
    pub fn run_once(&mut self) -> Result<RunResult, BenchError> {
        let mut result = run_benchmark(&mut self.store, &self.config, self.source.as_mut())?;
        self.completed += 1;
        result.run = self.completed;

        if self.config.verify {
            match self.source.replay_seed() {
                Some(seed) => verify::verify_file(
                    &mut self.store,
                    &self.config.path,
                    seed,
                    result.bytes,
                    result.buffer_size,
                )?,
                None => tracing::warn!(
                    source = self.source.name(),
                    "source is not reproducible, skipping verification"
                ),
            }
        }

        Ok(result)
    }

    /// Run the configured number of times, stopping at the first failure
    ///
    /// `on_run` sees each result as soon as its run completes.
    pub fn run_all<F: FnMut(&RunResult)>(
        &mut self,
        mut on_run: F,
    ) -> Result<Vec<RunResult>, BenchError> {
        let mut results = Vec::with_capacity(self.config.runs);
        for _ in 0..self.config.runs {
            let result = self.run_once()?;
            on_run(&result);
            results.push(result);
        }
        Ok(results)
    }
}

/// Aggregate over consecutive runs
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub runs: usize,
    pub total_bytes: u64,
    pub total_elapsed: Duration,
    /// Throughput extremes and mean, bytes per second
    pub min_throughput: f64,
    pub mean_throughput: f64,
    pub max_throughput: f64,
}

impl RunSummary {
    /// Summarize a set of runs; `None` if there are none
    pub fn from_results(results: &[RunResult]) -> Option<Self> {
        if results.is_empty() {
            return None;
        }

        let throughputs: Vec<f64> = results.iter().map(RunResult::throughput).collect();
        let min = throughputs.iter().copied().fold(f64::INFINITY, f64::min);
        let max = throughputs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = throughputs.iter().sum::<f64>() / throughputs.len() as f64;

        Some(Self {
            runs: results.len(),
            total_bytes: results.iter().map(|r| r.bytes).sum(),
            total_elapsed: results.iter().map(|r| r.elapsed).sum(),
            min_throughput: min,
            mean_throughput: mean,
            max_throughput: max,
        })
    }
}
