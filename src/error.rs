//! Benchmark error taxonomy
//!
//! Every failure in the benchmark core is fatal for the run: nothing is retried
//! and there is no partial-success state. Each variant carries enough context
//! (path, chunk index, underlying OS error) to diagnose the failure.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to allocate {size} byte write buffer")]
    Allocation { size: usize },

    #[error("open({path}): {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("write({path}) chunk {chunk}: {source}")]
    Write {
        path: PathBuf,
        chunk: u64,
        #[source]
        source: io::Error,
    },

    #[error("fsync({path}): {source}")]
    Sync {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("close({path}): {source}")]
    Close {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read({path}) at offset {offset}: {source}")]
    Read {
        path: PathBuf,
        offset: u64,
        #[source]
        source: io::Error,
    },

    #[error("Verification failed for {path} at offset {offset}: expected {expected:#010x}, found {actual:#010x}")]
    Verify {
        path: PathBuf,
        offset: u64,
        expected: u32,
        actual: u32,
    },
}

impl BenchError {
    /// Underlying store error code, if this error wraps one
    pub fn os_error_code(&self) -> Option<i32> {
        match self {
            BenchError::Open { source, .. }
            | BenchError::Write { source, .. }
            | BenchError::Sync { source, .. }
            | BenchError::Close { source, .. }
            | BenchError::Read { source, .. } => source.raw_os_error(),
            _ => None,
        }
    }
}
