//! WritePulse - Sustained sequential write benchmark
//!
//! WritePulse writes a large fixed-size file to a mounted filesystem using data
//! produced by one of several generators, then reports elapsed time and throughput.
//! It targets constrained media (SD cards, eMMC, USB flash) where the interesting
//! number is how fast the block layer sustains large transfers.
//!
//! # Architecture
//!
//! - **Data sources**: sampled (analog jitter), counter, and LFSR generators
//! - **File stores**: local filesystem and a recording mock for tests
//! - **Sizing policy**: reuse an existing file in place or create it fresh
//! - **Write loop**: fixed-size chunks, one whole-buffer write per chunk
//! - **Reports**: human-readable text and JSON

pub mod bench;
pub mod config;
pub mod error;
pub mod output;
pub mod source;
pub mod store;
pub mod util;

// Re-export commonly used types
pub use bench::{run_benchmark, RunResult};
pub use config::Config;
pub use error::BenchError;
pub use source::DataSource;
pub use store::FileStore;

/// Result type used throughout WritePulse
pub type Result<T> = anyhow::Result<T>;
