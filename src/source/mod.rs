//! Data source abstraction
//!
//! A data source produces the 32-bit words that fill the benchmark file. Different
//! sources exercise different entropy strategies:
//!
//! - **Sampled**: packs successive analog samples with a timing byte
//! - **Counter**: packs byte-wide counters with a timing byte (no sampling hardware)
//! - **LFSR**: Galois linear-feedback shift register, fully reproducible from a seed
//!
//! # Architecture
//!
//! The `DataSource` trait gives the write loop a uniform interface. The concrete
//! source is chosen once, when the configuration is turned into a boxed source by
//! [`from_config`], and never re-selected while a run is in progress.
//!
//! # Example
//!
//! ```
//! use std::num::NonZeroU32;
//! use writepulse::source::{DataSource, lfsr::LfsrSource};
//!
//! let mut source = LfsrSource::new(NonZeroU32::new(1).unwrap());
//! assert_eq!(source.next_word(), 0xC527_9ED9);
//! ```

use crate::config::{SourceConfig, SourceKind};
use crate::util::time::Timestamp;
use std::num::NonZeroU32;

pub mod analog;
pub mod counter;
pub mod lfsr;
pub mod sampled;

use analog::AnalogSource;

/// Word generator feeding the write loop
///
/// Every call returns exactly one word; sources have no error conditions.
/// Sources are `Send` so a configured source can be moved to the thread that
/// runs the benchmark, but they are never shared.
pub trait DataSource: Send {
    /// Produce the next word
    fn next_word(&mut self) -> u32;

    /// Short name used in reports
    fn name(&self) -> &'static str;

    /// Return to the start of a reproducible sequence
    ///
    /// Called before each run. Only reproducible sources do anything here; the
    /// timing reference of timing-derived sources is deliberately left alone so
    /// it keeps advancing across runs in the same process.
    fn restart(&mut self) {}

    /// Seed from which the produced sequence can be replayed, if any
    fn replay_seed(&self) -> Option<NonZeroU32> {
        None
    }
}

/// Lazily captured start time shared by the timing-derived sources
///
/// The first call to [`StartClock::arm`] records the reference instant; later
/// calls never move it.
#[derive(Debug, Default)]
pub struct StartClock {
    start: Option<Timestamp>,
}

impl StartClock {
    pub fn new() -> Self {
        Self { start: None }
    }

    /// Capture the reference instant if this is the first use
    #[inline]
    pub fn arm(&mut self) -> Timestamp {
        *self.start.get_or_insert_with(Timestamp::now)
    }

    /// Whether the reference instant has been captured
    pub fn is_armed(&self) -> bool {
        self.start.is_some()
    }

    /// Low 8 bits of microseconds elapsed since the reference instant
    #[inline]
    pub fn timing_byte(&mut self) -> u32 {
        (self.arm().elapsed_micros() & 0xFF) as u32
    }
}

/// Build the configured data source
///
/// `analog` is only consumed by the sampled source; it is configured here with
/// the round-robin mask the chosen layout needs.
pub fn from_config(
    config: &SourceConfig,
    analog: Box<dyn AnalogSource>,
) -> Result<Box<dyn DataSource>, crate::error::BenchError> {
    let source: Box<dyn DataSource> = match config.kind {
        SourceKind::Sampled => Box::new(sampled::SampledSource::new(analog, config.sample_layout)),
        SourceKind::Counter => Box::new(counter::CounterSource::new(config.counter_layout)),
        SourceKind::Lfsr => {
            let seed = NonZeroU32::new(config.seed).ok_or_else(|| {
                crate::error::BenchError::Config("LFSR seed must be non-zero".to_string())
            })?;
            Box::new(lfsr::LfsrSource::new(seed))
        }
    };

    tracing::debug!(source = source.name(), "data source configured");
    Ok(source)
}
