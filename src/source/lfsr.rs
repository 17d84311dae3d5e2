//! LFSR data source
//!
//! Galois linear-feedback shift register over a 32-bit state. The output is a
//! pure function of the seed and the number of words drawn, which makes this
//! the only source whose files can be verified after writing.
//!
//! Seeding sets the state and advances it [`WARMUP_STEPS`] times so the first
//! words are not dominated by the seed's bit pattern.

use super::DataSource;
use std::num::NonZeroU32;

/// Feedback tap mask
pub const TAPS: u32 = 0x8020_0003;

/// Steps discarded after seeding
pub const WARMUP_STEPS: usize = 32;

pub struct LfsrSource {
    seed: NonZeroU32,
    state: u32,
}

impl LfsrSource {
    /// Create a generator seeded with `seed`
    ///
    /// The first `next_word()` returns the value the register holds after
    /// `WARMUP_STEPS + 1` steps.
    pub fn new(seed: NonZeroU32) -> Self {
        let mut source = Self {
            seed,
            state: 0,
        };
        source.seed_state(seed);
        source
    }

    fn seed_state(&mut self, seed: NonZeroU32) {
        self.state = seed.get();
        for _ in 0..WARMUP_STEPS {
            self.step();
        }
    }

    #[inline]
    fn step(&mut self) -> u32 {
        let lsb = self.state & 1;
        self.state >>= 1;
        if lsb != 0 {
            self.state ^= TAPS;
        }
        self.state
    }
}

impl DataSource for LfsrSource {
    #[inline]
    fn next_word(&mut self) -> u32 {
        self.step()
    }

    fn name(&self) -> &'static str {
        "lfsr"
    }

    fn restart(&mut self) {
        self.seed_state(self.seed);
    }

    fn replay_seed(&self) -> Option<NonZeroU32> {
        Some(self.seed)
    }
}
