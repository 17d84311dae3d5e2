//! Counter data source
//!
//! Drives the same write path as the sampled source when no sampling hardware is
//! available. Byte-wide counters advance on every call and are packed with the
//! same timing byte in the top lane.
//!
//! Layouts:
//! - `Single`: one incrementing counter replicated in lanes 0-2
//! - `Multi`: incrementing counter in lane 0, decrementing counter in lane 1,
//!   a counter stepping by [`STRIDE`] in lane 2

use super::{DataSource, StartClock};
use crate::config::CounterLayout;

/// Step of the strided counter in the multi-counter layout
pub const STRIDE: u8 = 7;

pub struct CounterSource {
    layout: CounterLayout,
    up: u8,
    down: u8,
    strided: u8,
    clock: StartClock,
}

impl CounterSource {
    pub fn new(layout: CounterLayout) -> Self {
        Self {
            layout,
            up: 0,
            down: 0,
            strided: 0,
            clock: StartClock::new(),
        }
    }

    /// Current counter lanes (incrementing, decrementing, strided)
    pub fn counters(&self) -> (u8, u8, u8) {
        (self.up, self.down, self.strided)
    }
}

impl DataSource for CounterSource {
    fn next_word(&mut self) -> u32 {
        self.clock.arm();

        self.up = self.up.wrapping_add(1);
        let lanes = match self.layout {
            CounterLayout::Single => {
                let up = self.up as u32;
                up | (up << 8) | (up << 16)
            }
            CounterLayout::Multi => {
                self.down = self.down.wrapping_sub(1);
                self.strided = self.strided.wrapping_add(STRIDE);
                self.up as u32 | ((self.down as u32) << 8) | ((self.strided as u32) << 16)
            }
        };

        lanes | (self.clock.timing_byte() << 24)
    }

    fn name(&self) -> &'static str {
        "counter"
    }
}
