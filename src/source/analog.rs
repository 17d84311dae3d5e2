//! Analog sampling collaborator
//!
//! The sampled data source reads from an analog front end (an ADC with
//! round-robin channel selection on embedded targets). This module defines the
//! interface plus two implementations usable off-target:
//!
//! - [`ClockJitterAnalog`]: derives 12-bit "samples" from monotonic clock jitter
//! - [`ScriptedAnalog`]: replays a fixed sample script and records configuration

use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Analog sampler
pub trait AnalogSource: Send {
    /// Select the channels sampled in round-robin order (bit N = channel N)
    fn configure(&mut self, round_robin_mask: u8);

    /// Read one raw sample; callers mask it to the converter width
    fn read_sample(&mut self) -> u16;
}

/// Host stand-in for an ADC
///
/// Each sample is built from the low bits of the nanoseconds elapsed since
/// creation, offset by the active round-robin channel. The values are noisy and
/// not reproducible, which is all the sampled source asks of real hardware.
pub struct ClockJitterAnalog {
    origin: Instant,
    channels: Vec<u8>,
    next_channel: usize,
}

impl ClockJitterAnalog {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            channels: vec![0],
            next_channel: 0,
        }
    }
}

impl Default for ClockJitterAnalog {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalogSource for ClockJitterAnalog {
    fn configure(&mut self, round_robin_mask: u8) {
        self.channels = (0..8u8).filter(|ch| round_robin_mask & (1 << ch) != 0).collect();
        if self.channels.is_empty() {
            self.channels.push(0);
        }
        self.next_channel = 0;
    }

    fn read_sample(&mut self) -> u16 {
        let channel = self.channels[self.next_channel];
        self.next_channel = (self.next_channel + 1) % self.channels.len();

        let nanos = self.origin.elapsed().as_nanos() as u64;
        let jitter = nanos ^ (nanos >> 11) ^ (nanos >> 23);
        ((jitter as u16).wrapping_add((channel as u16) << 9)) & 0x0FFF
    }
}

/// Sampler replaying a fixed script, for tests
///
/// Samples cycle through the script. Configuration calls are recorded and can
/// be inspected through a clone, since the source itself is moved into the
/// data source under test.
#[derive(Clone)]
pub struct ScriptedAnalog {
    script: Arc<Vec<u16>>,
    position: Arc<Mutex<usize>>,
    configured: Arc<Mutex<Vec<u8>>>,
}

impl ScriptedAnalog {
    /// Create a sampler that replays `script`
    ///
    /// # Panics
    ///
    /// Panics if the script is empty.
    pub fn new(script: Vec<u16>) -> Self {
        assert!(!script.is_empty(), "sample script must not be empty");
        Self {
            script: Arc::new(script),
            position: Arc::new(Mutex::new(0)),
            configured: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Round-robin masks passed to `configure`, in call order
    pub fn configured_masks(&self) -> Vec<u8> {
        self.configured.lock().unwrap().clone()
    }

    /// Number of samples read so far
    pub fn samples_read(&self) -> usize {
        *self.position.lock().unwrap()
    }
}

impl AnalogSource for ScriptedAnalog {
    fn configure(&mut self, round_robin_mask: u8) {
        self.configured.lock().unwrap().push(round_robin_mask);
    }

    fn read_sample(&mut self) -> u16 {
        let mut position = self.position.lock().unwrap();
        let sample = self.script[*position % self.script.len()];
        *position += 1;
        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_jitter_samples_are_12_bit() {
        let mut analog = ClockJitterAnalog::new();
        analog.configure(7);
        for _ in 0..1000 {
            assert!(analog.read_sample() <= 0x0FFF);
        }
    }

    #[test]
    fn test_clock_jitter_round_robin_channels() {
        let mut analog = ClockJitterAnalog::new();
        analog.configure(0b0000_0101);
        assert_eq!(analog.channels, vec![0, 2]);

        analog.configure(0);
        assert_eq!(analog.channels, vec![0]);
    }

    #[test]
    fn test_scripted_analog_cycles() {
        let mut analog = ScriptedAnalog::new(vec![1, 2, 3]);
        let samples: Vec<u16> = (0..5).map(|_| analog.read_sample()).collect();
        assert_eq!(samples, vec![1, 2, 3, 1, 2]);
        assert_eq!(analog.samples_read(), 5);
    }

    #[test]
    fn test_scripted_analog_records_configuration() {
        let analog = ScriptedAnalog::new(vec![0]);
        let mut handle = analog.clone();
        handle.configure(2);
        handle.configure(7);
        assert_eq!(analog.configured_masks(), vec![2, 7]);
    }
}
