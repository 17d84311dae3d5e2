//! Timing utilities
//!
//! Monotonic timestamps for the benchmark window and for the data sources'
//! timing byte, plus throughput math and human-readable formatting.

use std::time::{Duration, Instant};

/// Monotonic timestamp
///
/// Thin wrapper around `std::time::Instant` with the elapsed-time helpers the
/// benchmark and the data sources need.
#[derive(Debug, Clone, Copy)]
pub struct Timestamp {
    instant: Instant,
}

impl Timestamp {
    /// Create a new timestamp representing the current time
    #[inline]
    pub fn now() -> Self {
        Self {
            instant: Instant::now(),
        }
    }

    /// Get the elapsed time since this timestamp
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.instant.elapsed()
    }

    /// Get the elapsed time in microseconds
    #[inline]
    pub fn elapsed_micros(&self) -> u64 {
        self.elapsed().as_micros() as u64
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

/// Format a duration in human-readable form
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use writepulse::util::time::format_duration;
///
/// assert_eq!(format_duration(Duration::from_nanos(500)), "500ns");
/// assert_eq!(format_duration(Duration::from_nanos(1500)), "1.50us");
/// assert_eq!(format_duration(Duration::from_micros(2500)), "2.50ms");
/// assert_eq!(format_duration(Duration::from_secs(5)), "5.00s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();

    if nanos < 1_000 {
        format!("{}ns", nanos)
    } else if nanos < 1_000_000 {
        format!("{:.2}us", nanos as f64 / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.2}ms", nanos as f64 / 1_000_000.0)
    } else {
        format!("{:.2}s", nanos as f64 / 1_000_000_000.0)
    }
}

/// Calculate throughput from bytes transferred and duration
///
/// Returns bytes per second. A duration too short for the clock to resolve
/// yields `f64::INFINITY` rather than a division fault.
pub fn calculate_throughput(bytes: u64, duration: Duration) -> f64 {
    let seconds = duration.as_secs_f64();
    if seconds > 0.0 {
        bytes as f64 / seconds
    } else {
        f64::INFINITY
    }
}

/// Format throughput in human-readable form (B/s, KiB/s, MiB/s, GiB/s)
///
/// # Examples
///
/// ```
/// use writepulse::util::time::format_throughput;
///
/// assert_eq!(format_throughput(500.0), "500.00 B/s");
/// assert_eq!(format_throughput(1536.0), "1.50 KiB/s");
/// assert_eq!(format_throughput(2_621_440.0), "2.50 MiB/s");
/// assert_eq!(format_throughput(f64::INFINITY), "unbounded");
/// ```
pub fn format_throughput(bytes_per_sec: f64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = KIB * 1024.0;
    const GIB: f64 = MIB * 1024.0;

    if bytes_per_sec.is_infinite() {
        "unbounded".to_string()
    } else if bytes_per_sec >= GIB {
        format!("{:.2} GiB/s", bytes_per_sec / GIB)
    } else if bytes_per_sec >= MIB {
        format!("{:.2} MiB/s", bytes_per_sec / MIB)
    } else if bytes_per_sec >= KIB {
        format!("{:.2} KiB/s", bytes_per_sec / KIB)
    } else {
        format!("{:.2} B/s", bytes_per_sec)
    }
}

/// Format a byte count with binary units
pub fn format_bytes(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    const GIB: u64 = MIB * 1024;

    if bytes >= GIB {
        format!("{:.2} GiB", bytes as f64 / GIB as f64)
    } else if bytes >= MIB {
        format!("{:.2} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.2} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_timestamp_elapsed() {
        let start = Timestamp::now();
        thread::sleep(Duration::from_millis(10));
        assert!(start.elapsed() >= Duration::from_millis(10));
    }

    #[test]
    fn test_timestamp_elapsed_micros() {
        let start = Timestamp::now();
        thread::sleep(Duration::from_millis(1));
        assert!(start.elapsed_micros() >= 1_000);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_nanos(500)), "500ns");
        assert_eq!(format_duration(Duration::from_nanos(1500)), "1.50us");
        assert_eq!(format_duration(Duration::from_micros(1500)), "1.50ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
    }

    #[test]
    fn test_calculate_throughput() {
        let duration = Duration::from_secs(10);
        let throughput = calculate_throughput(1024 * 1024 * 10, duration);
        assert_eq!(throughput, 1024.0 * 1024.0);
    }

    #[test]
    fn test_calculate_throughput_fractional() {
        let duration = Duration::from_millis(250);
        let throughput = calculate_throughput(0x0100_0000, duration);
        assert!((throughput - 64.0 * 1024.0 * 1024.0).abs() < 1e-6);
    }

    #[test]
    fn test_calculate_throughput_zero_duration() {
        let throughput = calculate_throughput(4096, Duration::ZERO);
        assert!(throughput.is_infinite());
        assert!(throughput.is_sign_positive());
    }

    #[test]
    fn test_format_throughput() {
        assert_eq!(format_throughput(500.0), "500.00 B/s");
        assert_eq!(format_throughput(1536.0), "1.50 KiB/s");
        assert_eq!(format_throughput(1536.0 * 1024.0), "1.50 MiB/s");
        assert_eq!(format_throughput(1536.0 * 1024.0 * 1024.0), "1.50 GiB/s");
        assert_eq!(format_throughput(f64::INFINITY), "unbounded");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(8 * 1024), "8.00 KiB");
        assert_eq!(format_bytes(0x0100_0000), "16.00 MiB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.00 GiB");
    }
}
