//! Configuration validation

use super::*;
use crate::error::BenchError;
use crate::util::buffer::WORD_SIZE;

/// Validate complete configuration
pub fn validate_config(config: &Config) -> anyhow::Result<()> {
    validate_benchmark(&config.benchmark)?;
    validate_source(&config.source)?;

    if config.benchmark.verify && config.source.kind != SourceKind::Lfsr {
        anyhow::bail!(
            "verify requires the lfsr source (the {} source is not reproducible)",
            config.source.kind.name()
        );
    }

    Ok(())
}

/// Validate benchmark parameters
pub fn validate_benchmark(bench: &BenchConfig) -> anyhow::Result<()> {
    buffer_size(bench.file_size, bench.chunk_size)?;

    if bench.runs == 0 {
        anyhow::bail!("runs must be at least 1");
    }

    if bench.path.as_os_str().is_empty() {
        anyhow::bail!("path must not be empty");
    }

    Ok(())
}

/// Validate data source parameters
pub fn validate_source(source: &SourceConfig) -> anyhow::Result<()> {
    if source.kind == SourceKind::Lfsr && source.seed == 0 {
        anyhow::bail!("LFSR seed must be non-zero");
    }
    Ok(())
}

/// Size of the write buffer for a file and chunk capacity
///
/// The buffer is `min(file_size, chunk_size)` bytes. The file size must be an
/// exact multiple of it and the buffer must hold a whole number of words;
/// partial chunks are never written.
pub fn buffer_size(file_size: u64, chunk_size: u64) -> Result<usize, BenchError> {
    if file_size == 0 {
        return Err(BenchError::Config("file_size must be greater than 0".to_string()));
    }
    if chunk_size == 0 {
        return Err(BenchError::Config("chunk_size must be greater than 0".to_string()));
    }

    let bufsz = file_size.min(chunk_size);
    if bufsz % WORD_SIZE as u64 != 0 {
        return Err(BenchError::Config(format!(
            "buffer size {} is not a multiple of the {}-byte word size",
            bufsz, WORD_SIZE
        )));
    }
    if file_size % bufsz != 0 {
        return Err(BenchError::Config(format!(
            "file_size {} is not a multiple of the buffer size {}",
            file_size, bufsz
        )));
    }

    usize::try_from(bufsz)
        .map_err(|_| BenchError::Config(format!("buffer size {} exceeds address space", bufsz)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn config(kind: SourceKind) -> Config {
        Config {
            benchmark: BenchConfig::new("big.dat"),
            source: SourceConfig {
                kind,
                ..SourceConfig::default()
            },
            output: OutputConfig::default(),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&config(SourceKind::Sampled)).is_ok());
        assert!(validate_config(&config(SourceKind::Counter)).is_ok());
        assert!(validate_config(&config(SourceKind::Lfsr)).is_ok());
    }

    #[test]
    fn test_buffer_size_reference_values() {
        assert_eq!(buffer_size(0x0100_0000, 8192).unwrap(), 8192);
        // Files smaller than one chunk are written in a single buffer
        assert_eq!(buffer_size(4096, 8192).unwrap(), 4096);
    }

    #[test]
    fn test_buffer_size_not_divisible() {
        let err = buffer_size(8192 * 3 + 4096, 8192).unwrap_err();
        assert!(matches!(err, BenchError::Config(_)));
    }

    #[test]
    fn test_buffer_size_ragged_word() {
        assert!(buffer_size(6, 8192).is_err());
        assert!(buffer_size(8190 * 2, 8190).is_err());
    }

    #[test]
    fn test_buffer_size_zero() {
        assert!(buffer_size(0, 8192).is_err());
        assert!(buffer_size(8192, 0).is_err());
    }

    #[test]
    fn test_zero_runs_rejected() {
        let mut cfg = config(SourceKind::Lfsr);
        cfg.benchmark.runs = 0;
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn test_zero_seed_rejected() {
        let mut cfg = config(SourceKind::Lfsr);
        cfg.source.seed = 0;
        assert!(validate_config(&cfg).is_err());

        // Seed is ignored by the other sources
        let mut cfg = config(SourceKind::Counter);
        cfg.source.seed = 0;
        assert!(validate_config(&cfg).is_ok());
    }

    #[test]
    fn test_verify_requires_lfsr() {
        let mut cfg = config(SourceKind::Sampled);
        cfg.benchmark.verify = true;
        assert!(validate_config(&cfg).is_err());

        let mut cfg = config(SourceKind::Lfsr);
        cfg.benchmark.verify = true;
        assert!(validate_config(&cfg).is_ok());
    }

    proptest! {
        #[test]
        fn prop_buffer_size_accepts_exactly_divisible(
            file_size in 1u64..(1 << 24),
            chunk_size in 1u64..(1 << 16),
        ) {
            let bufsz = file_size.min(chunk_size);
            let valid = file_size % bufsz == 0 && bufsz % 4 == 0;
            match buffer_size(file_size, chunk_size) {
                Ok(size) => {
                    prop_assert!(valid);
                    prop_assert_eq!(size as u64, bufsz);
                }
                Err(BenchError::Config(_)) => prop_assert!(!valid),
                Err(other) => prop_assert!(false, "unexpected error: {}", other),
            }
        }
    }
}
