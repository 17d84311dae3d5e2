//! Read-back verification for reproducible runs
//!
//! Only an LFSR-filled file can be checked: the whole file is a pure function
//! of the seed, so the expected contents are regenerated from a fresh generator
//! and compared buffer by buffer. The file is read through the same store
//! that wrote it.

use crate::error::BenchError;
use crate::source::lfsr::LfsrSource;
use crate::source::DataSource;
use crate::store::FileStore;
use crate::util::verification::{verify_words, VerificationResult};
use std::io::{self, Read};
use std::num::NonZeroU32;
use std::path::Path;

/// Check that `path` holds the LFSR sequence for `seed`
///
/// `file_size` is the size the run wrote; a file of any other length fails
/// with a read error. `buffer_size` only controls how much is read at a time.
pub fn verify_file<S: FileStore>(
    store: &mut S,
    path: &Path,
    seed: NonZeroU32,
    file_size: u64,
    buffer_size: usize,
) -> Result<(), BenchError> {
    let read_error = |offset: u64, source: io::Error| BenchError::Read {
        path: path.to_path_buf(),
        offset,
        source,
    };

    let mut reader = store.open_read(path).map_err(|e| read_error(0, e))?;
    let actual_size = store
        .stat(path)
        .map_err(|e| read_error(0, e))?
        .map_or(0, |stat| stat.size);
    if actual_size != file_size {
        return Err(read_error(
            0,
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("file is {} bytes, expected {}", actual_size, file_size),
            ),
        ));
    }

    let mut reference = LfsrSource::new(seed);
    let mut buffer = vec![0u8; buffer_size];
    let mut offset = 0u64;

    while offset < file_size {
        let len = buffer_size.min((file_size - offset) as usize);
        reader
            .read_exact(&mut buffer[..len])
            .map_err(|e| read_error(offset, e))?;

        if let VerificationResult::Failure {
            offset: at,
            expected,
            actual,
        } = verify_words(&buffer[..len], offset, || reference.next_word())
        {
            return Err(BenchError::Verify {
                path: path.to_path_buf(),
                offset: at,
                expected,
                actual,
            });
        }

        offset += len as u64;
    }

    tracing::debug!(path = %path.display(), bytes = offset, seed = seed.get(), "verification passed");
    Ok(())
}
