//! Chunked write loop
//!
//! Writes exactly `file_size` bytes as `file_size / buffer_size` whole-buffer
//! writes. Each buffer is filled word by word from the data source immediately
//! before it is written. The first failed or short write ends the loop; nothing
//! is retried.

use crate::config::validator::buffer_size;
use crate::error::BenchError;
use crate::source::DataSource;
use crate::store::FileStore;
use crate::util::buffer::WriteBuffer;
use std::io;
use std::path::Path;

/// Buffer sizing for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WritePlan {
    /// Total bytes to write
    pub file_size: u64,
    /// Bytes per write call, `min(file_size, chunk_size)`
    pub buffer_size: usize,
}

impl WritePlan {
    /// Size the buffer for a file and chunk capacity
    ///
    /// # Errors
    ///
    /// `BenchError::Config` if the file size is not an exact multiple of the
    /// buffer size or the buffer does not hold a whole number of words.
    pub fn new(file_size: u64, chunk_size: u64) -> Result<Self, BenchError> {
        let buffer_size = buffer_size(file_size, chunk_size)?;
        Ok(Self {
            file_size,
            buffer_size,
        })
    }

    /// Number of write calls needed
    pub fn chunk_count(&self) -> u64 {
        self.file_size / self.buffer_size as u64
    }
}

/// Write every chunk of `plan` to an open handle
///
/// Returns the number of bytes written, which on success is always
/// `plan.file_size`. The handle is left open; closing it is the caller's job
/// on both the success and the error path.
pub fn write_chunks<S: FileStore>(
    store: &mut S,
    handle: &mut S::Handle,
    path: &Path,
    plan: &WritePlan,
    buffer: &mut WriteBuffer,
    source: &mut dyn DataSource,
) -> Result<u64, BenchError> {
    debug_assert_eq!(buffer.size(), plan.buffer_size);

    let mut written = 0u64;
    for chunk in 0..plan.chunk_count() {
        buffer.fill_words(|| source.next_word());

        let items = store
            .write_chunk(handle, buffer.as_slice())
            .map_err(|source| BenchError::Write {
                path: path.to_path_buf(),
                chunk,
                source,
            })?;

        if items != 1 {
            return Err(BenchError::Write {
                path: path.to_path_buf(),
                chunk,
                source: io::Error::new(
                    io::ErrorKind::WriteZero,
                    format!("wrote {} of 1 buffer of {} bytes", items, buffer.size()),
                ),
            });
        }

        written += buffer.size() as u64;
    }

    tracing::trace!(path = %path.display(), bytes = written, "write loop complete");
    Ok(written)
}
