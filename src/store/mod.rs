//! File store abstraction
//!
//! A file store is the filesystem the benchmark writes to. On a host that is the
//! local filesystem; on an embedded target it is whatever FAT driver sits on top
//! of the SD card. The benchmark only needs a small POSIX-like surface: stat,
//! open in one of two modes, rewind, whole-buffer writes, and close.
//!
//! # Lifecycle
//!
//! 1. `stat()` the path to decide between reuse and fresh mode
//! 2. `open()` the path, receiving a handle
//! 3. `rewind()` (reuse mode only) and `write_chunk()` repeatedly
//! 4. `close()` the handle, consuming it
//!
//! Read-back verification reopens the file through `open_read()`, so a store
//! that is not backed by the host filesystem is verified against its own
//! contents.
//!
//! Errors are `std::io::Error` so the underlying OS error code survives into
//! the benchmark's error reports.

use std::io::{self, Read};
use std::path::Path;

pub mod local;
pub mod mock;

/// Metadata returned by `FileStore::stat`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    /// File size in bytes
    pub size: u64,
}

/// How a file is opened for the benchmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpenMode {
    /// Read-write without truncation; existing blocks are overwritten in place
    Reuse,
    /// Create if missing, truncate to zero length if present
    Fresh,
}

impl std::fmt::Display for OpenMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpenMode::Reuse => write!(f, "reuse"),
            OpenMode::Fresh => write!(f, "fresh"),
        }
    }
}

/// File store trait
///
/// Implementations are used from a single thread; the handle type is owned by
/// the caller between `open` and `close`.
pub trait FileStore {
    /// Open file handle
    type Handle;

    /// Sequential reader over a file's contents
    type Reader: Read;

    /// Query file metadata
    ///
    /// Returns `Ok(None)` if the path does not exist.
    fn stat(&self, path: &Path) -> io::Result<Option<FileStat>>;

    /// Open `path` in the given mode
    fn open(&mut self, path: &Path, mode: OpenMode) -> io::Result<Self::Handle>;

    /// Reposition the handle to offset 0
    fn rewind(&mut self, handle: &mut Self::Handle) -> io::Result<()>;

    /// Write the whole buffer at the current position
    ///
    /// Returns the number of complete buffers ("items") written: `1` when the
    /// entire buffer was stored, `0` on a short write.
    fn write_chunk(&mut self, handle: &mut Self::Handle, buffer: &[u8]) -> io::Result<usize>;

    /// Flush file data to the media
    fn sync(&mut self, handle: &mut Self::Handle) -> io::Result<()>;

    /// Close the handle
    ///
    /// The handle is consumed even if closing reports an error.
    fn close(&mut self, handle: Self::Handle) -> io::Result<()>;

    /// Open an existing file for reading from offset 0
    fn open_read(&mut self, path: &Path) -> io::Result<Self::Reader>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_mode_display() {
        assert_eq!(OpenMode::Reuse.to_string(), "reuse");
        assert_eq!(OpenMode::Fresh.to_string(), "fresh");
    }
}
