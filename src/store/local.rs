//! Local filesystem store
//!
//! Implements `FileStore` over `std::fs` for whatever filesystem the target path
//! lives on (an SD card mounted on a single-board computer, a USB stick, or a
//! scratch directory in tests).
//!
//! # Features
//!
//! - Reuse mode opens read-write without truncation
//! - Fresh mode creates or truncates
//! - Optional O_SYNC so each write reaches the media before returning

use super::{FileStat, FileStore, OpenMode};
use std::fs::{File, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::IntoRawFd;
use std::path::Path;

/// Local filesystem store
#[derive(Debug, Clone, Default)]
pub struct LocalStore {
    /// Open files with O_SYNC
    sync: bool,
}

impl LocalStore {
    /// Create a store with default open flags
    pub fn new() -> Self {
        Self { sync: false }
    }

    /// Create a store that opens files with O_SYNC
    pub fn with_sync(sync: bool) -> Self {
        Self { sync }
    }
}

impl FileStore for LocalStore {
    type Handle = File;
    type Reader = File;

    fn stat(&self, path: &Path) -> io::Result<Option<FileStat>> {
        match std::fs::metadata(path) {
            Ok(metadata) => Ok(Some(FileStat { size: metadata.len() })),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn open(&mut self, path: &Path, mode: OpenMode) -> io::Result<File> {
        let mut options = OpenOptions::new();
        options.read(true).write(true);

        match mode {
            OpenMode::Reuse => {}
            OpenMode::Fresh => {
                options.create(true).truncate(true);
            }
        }

        if self.sync {
            options.custom_flags(libc::O_SYNC);
        }

        options.open(path)
    }

    fn rewind(&mut self, handle: &mut File) -> io::Result<()> {
        handle.seek(SeekFrom::Start(0)).map(|_| ())
    }

    fn write_chunk(&mut self, handle: &mut File, buffer: &[u8]) -> io::Result<usize> {
        match handle.write_all(buffer) {
            Ok(()) => Ok(1),
            Err(e) if e.kind() == io::ErrorKind::WriteZero => Ok(0),
            Err(e) => Err(e),
        }
    }

    fn sync(&mut self, handle: &mut File) -> io::Result<()> {
        handle.sync_data()
    }

    fn close(&mut self, handle: File) -> io::Result<()> {
        // Dropping a File discards close(2) errors, so close the descriptor directly
        let fd = handle.into_raw_fd();
        // SAFETY: fd came from into_raw_fd and is closed exactly once
        let result = unsafe { libc::close(fd) };
        if result < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    fn open_read(&mut self, path: &Path) -> io::Result<File> {
        File::open(path)
    }
}
