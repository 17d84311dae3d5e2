//! Mock file store for testing
//!
//! Simulates a file store in memory without touching the filesystem, making
//! benchmark tests fast and deterministic.
//!
//! # Features
//!
//! - Pre-existing files with configurable sizes or contents
//! - File contents kept in memory, so written data can be read back
//! - Injected open, sync and close failures, and write failures or short
//!   writes on a chosen chunk
//! - Tracks every store call for verification
//! - Clones share state, so a test can inspect a store it moved into the code
//!   under test
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use writepulse::store::{FileStore, OpenMode};
//! use writepulse::store::mock::{MockStore, StoreCall};
//!
//! let mut store = MockStore::new();
//! let mut handle = store.open(Path::new("big.dat"), OpenMode::Fresh).unwrap();
//! assert_eq!(store.write_chunk(&mut handle, &[0u8; 512]).unwrap(), 1);
//! store.close(handle).unwrap();
//!
//! assert_eq!(store.file_size(Path::new("big.dat")), Some(512));
//! assert_eq!(store.close_count(), 1);
//! ```

use super::{FileStat, FileStore, OpenMode};
use std::collections::HashMap;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Record of a store call for testing verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Stat(PathBuf),
    Open(PathBuf, OpenMode),
    Rewind,
    Write { chunk: u64, length: usize },
    Sync,
    Close,
    OpenRead(PathBuf),
}

/// Injected write behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteFault {
    /// Fail the write with this OS error code
    Error(i32),
    /// Report zero items written
    Short,
}

/// Handle returned by `MockStore::open`
#[derive(Debug)]
pub struct MockHandle {
    path: PathBuf,
    position: u64,
    chunks_written: u64,
}

#[derive(Default)]
struct MockState {
    files: HashMap<PathBuf, Vec<u8>>,
    calls: Vec<StoreCall>,
    open_error: Option<i32>,
    write_fault: Option<(u64, WriteFault)>,
    sync_error: Option<i32>,
    close_error: Option<i32>,
}

/// Mock file store
#[derive(Clone, Default)]
pub struct MockStore {
    state: Arc<Mutex<MockState>>,
}

impl MockStore {
    /// Create an empty store where every operation succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pre-existing zero-filled file of `size` bytes
    pub fn with_file(self, path: impl Into<PathBuf>, size: u64) -> Self {
        self.with_contents(path, vec![0u8; size as usize])
    }

    /// Add a pre-existing file holding `contents`
    pub fn with_contents(self, path: impl Into<PathBuf>, contents: Vec<u8>) -> Self {
        self.state.lock().unwrap().files.insert(path.into(), contents);
        self
    }

    /// Make every open fail with the given OS error code
    pub fn set_open_error(&self, code: i32) {
        self.state.lock().unwrap().open_error = Some(code);
    }

    /// Inject a fault on the write of chunk `chunk` (0-based)
    pub fn set_write_fault(&self, chunk: u64, fault: WriteFault) {
        self.state.lock().unwrap().write_fault = Some((chunk, fault));
    }

    /// Make sync fail with the given OS error code
    pub fn set_sync_error(&self, code: i32) {
        self.state.lock().unwrap().sync_error = Some(code);
    }

    /// Make close report the given OS error code
    pub fn set_close_error(&self, code: i32) {
        self.state.lock().unwrap().close_error = Some(code);
    }

    /// Current size of a file, if it exists
    pub fn file_size(&self, path: &Path) -> Option<u64> {
        self.state.lock().unwrap().files.get(path).map(|data| data.len() as u64)
    }

    /// Current contents of a file, if it exists
    pub fn contents(&self, path: &Path) -> Option<Vec<u8>> {
        self.state.lock().unwrap().files.get(path).cloned()
    }

    /// Get a copy of all store calls for verification
    pub fn calls(&self) -> Vec<StoreCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Mode of the most recent open, if any
    pub fn last_open_mode(&self) -> Option<OpenMode> {
        self.calls().iter().rev().find_map(|call| match call {
            StoreCall::Open(_, mode) => Some(*mode),
            _ => None,
        })
    }

    /// Number of write calls issued
    pub fn write_count(&self) -> usize {
        self.count(|call| matches!(call, StoreCall::Write { .. }))
    }

    /// Number of close calls issued
    pub fn close_count(&self) -> usize {
        self.count(|call| matches!(call, StoreCall::Close))
    }

    fn count(&self, pred: impl Fn(&StoreCall) -> bool) -> usize {
        self.state.lock().unwrap().calls.iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: StoreCall) {
        self.state.lock().unwrap().calls.push(call);
    }
}

impl FileStore for MockStore {
    type Handle = MockHandle;
    type Reader = Cursor<Vec<u8>>;

    fn stat(&self, path: &Path) -> io::Result<Option<FileStat>> {
        self.record(StoreCall::Stat(path.to_path_buf()));
        Ok(self.file_size(path).map(|size| FileStat { size }))
    }

    fn open(&mut self, path: &Path, mode: OpenMode) -> io::Result<MockHandle> {
        self.record(StoreCall::Open(path.to_path_buf(), mode));

        let mut state = self.state.lock().unwrap();
        if let Some(code) = state.open_error {
            return Err(io::Error::from_raw_os_error(code));
        }

        match mode {
            OpenMode::Reuse => {
                if !state.files.contains_key(path) {
                    return Err(io::Error::from_raw_os_error(libc::ENOENT));
                }
            }
            OpenMode::Fresh => {
                state.files.insert(path.to_path_buf(), Vec::new());
            }
        }

        Ok(MockHandle {
            path: path.to_path_buf(),
            position: 0,
            chunks_written: 0,
        })
    }

    fn rewind(&mut self, handle: &mut MockHandle) -> io::Result<()> {
        self.record(StoreCall::Rewind);
        handle.position = 0;
        Ok(())
    }

    fn write_chunk(&mut self, handle: &mut MockHandle, buffer: &[u8]) -> io::Result<usize> {
        let chunk = handle.chunks_written;
        self.record(StoreCall::Write {
            chunk,
            length: buffer.len(),
        });

        let mut state = self.state.lock().unwrap();
        match state.write_fault {
            Some((at, WriteFault::Error(code))) if at == chunk => {
                return Err(io::Error::from_raw_os_error(code));
            }
            Some((at, WriteFault::Short)) if at == chunk => return Ok(0),
            _ => {}
        }

        let data = state.files.entry(handle.path.clone()).or_default();
        let start = handle.position as usize;
        let end = start + buffer.len();
        if data.len() < end {
            data.resize(end, 0);
        }
        data[start..end].copy_from_slice(buffer);

        handle.position = end as u64;
        handle.chunks_written += 1;
        Ok(1)
    }

    fn sync(&mut self, _handle: &mut MockHandle) -> io::Result<()> {
        self.record(StoreCall::Sync);
        match self.state.lock().unwrap().sync_error {
            Some(code) => Err(io::Error::from_raw_os_error(code)),
            None => Ok(()),
        }
    }

    fn close(&mut self, _handle: MockHandle) -> io::Result<()> {
        self.record(StoreCall::Close);
        match self.state.lock().unwrap().close_error {
            Some(code) => Err(io::Error::from_raw_os_error(code)),
            None => Ok(()),
        }
    }

    fn open_read(&mut self, path: &Path) -> io::Result<Cursor<Vec<u8>>> {
        self.record(StoreCall::OpenRead(path.to_path_buf()));
        self.contents(path)
            .map(Cursor::new)
            .ok_or_else(|| io::Error::from_raw_os_error(libc::ENOENT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_store_basic() {
        let mut store = MockStore::new();
        let path = Path::new("big.dat");

        assert_eq!(store.stat(path).unwrap(), None);
        let mut handle = store.open(path, OpenMode::Fresh).unwrap();
        for _ in 0..4 {
            assert_eq!(store.write_chunk(&mut handle, &[0u8; 1024]).unwrap(), 1);
        }
        store.close(handle).unwrap();

        assert_eq!(store.file_size(path), Some(4096));
        assert_eq!(store.write_count(), 4);
        assert_eq!(store.close_count(), 1);
    }

    #[test]
    fn test_mock_store_reuse_keeps_size() {
        let mut store = MockStore::new().with_file("big.dat", 8192);
        let path = Path::new("big.dat");

        let mut handle = store.open(path, OpenMode::Reuse).unwrap();
        store.rewind(&mut handle).unwrap();
        store.write_chunk(&mut handle, &[0u8; 1024]).unwrap();
        store.close(handle).unwrap();

        assert_eq!(store.file_size(path), Some(8192));
        assert_eq!(store.last_open_mode(), Some(OpenMode::Reuse));
    }

    #[test]
    fn test_mock_store_keeps_written_bytes() {
        let mut store = MockStore::new().with_contents("big.dat", vec![9u8; 8]);
        let path = Path::new("big.dat");

        let mut handle = store.open(path, OpenMode::Reuse).unwrap();
        store.write_chunk(&mut handle, &[1, 2, 3, 4]).unwrap();
        store.close(handle).unwrap();

        assert_eq!(store.contents(path).unwrap(), vec![1, 2, 3, 4, 9, 9, 9, 9]);

        let mut read_back = Vec::new();
        std::io::Read::read_to_end(&mut store.open_read(path).unwrap(), &mut read_back).unwrap();
        assert_eq!(read_back, vec![1, 2, 3, 4, 9, 9, 9, 9]);
    }

    #[test]
    fn test_mock_store_open_read_missing() {
        let mut store = MockStore::new();
        let err = store.open_read(Path::new("missing.dat")).unwrap_err();
        assert_eq!(err.raw_os_error(), Some(libc::ENOENT));
    }

    #[test]
    fn test_mock_store_reuse_missing_file() {
        let mut store = MockStore::new();
        let err = store.open(Path::new("missing.dat"), OpenMode::Reuse).unwrap_err();
        assert_eq!(err.raw_os_error(), Some(libc::ENOENT));
    }

    #[test]
    fn test_mock_store_open_error() {
        let mut store = MockStore::new();
        store.set_open_error(libc::EACCES);
        let err = store.open(Path::new("big.dat"), OpenMode::Fresh).unwrap_err();
        assert_eq!(err.raw_os_error(), Some(libc::EACCES));
    }

    #[test]
    fn test_mock_store_write_fault() {
        let mut store = MockStore::new();
        store.set_write_fault(2, WriteFault::Error(libc::EIO));

        let mut handle = store.open(Path::new("big.dat"), OpenMode::Fresh).unwrap();
        assert!(store.write_chunk(&mut handle, &[0u8; 16]).is_ok());
        assert!(store.write_chunk(&mut handle, &[0u8; 16]).is_ok());
        let err = store.write_chunk(&mut handle, &[0u8; 16]).unwrap_err();
        assert_eq!(err.raw_os_error(), Some(libc::EIO));
    }

    #[test]
    fn test_mock_store_short_write() {
        let mut store = MockStore::new();
        store.set_write_fault(0, WriteFault::Short);

        let mut handle = store.open(Path::new("big.dat"), OpenMode::Fresh).unwrap();
        assert_eq!(store.write_chunk(&mut handle, &[0u8; 16]).unwrap(), 0);
        assert_eq!(store.file_size(Path::new("big.dat")), Some(0));
    }

    #[test]
    fn test_mock_store_clones_share_state() {
        let store = MockStore::new();
        let mut moved = store.clone();
        let handle = moved.open(Path::new("a.dat"), OpenMode::Fresh).unwrap();
        moved.close(handle).unwrap();

        assert_eq!(
            store.calls(),
            vec![
                StoreCall::Open(PathBuf::from("a.dat"), OpenMode::Fresh),
                StoreCall::Close,
            ]
        );
    }
}
