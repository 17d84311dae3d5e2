//! Open-mode policy
//!
//! Rewriting the blocks of an existing file is usually faster on flash media
//! than allocating a new file of the same size, so a file that already exists
//! with a size in `(0, target]` is reopened without truncation and rewound.
//! Anything else is created fresh. The reuse path is an optimization only; a
//! fresh open always produces a correct run.

use crate::error::BenchError;
use crate::store::{FileStat, FileStore, OpenMode};
use std::path::Path;

/// Pick the open mode for an existing file (if any) and a target size
pub fn choose_open_mode(existing: Option<FileStat>, target_size: u64) -> OpenMode {
    match existing {
        Some(stat) if stat.size > 0 && stat.size <= target_size => OpenMode::Reuse,
        _ => OpenMode::Fresh,
    }
}

/// Open `path` for a run of `target_size` bytes
///
/// Returns the handle positioned at offset 0 and the mode that was used. A
/// failed stat is treated like a missing file. If the reuse path cannot
/// rewind, the handle is closed before the error is returned.
pub fn open_target<S: FileStore>(
    store: &mut S,
    path: &Path,
    target_size: u64,
) -> Result<(S::Handle, OpenMode), BenchError> {
    let existing = match store.stat(path) {
        Ok(stat) => stat,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "stat failed, creating file fresh");
            None
        }
    };

    let mode = choose_open_mode(existing, target_size);
    tracing::debug!(
        path = %path.display(),
        existing_size = existing.map(|s| s.size),
        %mode,
        "opening target"
    );

    let mut handle = store.open(path, mode).map_err(|source| BenchError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    if mode == OpenMode::Reuse {
        if let Err(source) = store.rewind(&mut handle) {
            if let Err(e) = store.close(handle) {
                tracing::warn!(path = %path.display(), error = %e, "close after failed rewind");
            }
            return Err(BenchError::Open {
                path: path.to_path_buf(),
                source,
            });
        }
    }

    Ok((handle, mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mock::{MockStore, StoreCall};
    use std::path::PathBuf;

    const TARGET: u64 = 0x0100_0000;

    fn stat(size: u64) -> Option<FileStat> {
        Some(FileStat { size })
    }

    #[test]
    fn test_choose_reuse_for_smaller_file() {
        assert_eq!(choose_open_mode(stat(TARGET / 2), TARGET), OpenMode::Reuse);
        assert_eq!(choose_open_mode(stat(1), TARGET), OpenMode::Reuse);
    }

    #[test]
    fn test_choose_reuse_for_exact_size() {
        assert_eq!(choose_open_mode(stat(TARGET), TARGET), OpenMode::Reuse);
    }

    #[test]
    fn test_choose_fresh() {
        assert_eq!(choose_open_mode(None, TARGET), OpenMode::Fresh);
        assert_eq!(choose_open_mode(stat(0), TARGET), OpenMode::Fresh);
        assert_eq!(choose_open_mode(stat(TARGET + 1), TARGET), OpenMode::Fresh);
        assert_eq!(choose_open_mode(stat(TARGET * 2), TARGET), OpenMode::Fresh);
    }

    #[test]
    fn test_open_target_reuse_rewinds() {
        let mut store = MockStore::new().with_file("big.dat", TARGET / 2);
        let (handle, mode) = open_target(&mut store, Path::new("big.dat"), TARGET).unwrap();
        store.close(handle).unwrap();

        assert_eq!(mode, OpenMode::Reuse);
        assert_eq!(
            store.calls(),
            vec![
                StoreCall::Stat(PathBuf::from("big.dat")),
                StoreCall::Open(PathBuf::from("big.dat"), OpenMode::Reuse),
                StoreCall::Rewind,
                StoreCall::Close,
            ]
        );
    }

    #[test]
    fn test_open_target_fresh_skips_rewind() {
        let mut store = MockStore::new().with_file("big.dat", TARGET * 2);
        let (_handle, mode) = open_target(&mut store, Path::new("big.dat"), TARGET).unwrap();

        assert_eq!(mode, OpenMode::Fresh);
        assert!(!store.calls().contains(&StoreCall::Rewind));
    }

    #[test]
    fn test_open_target_error_carries_code() {
        let mut store = MockStore::new();
        store.set_open_error(libc::EROFS);

        let err = open_target(&mut store, Path::new("big.dat"), TARGET).unwrap_err();
        assert!(matches!(err, BenchError::Open { .. }));
        assert_eq!(err.os_error_code(), Some(libc::EROFS));
        assert_eq!(store.close_count(), 0);
    }
}
