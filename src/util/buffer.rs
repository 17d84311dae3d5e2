//! Sector-aligned write buffer
//!
//! The write loop fills one buffer per chunk and hands it to the file store in a
//! single call. Buffers are aligned to the media sector size so the same buffer
//! can be used with `O_DIRECT`-style stores, and allocation failure is reported
//! as an error instead of aborting the process.

use crate::error::BenchError;
use std::alloc::{alloc_zeroed, dealloc, Layout};

/// Default buffer alignment, one media sector
pub const SECTOR_SIZE: usize = 512;

/// Size in bytes of one generated word
pub const WORD_SIZE: usize = std::mem::size_of::<u32>();

/// Memory-aligned buffer holding one chunk of generated data
pub struct WriteBuffer {
    ptr: *mut u8,
    size: usize,
    layout: Layout,
}

impl WriteBuffer {
    /// Allocate a zeroed buffer of `size` bytes aligned to `alignment`
    ///
    /// # Errors
    ///
    /// Returns `BenchError::Allocation` if the allocator cannot satisfy the
    /// request, and `BenchError::Config` for a zero size or an alignment that is
    /// not a power of two.
    pub fn new(size: usize, alignment: usize) -> Result<Self, BenchError> {
        if size == 0 {
            return Err(BenchError::Config("buffer size must be greater than 0".to_string()));
        }

        let layout = Layout::from_size_align(size, alignment).map_err(|_| {
            BenchError::Config(format!(
                "invalid buffer layout: size={}, alignment={}",
                size, alignment
            ))
        })?;

        // SAFETY: layout has a non-zero size
        let ptr = unsafe { alloc_zeroed(layout) };
        if ptr.is_null() {
            return Err(BenchError::Allocation { size });
        }

        Ok(WriteBuffer {
            ptr,
            size,
            layout,
        })
    }

    /// Get the buffer as a slice
    #[inline(always)]
    pub fn as_slice(&self) -> &[u8] {
        // SAFETY: ptr is valid for size initialized bytes for the buffer's lifetime
        unsafe { std::slice::from_raw_parts(self.ptr, self.size) }
    }

    /// Get the buffer as a mutable slice
    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: ptr is valid and uniquely borrowed through &mut self
        unsafe { std::slice::from_raw_parts_mut(self.ptr, self.size) }
    }

    /// Get the size of the buffer in bytes
    #[inline(always)]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Fill the buffer word by word, little-endian, calling `next` once per word
    ///
    /// # Panics
    ///
    /// Panics if the buffer size is not a multiple of the word size. Sizes are
    /// validated before a buffer is created, so reaching this is a logic error.
    pub fn fill_words<F: FnMut() -> u32>(&mut self, mut next: F) {
        assert!(
            self.size % WORD_SIZE == 0,
            "buffer size {} is not a multiple of the word size",
            self.size
        );

        for word in self.as_mut_slice().chunks_exact_mut(WORD_SIZE) {
            word.copy_from_slice(&next().to_le_bytes());
        }
    }
}

impl Drop for WriteBuffer {
    fn drop(&mut self) {
        // SAFETY: ptr was allocated with this exact layout
        unsafe {
            dealloc(self.ptr, self.layout);
        }
    }
}

// WriteBuffer is Send because it owns its memory
unsafe impl Send for WriteBuffer {}
