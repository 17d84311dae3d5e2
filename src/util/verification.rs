//! Data verification utilities
//!
//! Compares a buffer read back from storage against the word sequence a
//! reproducible data source would have produced for it.

use super::buffer::WORD_SIZE;

/// Verification result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationResult {
    /// Data matches the expected sequence
    Success,
    /// Data does not match the expected sequence
    Failure {
        /// Byte offset of the first mismatching word
        offset: u64,
        /// Expected word
        expected: u32,
        /// Word found in the buffer
        actual: u32,
    },
}

/// Verify that a buffer contains the words produced by `next`
///
/// Words are decoded little-endian, matching how the write loop encodes them.
/// `base_offset` is the file offset of the buffer's first byte and is used to
/// report an absolute mismatch position.
///
/// `next` is called once per word until the first mismatch.
pub fn verify_words<F: FnMut() -> u32>(
    buffer: &[u8],
    base_offset: u64,
    mut next: F,
) -> VerificationResult {
    for (i, chunk) in buffer.chunks_exact(WORD_SIZE).enumerate() {
        let actual = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        let expected = next();
        if actual != expected {
            return VerificationResult::Failure {
                offset: base_offset + (i * WORD_SIZE) as u64,
                expected,
                actual,
            };
        }
    }
    VerificationResult::Success
}
