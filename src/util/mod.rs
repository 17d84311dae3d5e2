//! Shared utilities: aligned buffers, timing, verification

pub mod buffer;
pub mod time;
pub mod verification;
