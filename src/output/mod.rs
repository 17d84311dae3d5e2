//! Output formatting
//!
//! Human-readable text on stdout and an optional JSON report file.

pub mod json;
pub mod text;
