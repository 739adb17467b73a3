//! Log-file compaction
//!
//! Parses persisted lines, splits concatenated entries from older files, and
//! collapses duplicates into repeat-counted lines bounded by a retention
//! ceiling.

pub mod codec;
pub mod splitter;

mod dedup;

pub use dedup::{compact_file, compact_lines};
