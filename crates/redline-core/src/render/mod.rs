//! Diff rendering module
//!
//! Human-readable views of transcript divergences: a line-based unified
//! diff with configurable context, and an inline word-level diff marking
//! deletions as `[- text -]` and insertions as `{+ text +}`.

mod inline;
mod unified;

pub use inline::inline_diff;
pub use unified::unified_diff;
