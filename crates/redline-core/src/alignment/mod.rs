//! Sequence alignment module
//!
//! Aligns token sequences with an exact edit-script (diff) pass, then
//! repairs ambiguous spans with fuzzy window matching so word-boundary
//! shifts ("frameshifts") still find their counterpart. Produces read-only
//! `AlignedSegment` correspondences across all three transcripts.

mod aligner;
mod opcodes;
mod types;

pub use aligner::{align_corrected, align_original, WINDOW_MATCH_THRESHOLD};
pub use opcodes::{opcodes, OpTag, Opcode};
pub use types::{AlignedSegment, SegmentType};
