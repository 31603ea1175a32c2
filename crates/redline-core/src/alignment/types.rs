//! Alignment types

use serde::{Deserialize, Serialize};

/// Edit-script tag carried by a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentType {
    Equal,
    Replace,
    Insert,
    Delete,
}

/// A correspondence between spans of the original, corrected, and
/// ground-truth token sequences. Half-open index ranges into each
/// sequence; produced once per alignment pass and read-only afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignedSegment {
    /// Edit-script tag for this correspondence.
    pub segment_type: SegmentType,
    /// Span in the original token sequence.
    pub orig_start: usize,
    pub orig_end: usize,
    /// Span in the corrected token sequence.
    pub corr_start: usize,
    pub corr_end: usize,
    /// Span in the ground-truth token sequence.
    pub gt_start: usize,
    pub gt_end: usize,
    /// Joined original span text.
    pub original_text: String,
    /// Joined corrected span text.
    pub corrected_text: String,
    /// Joined ground-truth span text.
    pub ground_truth_text: String,
    /// Alignment quality in [0, 1].
    pub alignment_score: f64,
}
