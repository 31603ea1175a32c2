//! Detection types

use serde::{Deserialize, Serialize};

use crate::patterns::ErrorPattern;
use crate::stats::ConfidenceStatistics;

/// Which way a divergence points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// The correction moved text away from the ground truth.
    FalsePositive,
    /// An ASR error the correction pass failed to fix.
    FalseNegative,
}

/// How the mismatch aligns across the sequences. Sequence-level variants
/// mark segments judged too misaligned for word-by-word analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentType {
    Frameshift,
    Punctuation,
    WordBoundary,
    Phonetic,
    General,
    SequenceLevelFrameshift,
    SequenceLevelPunctuation,
    SequenceLevelWordBoundary,
    SequenceLevelPhonetic,
    SequenceLevelGeneral,
}

impl AlignmentType {
    /// Lift a word-level alignment type to its sequence-level variant.
    pub fn sequence_level(self) -> AlignmentType {
        match self {
            AlignmentType::Frameshift => AlignmentType::SequenceLevelFrameshift,
            AlignmentType::Punctuation => AlignmentType::SequenceLevelPunctuation,
            AlignmentType::WordBoundary => AlignmentType::SequenceLevelWordBoundary,
            AlignmentType::Phonetic => AlignmentType::SequenceLevelPhonetic,
            AlignmentType::General => AlignmentType::SequenceLevelGeneral,
            other => other,
        }
    }
}

/// One detected divergence. Created by the detector, never mutated
/// afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermAnalysis {
    /// The problematic text.
    pub term: String,
    /// False positive or false negative.
    pub error_type: ErrorType,
    /// Surrounding tokens from the original transcript.
    pub original_context: String,
    /// Surrounding tokens from the corrected transcript.
    pub corrected_context: String,
    /// Surrounding tokens from the ground truth.
    pub ground_truth_context: String,
    /// Detection confidence in [0, 1].
    pub confidence: f64,
    /// Token index in the ground-truth sequence.
    pub position: usize,
    /// Caller-supplied consultation identifier, not used in computation.
    pub consultation_id: String,
    /// Caller-supplied correction backend tag, not used in computation.
    pub backend: String,
    /// Fuzzy score (0-100) of the side that evidences the error:
    /// corrected-vs-ground-truth for false positives,
    /// original-vs-ground-truth for false negatives.
    pub fuzzy_score: f64,
    /// How the mismatch aligns across sequences.
    pub alignment_type: AlignmentType,
    /// The ground-truth text this term should have been.
    pub suggested_correction: String,
    /// Error category from the pattern table.
    pub error_pattern: ErrorPattern,
    /// Statistics over the per-position scores of the enclosing segment.
    pub confidence_statistics: ConfidenceStatistics,
}
