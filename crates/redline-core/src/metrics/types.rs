//! Accuracy metric types

use serde::{Deserialize, Serialize};

use crate::stats::Significance;

/// Character-level accuracy metrics for one consultation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccuracyMetrics {
    /// Corrected-transcript accuracy against ground truth, clamped to [0, 1].
    pub accuracy: f64,
    /// Corrected edit distance over ground-truth length. Not clamped.
    pub character_error_rate: f64,
    /// Corrected accuracy minus original accuracy.
    pub improvement_over_original: f64,
    /// Ground-truth length in characters.
    pub sample_size_chars: usize,
    /// Human-readable 95% band over the corrected accuracy.
    pub confidence_band: String,
    /// Significant when the band's lower bound exceeds 0.5.
    pub statistical_significance: Significance,
}
