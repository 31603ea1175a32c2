//! Analysis orchestration types

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::detection::TermAnalysis;
use crate::metrics::AccuracyMetrics;

/// Errors surfaced by the analyzer's construction/validation layer.
/// Expected-but-rare input conditions (empty ground truth, unmatchable
/// spans) are encoded in report values instead.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid analyzer option: {0}")]
    InvalidOption(String),
}

/// Tunable analyzer options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerOptions {
    /// Detection confidence threshold in [0, 1].
    pub confidence_threshold: f64,
    /// Equal-line context either side of a unified-diff hunk.
    pub diff_context: usize,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.7,
            diff_context: 3,
        }
    }
}

/// One consultation's three transcripts plus identifying metadata. The
/// metadata is attached to every output record for traceability but never
/// used in computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Raw ASR transcript.
    pub original: String,
    /// LLM-corrected transcript.
    pub corrected: String,
    /// Human-authored ground truth.
    pub ground_truth: String,
    /// Consultation identifier.
    pub consultation_id: String,
    /// Correction backend tag.
    pub backend: String,
}

/// Headline numbers for one consultation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// False positives plus false negatives.
    pub total_errors: usize,
    pub false_positive_count: usize,
    pub false_negative_count: usize,
    pub accuracy: f64,
    pub character_error_rate: f64,
    pub improvement_over_original: f64,
}

/// Rendered diffs for human review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffRenderings {
    /// Unified diff, original vs ground truth.
    pub original_vs_ground_truth: String,
    /// Unified diff, corrected vs ground truth.
    pub corrected_vs_ground_truth: String,
    /// Unified diff, original vs corrected.
    pub original_vs_corrected: String,
    /// Inline word diff, corrected vs ground truth.
    pub inline: String,
}

/// Full analysis report for one consultation. Produced once per
/// `analyze()` call; the caller owns persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub consultation_id: String,
    pub backend: String,
    pub false_positives: Vec<TermAnalysis>,
    pub false_negatives: Vec<TermAnalysis>,
    pub accuracy_metrics: AccuracyMetrics,
    pub summary: AnalysisSummary,
    pub diffs: DiffRenderings,
}

/// Outcome of one consultation in a batch run. Panics inside a single
/// consultation surface as `analysis_failed` so the rest of the batch
/// still completes.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    Completed { report: Box<AnalysisReport> },
    AnalysisFailed { consultation_id: String, detail: String },
}
