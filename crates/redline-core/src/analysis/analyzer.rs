//! The analyzer orchestrator.

use std::panic::{catch_unwind, AssertUnwindSafe};

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::alignment::{align_corrected, align_original};
use crate::detection::DivergenceDetector;
use crate::metrics::calculate_accuracy;
use crate::render::{inline_diff, unified_diff};
use crate::text::{normalize, tokenize};

use super::types::{
    AnalysisError, AnalysisReport, AnalysisRequest, AnalysisSummary, AnalyzerOptions,
    BatchOutcome, DiffRenderings,
};

/// Pure, synchronous analysis engine. Holds no mutable state; one
/// instance may serve any number of threads.
pub struct TranscriptAnalyzer {
    options: AnalyzerOptions,
    detector: DivergenceDetector,
}

impl TranscriptAnalyzer {
    pub fn new(options: AnalyzerOptions) -> Result<Self, AnalysisError> {
        if !(0.0..=1.0).contains(&options.confidence_threshold) {
            return Err(AnalysisError::InvalidOption(format!(
                "confidence_threshold must be in [0, 1], got {}",
                options.confidence_threshold
            )));
        }
        Ok(Self {
            detector: DivergenceDetector::new(options.confidence_threshold),
            options,
        })
    }

    pub fn with_defaults() -> Self {
        Self::new(AnalyzerOptions::default()).expect("default options are valid")
    }

    /// Analyze one consultation: quantify how much the correction pass
    /// improved (or degraded) the transcript and attribute each wording
    /// change to a false positive or false negative.
    pub fn analyze(&self, request: &AnalysisRequest) -> AnalysisReport {
        if request.ground_truth.is_empty() {
            debug!(
                consultation_id = request.consultation_id.as_str(),
                "empty ground truth, returning degenerate metrics"
            );
        }

        let orig_tokens = tokenize(&normalize(&request.original));
        let corr_tokens = tokenize(&normalize(&request.corrected));
        let gt_tokens = tokenize(&normalize(&request.ground_truth));

        // Two alignments: correction divergences surface as non-equal
        // segments only when the diff is keyed on the corrected text.
        let mut false_positives = Vec::new();
        for segment in align_corrected(&orig_tokens, &corr_tokens, &gt_tokens) {
            false_positives.extend(self.detector.detect_false_positives(
                &segment,
                &orig_tokens,
                &corr_tokens,
                &gt_tokens,
                &request.consultation_id,
                &request.backend,
            ));
        }

        let mut false_negatives = Vec::new();
        for segment in align_original(&orig_tokens, &corr_tokens, &gt_tokens) {
            false_negatives.extend(self.detector.detect_false_negatives(
                &segment,
                &orig_tokens,
                &corr_tokens,
                &gt_tokens,
                &request.consultation_id,
                &request.backend,
            ));
        }

        let accuracy_metrics = calculate_accuracy(
            &request.original,
            &request.corrected,
            &request.ground_truth,
        );

        let context = self.options.diff_context;
        let diffs = DiffRenderings {
            original_vs_ground_truth: unified_diff(
                &request.original,
                &request.ground_truth,
                "original",
                "ground_truth",
                context,
            ),
            corrected_vs_ground_truth: unified_diff(
                &request.corrected,
                &request.ground_truth,
                "corrected",
                "ground_truth",
                context,
            ),
            original_vs_corrected: unified_diff(
                &request.original,
                &request.corrected,
                "original",
                "corrected",
                context,
            ),
            inline: inline_diff(&request.corrected, &request.ground_truth),
        };

        let summary = AnalysisSummary {
            total_errors: false_positives.len() + false_negatives.len(),
            false_positive_count: false_positives.len(),
            false_negative_count: false_negatives.len(),
            accuracy: accuracy_metrics.accuracy,
            character_error_rate: accuracy_metrics.character_error_rate,
            improvement_over_original: accuracy_metrics.improvement_over_original,
        };

        AnalysisReport {
            consultation_id: request.consultation_id.clone(),
            backend: request.backend.clone(),
            false_positives,
            false_negatives,
            accuracy_metrics,
            summary,
            diffs,
        }
    }

    /// Analyze a batch of consultations in parallel. Outcomes keep the
    /// input order. A panic inside one consultation is recovered into an
    /// `analysis_failed` outcome; the rest of the batch completes.
    pub fn analyze_batch(&self, requests: &[AnalysisRequest]) -> Vec<BatchOutcome> {
        requests
            .par_iter()
            .map(|request| {
                match catch_unwind(AssertUnwindSafe(|| self.analyze(request))) {
                    Ok(report) => BatchOutcome::Completed { report: Box::new(report) },
                    Err(panic) => {
                        let detail = panic_detail(panic);
                        warn!(
                            consultation_id = request.consultation_id.as_str(),
                            detail = detail.as_str(),
                            "analysis failed"
                        );
                        BatchOutcome::AnalysisFailed {
                            consultation_id: request.consultation_id.clone(),
                            detail,
                        }
                    }
                }
            })
            .collect()
    }
}

fn panic_detail(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
