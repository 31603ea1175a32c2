//! Analysis orchestration module
//!
//! Composes normalization, tokenization, alignment, detection, metrics,
//! statistics, and rendering into the public entry point:
//! `TranscriptAnalyzer::analyze(request) -> AnalysisReport`. A batch entry
//! point runs consultations in parallel and recovers per-consultation
//! panics into structured `analysis_failed` outcomes.

mod analyzer;
mod types;

pub use analyzer::TranscriptAnalyzer;
pub use types::{
    AnalysisError, AnalysisReport, AnalysisRequest, AnalysisSummary, AnalyzerOptions,
    BatchOutcome, DiffRenderings,
};
