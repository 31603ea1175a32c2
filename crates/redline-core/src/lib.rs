//! redline-core: Transcript correction quality analysis engine
//!
//! Given three texts per recorded consultation — a raw ASR transcript, an
//! LLM-corrected version, and a human-authored ground truth — this crate
//! quantifies how much the correction pass improved (or degraded) accuracy
//! and attributes each wording change to a false positive or false
//! negative:
//! - Text: normalization and tokenization of raw transcript text
//! - Similarity: fuzzy string ratios shared across the engine
//! - Alignment: exact diff plus fuzzy window repair across the three texts
//! - Patterns: ordered regex classification of error terms
//! - Detection: false-positive / false-negative term analysis
//! - Metrics: character-level accuracy and error rates
//! - Stats: Wilson-style confidence bands and score statistics
//! - Render: unified and inline diff views for human review
//! - Analysis: the orchestrator composing everything into a report
//!
//! The engine is a pure, synchronous, CPU-bound computation: no I/O, no
//! shared mutable state beyond process-lifetime regex tables, and every
//! `analyze()` call independent of every other.

pub mod alignment;
pub mod analysis;
pub mod detection;
pub mod metrics;
pub mod patterns;
pub mod render;
pub mod similarity;
pub mod stats;
pub mod text;

// Re-exports for convenience
pub use alignment::{align_corrected, align_original, AlignedSegment, SegmentType};
pub use analysis::{
    AnalysisError, AnalysisReport, AnalysisRequest, AnalysisSummary, AnalyzerOptions,
    BatchOutcome, DiffRenderings, TranscriptAnalyzer,
};
pub use detection::{AlignmentType, DivergenceDetector, ErrorType, TermAnalysis};
pub use metrics::{calculate_accuracy, AccuracyMetrics};
pub use patterns::{classify, ErrorPattern};
pub use render::{inline_diff, unified_diff};
pub use stats::{
    confidence_statistics, wilson_band, ConfidenceBand, ConfidenceStatistics, Significance,
};
pub use text::{normalize, tokenize};
