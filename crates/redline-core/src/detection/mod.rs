//! False-positive / false-negative detection module
//!
//! Walks aligned segments from the two ground-truth alignments and
//! classifies each divergence: a false positive is a correction that moved
//! text away from the ground truth, a false negative is an ASR error the
//! correction pass failed to fix. Badly misaligned segments are reported
//! as one sequence-level mismatch instead of word-by-word noise.

mod detector;
mod types;

pub use detector::DivergenceDetector;
pub use types::{AlignmentType, ErrorType, TermAnalysis};
