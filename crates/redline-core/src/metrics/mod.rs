//! Accuracy and error-rate module
//!
//! Character-level edit-distance accuracy before and after correction,
//! with a Wilson confidence band over the corrected accuracy. Accuracy is
//! clamped at zero; the character error rate is deliberately not clamped
//! and may exceed 1 when the corrected length diverges wildly from the
//! ground truth.

mod accuracy;
mod types;

pub use accuracy::{calculate_accuracy, ACCURACY_SIGNIFICANCE_BOUND};
pub use types::AccuracyMetrics;
