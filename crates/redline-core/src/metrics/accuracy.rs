//! Character-level accuracy calculation.

use crate::similarity::levenshtein_chars;
use crate::stats::{wilson_band, Significance};

use super::types::AccuracyMetrics;

/// A per-consultation accuracy band is significant when its Wilson lower
/// bound exceeds this. Deliberately different from the 0.01 bound the
/// aggregate error-rate statistics use.
pub const ACCURACY_SIGNIFICANCE_BOUND: f64 = 0.5;

/// Compute character-level accuracy, error rate, and improvement for one
/// consultation. Empty ground truth yields worst-case degenerate metrics
/// instead of dividing by zero, so batch analysis can continue.
pub fn calculate_accuracy(original: &str, corrected: &str, ground_truth: &str) -> AccuracyMetrics {
    if ground_truth.is_empty() {
        return AccuracyMetrics {
            accuracy: 0.0,
            character_error_rate: 1.0,
            improvement_over_original: 0.0,
            sample_size_chars: 0,
            confidence_band: format_band(0.0, 0.0),
            statistical_significance: Significance::NotApplicable,
        };
    }

    let gt_len = ground_truth.chars().count();
    let original_distance = levenshtein_chars(original, ground_truth);
    let corrected_distance = levenshtein_chars(corrected, ground_truth);

    let original_accuracy = (1.0 - original_distance as f64 / gt_len as f64).max(0.0);
    let corrected_accuracy = (1.0 - corrected_distance as f64 / gt_len as f64).max(0.0);
    // CER side is intentionally unclamped.
    let character_error_rate = corrected_distance as f64 / gt_len as f64;

    let band = wilson_band(corrected_accuracy, gt_len);
    let statistical_significance = if band.lower > ACCURACY_SIGNIFICANCE_BOUND {
        Significance::StatisticallySignificant
    } else {
        Significance::NotSignificant
    };

    AccuracyMetrics {
        accuracy: corrected_accuracy,
        character_error_rate,
        improvement_over_original: corrected_accuracy - original_accuracy,
        sample_size_chars: gt_len,
        confidence_band: format_band(band.lower, band.upper),
        statistical_significance,
    }
}

fn format_band(lower: f64, upper: f64) -> String {
    format!("95% CI [{lower:.3}, {upper:.3}]")
}
