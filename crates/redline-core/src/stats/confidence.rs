//! Wilson-style confidence bands and aggregate score statistics.

use super::types::{ConfidenceBand, ConfidenceStatistics, Significance};

/// Two-sided 95% z value.
pub const Z_95: f64 = 1.96;

/// An aggregate error rate is significant when its Wilson lower bound
/// exceeds this. Deliberately different from the 0.5 bound the accuracy
/// metric uses.
pub const ERROR_RATE_SIGNIFICANCE_BOUND: f64 = 0.01;

/// Wilson-score band with continuity correction for a proportion `p`
/// observed over `n` samples. Degenerate `n = 0` yields an all-zero band.
pub fn wilson_band(p: f64, n: usize) -> ConfidenceBand {
    if n == 0 {
        return ConfidenceBand { lower: 0.0, upper: 0.0, margin: 0.0 };
    }

    let nf = n as f64;
    let z2 = Z_95 * Z_95;
    let denom = 1.0 + z2 / nf;
    let center = (p + z2 / (2.0 * nf)) / denom;
    let margin = Z_95 * (p * (1.0 - p) / nf + z2 / (4.0 * nf * nf)).sqrt() / denom;

    ConfidenceBand {
        lower: (center - margin).clamp(0.0, 1.0),
        upper: (center + margin).clamp(0.0, 1.0),
        margin,
    }
}

/// Aggregate statistics over per-term confidence scores.
///
/// The mean gets a `z * stddev / sqrt(n)` margin only when two or more
/// scores exist (sample standard deviation); a single score is its own
/// 95th percentile. The error rate runs through the Wilson band and its
/// lower bound decides significance.
pub fn confidence_statistics(
    error_count: usize,
    total_samples: usize,
    confidence_scores: &[f64],
) -> ConfidenceStatistics {
    let n = confidence_scores.len();
    let mean = if n == 0 {
        0.0
    } else {
        confidence_scores.iter().sum::<f64>() / n as f64
    };

    let percentile_95 = match n {
        0 => 0.0,
        1 => confidence_scores[0],
        _ => {
            let mut sorted = confidence_scores.to_vec();
            sorted.sort_by(|a, b| a.total_cmp(b));
            let idx = ((0.95 * n as f64) as usize).min(n - 1);
            sorted[idx]
        }
    };

    let margin_of_error = if n >= 2 {
        let variance = confidence_scores
            .iter()
            .map(|s| (s - mean).powi(2))
            .sum::<f64>()
            / (n - 1) as f64;
        Z_95 * variance.sqrt() / (n as f64).sqrt()
    } else {
        0.0
    };

    let lower_bound = (mean - margin_of_error).clamp(0.0, 1.0);
    let upper_bound = (mean + margin_of_error).clamp(0.0, 1.0);

    let error_rate = if total_samples == 0 {
        0.0
    } else {
        error_count as f64 / total_samples as f64
    };
    let error_band = wilson_band(error_rate, total_samples);

    let significance = if error_band.lower > ERROR_RATE_SIGNIFICANCE_BOUND {
        Significance::StatisticallySignificant
    } else {
        Significance::NotSignificant
    };

    ConfidenceStatistics {
        mean_confidence: mean,
        percentile_95,
        lower_bound,
        upper_bound,
        error_rate,
        error_rate_ci_lower: error_band.lower,
        error_rate_ci_upper: error_band.upper,
        sample_size: total_samples,
        margin_of_error,
        significance,
    }
}
