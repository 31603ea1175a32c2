//! Statistical confidence types

use serde::{Deserialize, Serialize};

/// A two-sided confidence band around a proportion estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBand {
    /// Lower bound, clamped to [0, 1].
    pub lower: f64,
    /// Upper bound, clamped to [0, 1].
    pub upper: f64,
    /// Half-width of the band before clamping.
    pub margin: f64,
}

/// Whether a band clears its significance threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Significance {
    StatisticallySignificant,
    NotSignificant,
    NotApplicable,
}

/// Aggregate confidence statistics over a set of per-term scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceStatistics {
    /// Arithmetic mean of the confidence scores.
    pub mean_confidence: f64,
    /// The 95th-percentile element of the scores.
    pub percentile_95: f64,
    /// Lower bound of the mean-confidence band.
    pub lower_bound: f64,
    /// Upper bound of the mean-confidence band.
    pub upper_bound: f64,
    /// Errors over total samples.
    pub error_rate: f64,
    /// Wilson lower bound for the error rate.
    pub error_rate_ci_lower: f64,
    /// Wilson upper bound for the error rate.
    pub error_rate_ci_upper: f64,
    /// Number of samples behind the error rate.
    pub sample_size: usize,
    /// Margin of error around the mean confidence.
    pub margin_of_error: f64,
    /// Significance of the error-rate band (lower bound > 0.01).
    pub significance: Significance,
}
