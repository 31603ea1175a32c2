//! Statistical confidence module
//!
//! Converts raw counts and score lists into confidence bands using a
//! normal approximation with continuity correction (Wilson-style). Two
//! different significance thresholds are in use: aggregate error-rate
//! bands test their lower bound against 0.01, per-consultation accuracy
//! bands against 0.5.

mod confidence;
mod types;

pub use confidence::{confidence_statistics, wilson_band, ERROR_RATE_SIGNIFICANCE_BOUND, Z_95};
pub use types::{ConfidenceBand, ConfidenceStatistics, Significance};
