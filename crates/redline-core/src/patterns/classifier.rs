//! Ordered regex classification of error terms.
//!
//! Patterns overlap (a dosage string also matches the medical-unit
//! pattern), so the table is evaluated in fixed order and the first match
//! wins. Classification runs on the raw term, not the normalized form.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Category tag for a detected divergence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPattern {
    Punctuation,
    MedicalUnit,
    BrandName,
    Dosage,
    ProcedureCode,
    Percentage,
    General,
}

struct PatternRule {
    pattern: ErrorPattern,
    regex: Regex,
}

impl PatternRule {
    fn new(pattern: ErrorPattern, expr: &str) -> Self {
        Self {
            pattern,
            regex: Regex::new(expr).expect("invalid error pattern regex"),
        }
    }
}

/// Ordered classification table. Order is significant: dosage is checked
/// after medical_unit, matching the table as listed.
static ERROR_PATTERNS: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![
        PatternRule::new(ErrorPattern::Punctuation, r#"[.,!?;:/\-()\[\]{}"']"#),
        PatternRule::new(
            ErrorPattern::MedicalUnit,
            r"(?i)\b\d+(\.\d+)?\s*(units|mcg|μg|ml|cc|mg|kg|cm|mm|iu|unit|g)\b",
        ),
        PatternRule::new(
            ErrorPattern::BrandName,
            r"(?i)\b(botox|juvederm|restylane|dysport|radiesse|sculptra|kybella|voluma|volbella|xeomin|latisse)\b",
        ),
        PatternRule::new(
            ErrorPattern::Dosage,
            r"(?i)\b\d+(\.\d+)?\s*(units|mcg|ml|cc|mg)\s+(of|per|daily|twice|weekly)\b",
        ),
        PatternRule::new(ErrorPattern::ProcedureCode, r"\b\d{5}\b"),
        PatternRule::new(ErrorPattern::Percentage, r"(?i)\d+(\.\d+)?\s*(%|percent)\b"),
    ]
});

/// Classify a raw term against the ordered pattern table. First match
/// wins; unmatched terms are `general`.
pub fn classify(term: &str) -> ErrorPattern {
    ERROR_PATTERNS
        .iter()
        .find(|rule| rule.regex.is_match(term))
        .map(|rule| rule.pattern)
        .unwrap_or(ErrorPattern::General)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punctuation_first() {
        assert_eq!(classify("check-up,"), ErrorPattern::Punctuation);
        // Punctuation wins even when a unit is present, by table order.
        assert_eq!(classify("5ml."), ErrorPattern::Punctuation);
    }

    #[test]
    fn test_medical_unit() {
        assert_eq!(classify("50ml"), ErrorPattern::MedicalUnit);
        assert_eq!(classify("20 units"), ErrorPattern::MedicalUnit);
        assert_eq!(classify("5mg"), ErrorPattern::MedicalUnit);
    }

    #[test]
    fn test_brand_name() {
        assert_eq!(classify("botox"), ErrorPattern::BrandName);
        assert_eq!(classify("Juvederm"), ErrorPattern::BrandName);
    }

    #[test]
    fn test_medical_unit_beats_dosage_by_order() {
        // Matches both the unit and dosage patterns; the table position of
        // medical_unit decides.
        assert_eq!(classify("5ml of saline"), ErrorPattern::MedicalUnit);
    }

    #[test]
    fn test_procedure_code() {
        assert_eq!(classify("procedure 64612"), ErrorPattern::ProcedureCode);
    }

    #[test]
    fn test_percentage() {
        assert_eq!(classify("20 percent"), ErrorPattern::Percentage);
    }

    #[test]
    fn test_general_fallback() {
        assert_eq!(classify("patient"), ErrorPattern::General);
    }
}
