//! Fuzzy string similarity primitives shared across the engine.
//!
//! All ratios are on the 0-100 scale used by the aligner and detector
//! thresholds; character distances are plain Levenshtein.

/// Fuzzy similarity ratio between two strings on a 0-100 scale.
///
/// Derived from normalized Levenshtein distance. Two empty strings are a
/// perfect match; an empty string against a non-empty one scores 0.
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    strsim::normalized_levenshtein(a, b) * 100.0
}

/// Character-level Levenshtein edit distance.
pub fn levenshtein_chars(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_identical() {
        assert_eq!(ratio("botox", "botox"), 100.0);
    }

    #[test]
    fn test_ratio_empty() {
        assert_eq!(ratio("", ""), 100.0);
        assert_eq!(ratio("botox", ""), 0.0);
        assert_eq!(ratio("", "botox"), 0.0);
    }

    #[test]
    fn test_ratio_close_misspelling() {
        let r = ratio("juvadderm", "juvederm");
        assert!(r > 70.0 && r < 90.0, "got {r}");
    }

    #[test]
    fn test_levenshtein_chars() {
        assert_eq!(levenshtein_chars("5ml", "50ml"), 1);
        assert_eq!(levenshtein_chars("received", "received"), 0);
    }
}
