//! Word tokenization over normalized text.

use once_cell::sync::Lazy;
use regex::Regex;

/// Tokens made purely of punctuation survive the normalizer's spacing step
/// and are filtered out here.
static PURE_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\w\s]+$").expect("invalid punctuation filter pattern"));

/// Split normalized text on whitespace, dropping pure-punctuation tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter(|t| !PURE_PUNCTUATION.is_match(t))
        .map(str::to_string)
        .collect()
}
