//! Text canonicalization module
//!
//! Normalizes raw transcript text (spacing, ordinals, medical units,
//! abbreviations, punctuation) and tokenizes it into word tokens. Every
//! downstream comparison runs on this canonical form, so normalization is
//! total and idempotent.

mod normalizer;
mod tokenizer;

pub use normalizer::normalize;
pub use tokenizer::tokenize;
