//! Error pattern classification module
//!
//! Tags a mismatched term with the category of error it represents
//! (punctuation, medical unit, brand name, dosage, procedure code,
//! percentage) via an ordered regex table.

mod classifier;

pub use classifier::{classify, ErrorPattern};
