//! Transcript text normalization.
//!
//! The pipeline order matters: each step assumes the previous ones already
//! ran. Whitelisted medical units end up joined to their number ("5 ml" ->
//! "5ml") while every other digit-letter run ends up split ("3x" -> "3 x").
//! The split regex runs first and the unit join second, which yields the
//! same output as the reference ordering without needing lookahead.

use once_cell::sync::Lazy;
use regex::Regex;

/// Ordinal number-words replaced by their digit+suffix form, whole-word.
/// One direction only; digit forms are never expanded back to words.
static ORDINAL_WORDS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        ("first", "1st"),
        ("second", "2nd"),
        ("third", "3rd"),
        ("fourth", "4th"),
        ("fifth", "5th"),
        ("sixth", "6th"),
        ("seventh", "7th"),
        ("eighth", "8th"),
        ("ninth", "9th"),
        ("tenth", "10th"),
    ]
    .iter()
    .map(|(word, digit)| {
        let re = Regex::new(&format!(r"\b{word}\b")).expect("invalid ordinal pattern");
        (re, *digit)
    })
    .collect()
});

/// Generic digit-letter splitter: "3x" -> "3 x". Runs before the unit join
/// so that only whitelisted units survive in joined form.
static DIGIT_LETTER_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)([a-zμ]+)").expect("invalid split pattern"));

/// Whitelisted medical units joined to their preceding number.
/// Multi-character alternatives come before "g" so the longest unit wins.
static UNIT_JOIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+)\s+(units|mcg|μg|ml|cc|mg|kg|cm|mm|iu|g)\b").expect("invalid unit pattern")
});

/// Standalone medical abbreviations expanded to full words, whole-word.
/// Number-joined forms like "5ml" stay compact.
static ABBREVIATIONS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        ("ml", "milliliters"),
        ("cc", "cubic centimeters"),
        ("mg", "milligrams"),
        ("kg", "kilograms"),
        ("cm", "centimeters"),
        ("mm", "millimeters"),
        ("iu", "international units"),
        ("mcg", "micrograms"),
        ("μg", "micrograms"),
    ]
    .iter()
    .map(|(abbr, full)| {
        let re = Regex::new(&format!(r"\b{abbr}\b")).expect("invalid abbreviation pattern");
        (re, *full)
    })
    .collect()
});

/// Punctuation characters spaced out so they become separable tokens.
static PUNCT_SPACING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([/\-:(),.!?;"'\[\]&])"#).expect("invalid punctuation pattern"));

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("invalid whitespace pattern"));

/// Canonicalize raw transcript text. Total and idempotent:
/// `normalize(normalize(s)) == normalize(s)` for every input.
pub fn normalize(text: &str) -> String {
    let mut s = text.to_lowercase();

    for (re, digit) in ORDINAL_WORDS.iter() {
        s = re.replace_all(&s, *digit).into_owned();
    }

    s = DIGIT_LETTER_SPLIT.replace_all(&s, "$1 $2").into_owned();
    s = UNIT_JOIN.replace_all(&s, "${1}${2}").into_owned();

    for (re, full) in ABBREVIATIONS.iter() {
        s = re.replace_all(&s, *full).into_owned();
    }

    s = PUNCT_SPACING.replace_all(&s, " $1 ").into_owned();

    WHITESPACE.replace_all(&s, " ").trim().to_string()
}
