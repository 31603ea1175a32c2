//! False-positive / false-negative detection over aligned segments.
//!
//! False-positive detection walks segments of the corrected-keyed
//! alignment (where correction divergences surface as non-equal segments);
//! false-negative detection walks the original-keyed alignment. Both share
//! the sequence-level-mismatch gate: when a segment is too misaligned for
//! positional comparison, at most one whole-phrase finding is emitted and
//! per-word detail is suppressed.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::alignment::{AlignedSegment, SegmentType};
use crate::patterns::classify;
use crate::similarity::ratio;
use crate::stats::{confidence_statistics, ConfidenceStatistics};
use crate::text::normalize;

use super::types::{AlignmentType, ErrorType, TermAnalysis};

/// Segment-level candidate gate: the near side must score above this.
const SEGMENT_CANDIDATE_THRESHOLD: f64 = 70.0;
/// Word-level miss threshold for false negatives.
const WORD_MISS_THRESHOLD: f64 = 70.0;
/// A corrected word must fall this far below the original's score to count
/// as a degradation.
const FP_DEGRADATION_DELTA: f64 = 10.0;
/// A corrected word within this margin of the original's score counts as
/// "not fixed".
const FN_TOLERANCE_DELTA: f64 = 5.0;
/// Token pairs scoring above this are equivalent.
const EQUIVALENCE_RATIO: f64 = 95.0;
/// Cross-pair score above this marks a phonetic confusion.
const PHONETIC_RATIO: f64 = 60.0;
/// Sequence-level gate: minimum length ratio between spans.
const SEQ_LENGTH_RATIO: f64 = 0.7;
/// Sequence-level gate: minimum whole-phrase fuzzy score.
const SEQ_PHRASE_RATIO: f64 = 40.0;
/// Sequence-level gate: minimum fraction of equivalent positions.
const SEQ_EQUIVALENCE_FRACTION: f64 = 0.3;
/// Tokens of context captured either side of a flagged term.
const CONTEXT_WINDOW: usize = 5;

/// Punctuation characters that classify a term's alignment type.
const TERM_PUNCTUATION: &str = r#".,!?;:/-()[]{}""#;

static DIGIT_UNIT_FORM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+ ?[a-zμ]+$").expect("invalid digit-unit pattern"));

/// Classifies divergences between aligned transcript segments.
pub struct DivergenceDetector {
    confidence_threshold: f64,
}

impl DivergenceDetector {
    pub fn new(confidence_threshold: f64) -> Self {
        Self { confidence_threshold }
    }

    /// Detect corrections that moved text away from the ground truth.
    ///
    /// `segment` must come from the corrected-keyed alignment; `orig`,
    /// `corr`, and `gt` are the full token sequences its spans index into.
    pub fn detect_false_positives(
        &self,
        segment: &AlignedSegment,
        orig: &[String],
        corr: &[String],
        gt: &[String],
        consultation_id: &str,
        backend: &str,
    ) -> Vec<TermAnalysis> {
        if segment.segment_type == SegmentType::Equal {
            return Vec::new();
        }

        let r_orig = ratio(&segment.original_text, &segment.ground_truth_text);
        let r_corr = ratio(&segment.corrected_text, &segment.ground_truth_text);

        let orig_span = &orig[segment.orig_start..segment.orig_end];
        let corr_span = &corr[segment.corr_start..segment.corr_end];
        let gt_span = &gt[segment.gt_start..segment.gt_end];

        if sequence_level_mismatch(orig_span, gt_span) {
            // Whole-phrase finding only when the correction is strictly
            // worse than the original.
            if r_orig > r_corr {
                debug!(
                    consultation_id,
                    r_orig, r_corr, "sequence-level false positive"
                );
                return vec![self.sequence_level_term(
                    segment,
                    ErrorType::FalsePositive,
                    r_corr,
                    corr_span,
                    gt_span,
                    orig,
                    corr,
                    gt,
                    consultation_id,
                    backend,
                )];
            }
            return Vec::new();
        }

        if !(r_orig > r_corr && r_orig > SEGMENT_CANDIDATE_THRESHOLD) {
            return Vec::new();
        }

        let word_threshold = self.confidence_threshold * 100.0;
        let n = orig_span.len().min(gt_span.len());
        let mut scores = Vec::with_capacity(n);
        let mut flagged: Vec<(usize, String, f64)> = Vec::new();

        for k in 0..n {
            let orig_word = &orig_span[k];
            let gt_word = &gt_span[k];
            let corr_word = corr_span.get(k);

            let r_c = corr_word.map(|c| ratio(c, gt_word)).unwrap_or(0.0);
            scores.push(r_c / 100.0);

            // Already-equivalent corrected tokens are not divergences.
            if corr_word.is_some_and(|c| tokens_equivalent(c, gt_word)) {
                continue;
            }

            let r_o = ratio(orig_word, gt_word);
            if r_o > word_threshold && r_c < r_o - FP_DEGRADATION_DELTA {
                let term = corr_word.cloned().unwrap_or_else(|| orig_word.clone());
                flagged.push((k, term, r_c));
            }
        }

        if flagged.is_empty() {
            return Vec::new();
        }

        let stats = confidence_statistics(flagged.len(), n, &scores);
        flagged
            .into_iter()
            .map(|(k, term, fuzzy_score)| {
                self.word_term(
                    segment,
                    ErrorType::FalsePositive,
                    k,
                    term,
                    fuzzy_score,
                    corr_span,
                    gt_span,
                    orig,
                    corr,
                    gt,
                    consultation_id,
                    backend,
                    stats.clone(),
                )
            })
            .collect()
    }

    /// Detect ASR errors the correction pass failed to fix.
    ///
    /// `segment` must come from the original-keyed alignment.
    pub fn detect_false_negatives(
        &self,
        segment: &AlignedSegment,
        orig: &[String],
        corr: &[String],
        gt: &[String],
        consultation_id: &str,
        backend: &str,
    ) -> Vec<TermAnalysis> {
        if segment.segment_type == SegmentType::Equal {
            return Vec::new();
        }

        let r_orig = ratio(&segment.original_text, &segment.ground_truth_text);
        let r_corr = ratio(&segment.corrected_text, &segment.ground_truth_text);

        let orig_span = &orig[segment.orig_start..segment.orig_end];
        let corr_span = &corr[segment.corr_start..segment.corr_end];
        let gt_span = &gt[segment.gt_start..segment.gt_end];

        if sequence_level_mismatch(orig_span, gt_span) {
            // Whole-phrase finding only when the correction left the
            // original's error in place (or made it worse).
            if r_corr <= r_orig && r_corr < 100.0 {
                debug!(
                    consultation_id,
                    r_orig, r_corr, "sequence-level false negative"
                );
                return vec![self.sequence_level_term(
                    segment,
                    ErrorType::FalseNegative,
                    r_orig,
                    orig_span,
                    gt_span,
                    orig,
                    corr,
                    gt,
                    consultation_id,
                    backend,
                )];
            }
            return Vec::new();
        }

        if !(r_orig < SEGMENT_CANDIDATE_THRESHOLD && r_corr <= r_orig) {
            return Vec::new();
        }

        let n = orig_span.len().min(gt_span.len());
        let mut scores = Vec::with_capacity(n);
        let mut flagged: Vec<(usize, String, f64)> = Vec::new();

        for k in 0..n {
            let orig_word = &orig_span[k];
            let gt_word = &gt_span[k];
            let corr_word = corr_span.get(k);

            let r_o = ratio(orig_word, gt_word);
            scores.push(r_o / 100.0);

            // The original was right, or the fix happened: not a miss.
            if tokens_equivalent(orig_word, gt_word) {
                continue;
            }
            if corr_word.is_some_and(|c| tokens_equivalent(c, gt_word)) {
                continue;
            }

            let unfixed = match corr_word {
                None => true,
                Some(c) => ratio(c, gt_word) <= r_o + FN_TOLERANCE_DELTA,
            };
            if r_o < WORD_MISS_THRESHOLD && unfixed {
                flagged.push((k, orig_word.clone(), r_o));
            }
        }

        if flagged.is_empty() {
            return Vec::new();
        }

        let stats = confidence_statistics(flagged.len(), n, &scores);
        flagged
            .into_iter()
            .map(|(k, term, fuzzy_score)| {
                self.word_term(
                    segment,
                    ErrorType::FalseNegative,
                    k,
                    term,
                    fuzzy_score,
                    orig_span,
                    gt_span,
                    orig,
                    corr,
                    gt,
                    consultation_id,
                    backend,
                    stats.clone(),
                )
            })
            .collect()
    }

    fn confidence(&self, segment: &AlignedSegment) -> f64 {
        segment.alignment_score.min(self.confidence_threshold + 0.1)
    }

    #[allow(clippy::too_many_arguments)]
    fn word_term(
        &self,
        segment: &AlignedSegment,
        error_type: ErrorType,
        k: usize,
        term: String,
        fuzzy_score: f64,
        compared: &[String],
        gt_span: &[String],
        orig: &[String],
        corr: &[String],
        gt: &[String],
        consultation_id: &str,
        backend: &str,
        stats: ConfidenceStatistics,
    ) -> TermAnalysis {
        let alignment_type = alignment_type(&term, compared, gt_span);
        TermAnalysis {
            alignment_type,
            error_pattern: classify(&term),
            suggested_correction: gt_span[k].clone(),
            original_context: context(orig, segment.orig_start + k),
            corrected_context: context(corr, segment.corr_start + k),
            ground_truth_context: context(gt, segment.gt_start + k),
            confidence: self.confidence(segment),
            position: segment.gt_start + k,
            consultation_id: consultation_id.to_string(),
            backend: backend.to_string(),
            fuzzy_score,
            error_type,
            term,
            confidence_statistics: stats,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn sequence_level_term(
        &self,
        segment: &AlignedSegment,
        error_type: ErrorType,
        fuzzy_score: f64,
        compared: &[String],
        gt_span: &[String],
        orig: &[String],
        corr: &[String],
        gt: &[String],
        consultation_id: &str,
        backend: &str,
    ) -> TermAnalysis {
        let phrase = match error_type {
            ErrorType::FalsePositive => &segment.corrected_text,
            ErrorType::FalseNegative => &segment.original_text,
        };
        let term = if phrase.is_empty() {
            segment.ground_truth_text.clone()
        } else {
            phrase.clone()
        };

        TermAnalysis {
            alignment_type: alignment_type(&term, compared, gt_span).sequence_level(),
            error_pattern: classify(&term),
            suggested_correction: segment.ground_truth_text.clone(),
            original_context: context(orig, segment.orig_start),
            corrected_context: context(corr, segment.corr_start),
            ground_truth_context: context(gt, segment.gt_start),
            confidence: self.confidence(segment),
            position: segment.gt_start,
            consultation_id: consultation_id.to_string(),
            backend: backend.to_string(),
            fuzzy_score,
            error_type,
            term,
            confidence_statistics: confidence_statistics(1, 1, &[fuzzy_score / 100.0]),
        }
    }
}

/// Whether a segment is too misaligned for positional comparison and must
/// be treated as one indivisible mismatch.
fn sequence_level_mismatch(orig_span: &[String], gt_span: &[String]) -> bool {
    let lo = orig_span.len();
    let lg = gt_span.len();
    let max = lo.max(lg);
    if max == 0 {
        return false;
    }
    if (lo.min(lg) as f64 / max as f64) < SEQ_LENGTH_RATIO {
        return true;
    }

    let orig_phrase = normalize(&orig_span.join(" "));
    let gt_phrase = normalize(&gt_span.join(" "));
    if ratio(&orig_phrase, &gt_phrase) < SEQ_PHRASE_RATIO {
        return true;
    }

    let pairs = lo.min(lg);
    let equivalent = orig_span
        .iter()
        .zip(gt_span.iter())
        .filter(|(o, g)| tokens_equivalent(o, g))
        .count();
    (equivalent as f64 / pairs as f64) < SEQ_EQUIVALENCE_FRACTION
}

/// Position-wise token equivalence: exact after normalization, nearly
/// identical by fuzzy score, or matching digit+unit forms once internal
/// spaces are stripped.
fn tokens_equivalent(a: &str, b: &str) -> bool {
    let na = normalize(a);
    let nb = normalize(b);
    if na == nb {
        return true;
    }
    if ratio(a, b) > EQUIVALENCE_RATIO {
        return true;
    }
    DIGIT_UNIT_FORM.is_match(&na)
        && DIGIT_UNIT_FORM.is_match(&nb)
        && na.replace(' ', "") == nb.replace(' ', "")
}

/// Derive how a mismatch aligns, checked in priority order: frameshift,
/// punctuation, word boundary, phonetic, general.
fn alignment_type(term: &str, compared: &[String], gt_span: &[String]) -> AlignmentType {
    if compared.len() != gt_span.len() {
        return AlignmentType::Frameshift;
    }
    if term.chars().any(|c| TERM_PUNCTUATION.contains(c)) {
        return AlignmentType::Punctuation;
    }
    if compared
        .iter()
        .chain(gt_span.iter())
        .any(|w| w.contains(' '))
    {
        return AlignmentType::WordBoundary;
    }
    for a in compared {
        for b in gt_span {
            if ratio(a, b) > PHONETIC_RATIO {
                return AlignmentType::Phonetic;
            }
        }
    }
    AlignmentType::General
}

/// A window of tokens around `idx`, joined with spaces.
fn context(tokens: &[String], idx: usize) -> String {
    if tokens.is_empty() {
        return String::new();
    }
    let idx = idx.min(tokens.len() - 1);
    let start = idx.saturating_sub(CONTEXT_WINDOW);
    let end = (idx + CONTEXT_WINDOW + 1).min(tokens.len());
    tokens[start..end].join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::{align_corrected, align_original};
    use crate::patterns::ErrorPattern;
    use crate::text::{normalize, tokenize};

    fn toks(s: &str) -> Vec<String> {
        tokenize(&normalize(s))
    }

    fn detect_all(
        original: &str,
        corrected: &str,
        ground_truth: &str,
    ) -> (Vec<TermAnalysis>, Vec<TermAnalysis>) {
        let orig = toks(original);
        let corr = toks(corrected);
        let gt = toks(ground_truth);
        let detector = DivergenceDetector::new(0.7);

        let mut false_positives = Vec::new();
        for segment in align_corrected(&orig, &corr, &gt) {
            false_positives.extend(detector.detect_false_positives(
                &segment, &orig, &corr, &gt, "c-1", "test",
            ));
        }
        let mut false_negatives = Vec::new();
        for segment in align_original(&orig, &corr, &gt) {
            false_negatives.extend(detector.detect_false_negatives(
                &segment, &orig, &corr, &gt, "c-1", "test",
            ));
        }
        (false_positives, false_negatives)
    }

    #[test]
    fn test_no_divergence_no_findings() {
        let text = "the patient received botox";
        let (fps, fns) = detect_all(text, text, text);
        assert!(fps.is_empty());
        assert!(fns.is_empty());
    }

    #[test]
    fn test_fixed_asr_error_yields_nothing() {
        let (fps, fns) = detect_all(
            "the patient recieved botox",
            "the patient received botox",
            "the patient received botox",
        );
        assert!(fps.is_empty(), "fix should not be flagged: {fps:?}");
        assert!(fns.is_empty(), "fix should not be flagged: {fns:?}");
    }

    #[test]
    fn test_unfixed_unit_is_false_negative() {
        let (fps, fns) = detect_all(
            "the dose was 5ml",
            "the dose was 5ml",
            "the dose was 50ml",
        );
        assert!(fps.is_empty(), "unchanged correction is not an FP: {fps:?}");
        assert!(!fns.is_empty());
        let finding = &fns[0];
        assert_eq!(finding.error_type, ErrorType::FalseNegative);
        assert!(finding.term.contains("5ml"));
        assert!(matches!(
            finding.error_pattern,
            ErrorPattern::MedicalUnit | ErrorPattern::Dosage
        ));
        assert_eq!(finding.suggested_correction, "50ml");
    }

    #[test]
    fn test_degrading_correction_is_false_positive() {
        let (fps, fns) = detect_all(
            "juvederm injection",
            "juvadderm infection",
            "juvederm injection",
        );
        assert!(!fps.is_empty());
        for finding in &fps {
            assert_eq!(finding.error_type, ErrorType::FalsePositive);
            // Stored score is the degraded corrected-vs-gt ratio.
            assert!(finding.fuzzy_score < 100.0);
        }
        assert!(fns.is_empty(), "original matched ground truth: {fns:?}");
    }

    #[test]
    fn test_equal_segments_are_skipped() {
        let tokens = toks("the same text everywhere");
        let detector = DivergenceDetector::new(0.7);
        for segment in align_original(&tokens, &tokens, &tokens) {
            assert!(detector
                .detect_false_positives(&segment, &tokens, &tokens, &tokens, "c", "b")
                .is_empty());
            assert!(detector
                .detect_false_negatives(&segment, &tokens, &tokens, &tokens, "c", "b")
                .is_empty());
        }
    }

    #[test]
    fn test_tokens_equivalent() {
        assert!(tokens_equivalent("Botox", "botox"));
        assert!(tokens_equivalent("5 ml", "5ml"));
        assert!(!tokens_equivalent("5ml", "50ml"));
        assert!(!tokens_equivalent("juvederm", "infection"));
    }

    #[test]
    fn test_alignment_type_priority() {
        let a = vec!["one".to_string()];
        let b = vec!["one".to_string(), "two".to_string()];
        assert_eq!(alignment_type("one", &a, &b), AlignmentType::Frameshift);

        let same_len = vec!["check.".to_string()];
        let gt = vec!["check".to_string()];
        assert_eq!(
            alignment_type("check.", &same_len, &gt),
            AlignmentType::Punctuation
        );

        let boundary = vec!["nasolabial folds".to_string()];
        let boundary_gt = vec!["nasolabial".to_string()];
        assert_eq!(
            alignment_type("nasolabial folds", &boundary, &boundary_gt),
            AlignmentType::WordBoundary
        );

        let phonetic_a = vec!["recieved".to_string()];
        let phonetic_b = vec!["received".to_string()];
        assert_eq!(
            alignment_type("recieved", &phonetic_a, &phonetic_b),
            AlignmentType::Phonetic
        );

        let far_a = vec!["xylophone".to_string()];
        let far_b = vec!["patient".to_string()];
        assert_eq!(
            alignment_type("xylophone", &far_a, &far_b),
            AlignmentType::General
        );
    }

    #[test]
    fn test_misaligned_segment_collapses_to_one_phrase_false_negative() {
        let orig = toks("patient wants lips done");
        let corr = toks("patient wants lips done");
        let gt = toks("patient wants lip filler augmentation done");

        // One original token stands against three ground-truth tokens, so
        // the span length ratio fails and word positions cannot be compared.
        let segment = AlignedSegment {
            segment_type: SegmentType::Replace,
            orig_start: 2,
            orig_end: 3,
            corr_start: 2,
            corr_end: 3,
            gt_start: 2,
            gt_end: 5,
            original_text: "lips".to_string(),
            corrected_text: "lips".to_string(),
            ground_truth_text: "lip filler augmentation".to_string(),
            alignment_score: 0.4,
        };

        let detector = DivergenceDetector::new(0.7);
        let fns =
            detector.detect_false_negatives(&segment, &orig, &corr, &gt, "c-1", "test");
        assert_eq!(fns.len(), 1, "one whole-phrase finding, no per-word detail");
        let finding = &fns[0];
        assert_eq!(finding.error_type, ErrorType::FalseNegative);
        assert_eq!(finding.term, "lips");
        assert_eq!(finding.suggested_correction, "lip filler augmentation");
        assert_eq!(
            finding.alignment_type,
            AlignmentType::SequenceLevelFrameshift
        );
    }

    #[test]
    fn test_misaligned_segment_collapses_to_one_phrase_false_positive() {
        let orig = toks("she wants lip done");
        let corr = toks("she wants um done");
        let gt = toks("she wants lip filler augmentation done");

        // Same span length mismatch, but here the corrected text scores
        // strictly worse against the ground truth than the original did.
        let segment = AlignedSegment {
            segment_type: SegmentType::Replace,
            orig_start: 2,
            orig_end: 3,
            corr_start: 2,
            corr_end: 3,
            gt_start: 2,
            gt_end: 5,
            original_text: "lip".to_string(),
            corrected_text: "um".to_string(),
            ground_truth_text: "lip filler augmentation".to_string(),
            alignment_score: 0.4,
        };

        let detector = DivergenceDetector::new(0.7);
        let fps =
            detector.detect_false_positives(&segment, &orig, &corr, &gt, "c-1", "test");
        assert_eq!(fps.len(), 1, "one whole-phrase finding, no per-word detail");
        let finding = &fps[0];
        assert_eq!(finding.error_type, ErrorType::FalsePositive);
        assert_eq!(finding.term, "um");
        assert_eq!(finding.suggested_correction, "lip filler augmentation");
        assert_eq!(
            finding.alignment_type,
            AlignmentType::SequenceLevelFrameshift
        );
    }

    #[test]
    fn test_confidence_capped_by_threshold() {
        let (_, fns) = detect_all(
            "the dose was 5ml",
            "the dose was 5ml",
            "the dose was 50ml",
        );
        for finding in &fns {
            assert!(finding.confidence <= 0.7 + 0.1 + 1e-9);
            assert!(finding.confidence >= 0.0);
        }
    }

    #[test]
    fn test_context_windows() {
        let tokens: Vec<String> = (0..20).map(|i| format!("w{i}")).collect();
        let ctx = context(&tokens, 10);
        assert_eq!(ctx, "w5 w6 w7 w8 w9 w10 w11 w12 w13 w14 w15");
        // Clamped at the edges.
        assert!(context(&tokens, 0).starts_with("w0"));
        assert!(context(&tokens, 19).ends_with("w19"));
        assert_eq!(context(&[], 3), "");
    }
}
