//! Three-way token alignment with fuzzy window repair.
//!
//! The exact diff runs between one transcript and the ground truth; the
//! third transcript has no opcode ranges of its own, so its span is located
//! by sliding a fuzzy-scored window over it. Opcodes whose best window
//! scores at or below the threshold have no usable correspondence and are
//! omitted rather than reported as errors.

use crate::similarity::ratio;

use super::opcodes::{opcodes, OpTag};
use super::types::{AlignedSegment, SegmentType};

/// Best-window fuzzy score at or below this is treated as "no
/// correspondence" and the segment is omitted.
pub const WINDOW_MATCH_THRESHOLD: f64 = 70.0;

/// Alignment keyed on the original transcript: exact diff original vs
/// ground truth, corrected spans located by fuzzy window. Feeds
/// false-negative detection.
pub fn align_original(
    orig: &[String],
    corr: &[String],
    gt: &[String],
) -> Vec<AlignedSegment> {
    align_keyed(orig, corr, gt)
        .into_iter()
        .map(|k| AlignedSegment {
            segment_type: k.segment_type,
            orig_start: k.primary_start,
            orig_end: k.primary_end,
            corr_start: k.located_start,
            corr_end: k.located_end,
            gt_start: k.gt_start,
            gt_end: k.gt_end,
            original_text: k.primary_text,
            corrected_text: k.located_text,
            ground_truth_text: k.gt_text,
            alignment_score: k.alignment_score,
        })
        .collect()
}

/// Alignment keyed on the corrected transcript: exact diff corrected vs
/// ground truth, original spans located by fuzzy window. Feeds
/// false-positive detection.
pub fn align_corrected(
    orig: &[String],
    corr: &[String],
    gt: &[String],
) -> Vec<AlignedSegment> {
    align_keyed(corr, orig, gt)
        .into_iter()
        .map(|k| AlignedSegment {
            segment_type: k.segment_type,
            orig_start: k.located_start,
            orig_end: k.located_end,
            corr_start: k.primary_start,
            corr_end: k.primary_end,
            gt_start: k.gt_start,
            gt_end: k.gt_end,
            original_text: k.located_text,
            corrected_text: k.primary_text,
            ground_truth_text: k.gt_text,
            alignment_score: k.alignment_score,
        })
        .collect()
}

struct KeyedSegment {
    segment_type: SegmentType,
    primary_start: usize,
    primary_end: usize,
    located_start: usize,
    located_end: usize,
    gt_start: usize,
    gt_end: usize,
    primary_text: String,
    located_text: String,
    gt_text: String,
    alignment_score: f64,
}

fn align_keyed(primary: &[String], located: &[String], gt: &[String]) -> Vec<KeyedSegment> {
    let mut segments = Vec::new();

    for op in opcodes(primary, gt) {
        let Some((l1, l2)) = locate_span(located, gt, op.j1, op.j2) else {
            continue;
        };

        let primary_text = primary[op.i1..op.i2].join(" ");
        let located_text = located[l1..l2].join(" ");
        let gt_text = gt[op.j1..op.j2].join(" ");

        let segment_type = match op.tag {
            OpTag::Equal => SegmentType::Equal,
            OpTag::Replace => SegmentType::Replace,
            OpTag::Insert => SegmentType::Insert,
            OpTag::Delete => SegmentType::Delete,
        };

        let alignment_score = if primary_text.is_empty()
            && located_text.is_empty()
            && gt_text.is_empty()
        {
            1.0
        } else {
            segment_score(
                &primary_text,
                &located_text,
                &gt_text,
                op.i2 - op.i1,
                op.j2 - op.j1,
            )
        };

        segments.push(KeyedSegment {
            segment_type,
            primary_start: op.i1,
            primary_end: op.i2,
            located_start: l1,
            located_end: l2,
            gt_start: op.j1,
            gt_end: op.j2,
            primary_text,
            located_text,
            gt_text,
            alignment_score,
        });
    }

    segments
}

/// Locate the best-matching span in `haystack` for the ground-truth range
/// `[j1, j2)` by sliding windows of lengths up to `(j2 - j1) + 1` at every
/// offset. Returns `None` when no window clears the threshold.
fn locate_span(
    haystack: &[String],
    gt: &[String],
    j1: usize,
    j2: usize,
) -> Option<(usize, usize)> {
    if j1 >= gt.len() {
        return None;
    }

    let target = gt[j1..j2].join(" ");
    let max_len = (j2 - j1) + 1;

    let mut best_score = f64::NEG_INFINITY;
    let mut best_span = None;

    for start in 0..haystack.len() {
        for len in 1..=max_len {
            let end = start + len;
            if end > haystack.len() {
                break;
            }
            let candidate = haystack[start..end].join(" ");
            let score = ratio(&candidate, &target);
            if score > best_score {
                best_score = score;
                best_span = Some((start, end));
            }
        }
    }

    if best_score <= WINDOW_MATCH_THRESHOLD {
        return None;
    }
    best_span
}

/// Unweighted average of the two span similarities and a token-length
/// similarity term between the diffed span and the ground truth.
fn segment_score(
    primary_text: &str,
    located_text: &str,
    gt_text: &str,
    primary_len: usize,
    gt_len: usize,
) -> f64 {
    let primary_sim = ratio(primary_text, gt_text) / 100.0;
    let located_sim = ratio(located_text, gt_text) / 100.0;
    let len_max = primary_len.max(gt_len).max(1);
    let len_sim = 1.0 - (primary_len.abs_diff(gt_len) as f64 / len_max as f64);

    (primary_sim + located_sim + len_sim) / 3.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_identical_inputs_single_equal_segment() {
        let t = toks("the patient received botox");
        let segments = align_original(&t, &t, &t);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].segment_type, SegmentType::Equal);
        assert_eq!((segments[0].orig_start, segments[0].orig_end), (0, 4));
        assert_eq!((segments[0].corr_start, segments[0].corr_end), (0, 4));
        assert!(segments[0].alignment_score > 0.99);
    }

    #[test]
    fn test_replace_segment_locates_corrected_window() {
        let orig = toks("the dose was 5ml");
        let corr = toks("the dose was 5ml");
        let gt = toks("the dose was 50ml");

        let segments = align_original(&orig, &corr, &gt);
        let replace: Vec<_> = segments
            .iter()
            .filter(|s| s.segment_type == SegmentType::Replace)
            .collect();
        assert_eq!(replace.len(), 1);
        assert_eq!(replace[0].original_text, "5ml");
        assert_eq!(replace[0].corrected_text, "5ml");
        assert_eq!(replace[0].ground_truth_text, "50ml");
        assert!(replace[0].alignment_score > 0.0 && replace[0].alignment_score <= 1.0);
    }

    #[test]
    fn test_corrected_keyed_alignment_swaps_roles() {
        let orig = toks("juvederm injection");
        let corr = toks("juvadderm infection");
        let gt = toks("juvederm injection");

        let segments = align_corrected(&orig, &corr, &gt);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].segment_type, SegmentType::Replace);
        assert_eq!(segments[0].corrected_text, "juvadderm infection");
        assert_eq!(segments[0].original_text, "juvederm injection");
    }

    #[test]
    fn test_unmatchable_span_is_omitted() {
        let orig = toks("alpha beta");
        let corr = toks("completely unrelated words");
        let gt = toks("gamma delta");

        // Nothing in corr resembles the ground-truth span, so the replace
        // segment is dropped rather than fabricated.
        let segments = align_original(&orig, &corr, &gt);
        assert!(segments.is_empty());
    }

    #[test]
    fn test_empty_sequences_do_not_panic() {
        let empty: Vec<String> = Vec::new();
        let gt = toks("some words");
        assert!(align_original(&empty, &empty, &gt).is_empty());
        assert!(align_original(&gt, &gt, &empty).is_empty());
    }
}
