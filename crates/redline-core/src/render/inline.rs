//! Inline word-level diff rendering.

use crate::alignment::{opcodes, OpTag};

/// Render a word-level diff between the corrected text and the ground
/// truth. Words the correction has that the ground truth lacks render as
/// `[- word -]`, missing ground-truth words as `{+ word +}`, equal runs
/// unmarked; everything is joined with single spaces.
pub fn inline_diff(corrected: &str, ground_truth: &str) -> String {
    let corr_words: Vec<String> = corrected.split_whitespace().map(str::to_string).collect();
    let gt_words: Vec<String> = ground_truth.split_whitespace().map(str::to_string).collect();

    let mut parts: Vec<String> = Vec::new();
    for op in opcodes(&corr_words, &gt_words) {
        match op.tag {
            OpTag::Equal => parts.extend(corr_words[op.i1..op.i2].iter().cloned()),
            OpTag::Delete => {
                parts.push(format!("[- {} -]", corr_words[op.i1..op.i2].join(" ")));
            }
            OpTag::Insert => {
                parts.push(format!("{{+ {} +}}", gt_words[op.j1..op.j2].join(" ")));
            }
            OpTag::Replace => {
                parts.push(format!("[- {} -]", corr_words[op.i1..op.i2].join(" ")));
                parts.push(format!("{{+ {} +}}", gt_words[op.j1..op.j2].join(" ")));
            }
        }
    }
    parts.join(" ")
}
