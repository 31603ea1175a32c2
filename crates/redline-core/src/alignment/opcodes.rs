//! Edit-script opcode extraction between two token sequences.
//!
//! Produces merged equal/replace/insert/delete opcodes with half-open
//! `(i1, i2, j1, j2)` ranges, the same shape a classic longest-common-
//! subsequence diff emits.

use serde::{Deserialize, Serialize};

/// Opcode tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpTag {
    Equal,
    Replace,
    Insert,
    Delete,
}

/// One merged edit-script operation: `a[i1..i2]` corresponds to `b[j1..j2]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub tag: OpTag,
    pub i1: usize,
    pub i2: usize,
    pub j1: usize,
    pub j2: usize,
}

/// Extract merged opcodes between two token sequences.
///
/// Runs a full edit-distance DP and backtraces it, preferring diagonal
/// moves so equal runs stay contiguous. Two empty sequences produce no
/// opcodes.
pub fn opcodes<S: AsRef<str>>(a: &[S], b: &[S]) -> Vec<Opcode> {
    let m = a.len();
    let n = b.len();

    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=n {
        dp[0][j] = j;
    }
    for i in 1..=m {
        for j in 1..=n {
            let cost = usize::from(a[i - 1].as_ref() != b[j - 1].as_ref());
            dp[i][j] = (dp[i - 1][j] + 1)
                .min(dp[i][j - 1] + 1)
                .min(dp[i - 1][j - 1] + cost);
        }
    }

    // Backtrace into per-position steps, then reverse into forward order.
    let mut steps = Vec::with_capacity(m + n);
    let (mut i, mut j) = (m, n);
    while i > 0 || j > 0 {
        if i > 0 && j > 0 {
            let cost = usize::from(a[i - 1].as_ref() != b[j - 1].as_ref());
            if dp[i][j] == dp[i - 1][j - 1] + cost {
                steps.push(if cost == 0 { OpTag::Equal } else { OpTag::Replace });
                i -= 1;
                j -= 1;
                continue;
            }
        }
        if i > 0 && dp[i][j] == dp[i - 1][j] + 1 {
            steps.push(OpTag::Delete);
            i -= 1;
        } else {
            steps.push(OpTag::Insert);
            j -= 1;
        }
    }
    steps.reverse();

    // Merge consecutive steps of the same tag into ranged opcodes.
    let mut out = Vec::new();
    let (mut ai, mut bj) = (0usize, 0usize);
    let mut k = 0;
    while k < steps.len() {
        let tag = steps[k];
        let (i1, j1) = (ai, bj);
        while k < steps.len() && steps[k] == tag {
            match tag {
                OpTag::Equal | OpTag::Replace => {
                    ai += 1;
                    bj += 1;
                }
                OpTag::Delete => ai += 1,
                OpTag::Insert => bj += 1,
            }
            k += 1;
        }
        out.push(Opcode { tag, i1, i2: ai, j1, j2: bj });
    }
    out
}
