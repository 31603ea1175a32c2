//! Line-based unified diff rendering.

use crate::alignment::{opcodes, OpTag, Opcode};

/// Render a unified diff between two texts with `context` lines of
/// surrounding equal lines per hunk. Identical inputs render as an empty
/// string.
pub fn unified_diff(a: &str, b: &str, a_label: &str, b_label: &str, context: usize) -> String {
    let a_lines: Vec<String> = a.lines().map(str::to_string).collect();
    let b_lines: Vec<String> = b.lines().map(str::to_string).collect();

    let groups = grouped_opcodes(opcodes(&a_lines, &b_lines), context);
    if groups.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(&format!("--- {a_label}\n"));
    out.push_str(&format!("+++ {b_label}\n"));

    for group in groups {
        let first = group.first().expect("group is never empty");
        let last = group.last().expect("group is never empty");
        out.push_str(&format!(
            "@@ -{} +{} @@\n",
            format_range(first.i1, last.i2),
            format_range(first.j1, last.j2),
        ));
        for op in group {
            match op.tag {
                OpTag::Equal => {
                    for line in &a_lines[op.i1..op.i2] {
                        out.push_str(&format!(" {line}\n"));
                    }
                }
                OpTag::Replace => {
                    for line in &a_lines[op.i1..op.i2] {
                        out.push_str(&format!("-{line}\n"));
                    }
                    for line in &b_lines[op.j1..op.j2] {
                        out.push_str(&format!("+{line}\n"));
                    }
                }
                OpTag::Delete => {
                    for line in &a_lines[op.i1..op.i2] {
                        out.push_str(&format!("-{line}\n"));
                    }
                }
                OpTag::Insert => {
                    for line in &b_lines[op.j1..op.j2] {
                        out.push_str(&format!("+{line}\n"));
                    }
                }
            }
        }
    }
    out
}

/// Unified-diff hunk range: `start,length` with 1-based starts, a bare
/// start when the length is 1, and the 0-based start when empty.
fn format_range(lo: usize, hi: usize) -> String {
    let length = hi - lo;
    match length {
        0 => format!("{lo},0"),
        1 => format!("{}", lo + 1),
        _ => format!("{},{length}", lo + 1),
    }
}

/// Split opcodes into hunk groups, trimming equal runs to `context` lines
/// at the edges and splitting on equal runs longer than `2 * context`.
fn grouped_opcodes(mut ops: Vec<Opcode>, context: usize) -> Vec<Vec<Opcode>> {
    if ops.is_empty() {
        return Vec::new();
    }
    if ops.len() == 1 && ops[0].tag == OpTag::Equal {
        return Vec::new();
    }

    if let Some(first) = ops.first_mut() {
        if first.tag == OpTag::Equal {
            first.i1 = first.i2.saturating_sub(context).max(first.i1);
            first.j1 = first.j2.saturating_sub(context).max(first.j1);
        }
    }
    if let Some(last) = ops.last_mut() {
        if last.tag == OpTag::Equal {
            last.i2 = (last.i1 + context).min(last.i2);
            last.j2 = (last.j1 + context).min(last.j2);
        }
    }

    let mut groups = Vec::new();
    let mut current: Vec<Opcode> = Vec::new();
    for op in ops {
        if op.tag == OpTag::Equal && op.i2 - op.i1 > 2 * context && !current.is_empty() {
            // Close the current hunk with trailing context, open the next
            // with leading context.
            current.push(Opcode {
                tag: OpTag::Equal,
                i1: op.i1,
                i2: op.i1 + context,
                j1: op.j1,
                j2: op.j1 + context,
            });
            groups.push(current);
            current = vec![Opcode {
                tag: OpTag::Equal,
                i1: op.i2 - context,
                i2: op.i2,
                j1: op.j2 - context,
                j2: op.j2,
            }];
            continue;
        }
        current.push(op);
    }
    if current.iter().any(|op| op.tag != OpTag::Equal) {
        groups.push(current);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_inputs_render_empty() {
        assert_eq!(unified_diff("same\ntext", "same\ntext", "a", "b", 3), "");
    }

    #[test]
    fn test_single_line_change() {
        let diff = unified_diff(
            "the dose was 5ml",
            "the dose was 50ml",
            "original",
            "ground_truth",
            3,
        );
        assert!(diff.starts_with("--- original\n+++ ground_truth\n"));
        assert!(diff.contains("-the dose was 5ml\n"));
        assert!(diff.contains("+the dose was 50ml\n"));
        assert!(diff.contains("@@ -1 +1 @@\n"));
    }

    #[test]
    fn test_context_window_trims_equal_runs() {
        let a: Vec<String> = (0..12).map(|i| format!("line {i}")).collect();
        let mut b = a.clone();
        b[6] = "changed".to_string();

        let diff = unified_diff(&a.join("\n"), &b.join("\n"), "a", "b", 2);
        // Two lines of context either side of the change, nothing more.
        assert!(diff.contains(" line 4\n"));
        assert!(!diff.contains(" line 3\n"));
        assert!(diff.contains(" line 8\n"));
        assert!(!diff.contains(" line 9\n"));
        assert!(diff.contains("-line 6\n"));
        assert!(diff.contains("+changed\n"));
    }

    #[test]
    fn test_distant_changes_split_into_hunks() {
        let a: Vec<String> = (0..30).map(|i| format!("line {i}")).collect();
        let mut b = a.clone();
        b[2] = "first change".to_string();
        b[27] = "second change".to_string();

        let diff = unified_diff(&a.join("\n"), &b.join("\n"), "a", "b", 2);
        assert_eq!(diff.matches("@@").count(), 2 * 2);
    }
}
