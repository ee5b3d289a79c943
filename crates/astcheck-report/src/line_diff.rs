//! Line-level diff of two rendered subtrees.
//!
//! Uses the `similar` crate (Myers diff algorithm), grouped into hunks with
//! context lines so the differing fields stand out in long subtrees.

use std::fmt;

use similar::{ChangeTag, TextDiff};

/// Context lines kept around each change.
const CONTEXT_LINES: usize = 3;

/// A single line in a diff.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffLine {
    /// A line present on both sides.
    Context(String),
    /// A line present only on the target side.
    Added(String),
    /// A line present only on the reference side.
    Removed(String),
    /// Separator between non-adjacent hunks.
    Gap,
}

impl fmt::Display for DiffLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffLine::Context(text) => write!(f, "  {text}"),
            DiffLine::Added(text) => write!(f, "+ {text}"),
            DiffLine::Removed(text) => write!(f, "- {text}"),
            DiffLine::Gap => f.write_str("  ..."),
        }
    }
}

/// Diff `reference` against `target` line by line.
///
/// Returns an empty list when the texts are identical.
pub fn line_diff(reference: &str, target: &str) -> Vec<DiffLine> {
    if reference == target {
        return Vec::new();
    }

    let text_diff = TextDiff::from_lines(reference, target);
    let mut lines = Vec::new();

    for (i, hunk) in text_diff.grouped_ops(CONTEXT_LINES).iter().enumerate() {
        if i > 0 {
            lines.push(DiffLine::Gap);
        }
        for op in hunk {
            for change in text_diff.iter_changes(op) {
                let text = change.value().trim_end_matches('\n').to_string();
                match change.tag() {
                    ChangeTag::Equal => lines.push(DiffLine::Context(text)),
                    ChangeTag::Delete => lines.push(DiffLine::Removed(text)),
                    ChangeTag::Insert => lines.push(DiffLine::Added(text)),
                }
            }
        }
    }

    lines
}
