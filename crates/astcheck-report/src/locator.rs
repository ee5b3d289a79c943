//! Subtree localization.
//!
//! The failing leaf alone (often a bare number or string) says little, while
//! the whole tree is far too large to print. The locator walks back up the
//! divergence path by a fixed budget and pulls the ancestor from both trees.

use astcheck_types::{resolve, PathTrace, TreeValue};

/// The ancestor subtrees selected for display.
#[derive(Clone, Debug, PartialEq)]
pub struct LocatedSubtrees<'a> {
    /// Path of the displayed ancestor.
    pub anchor: PathTrace,
    /// Subtree of the reference tree at `anchor`, if it exists.
    pub reference: Option<&'a TreeValue>,
    /// Subtree of the target tree at `anchor`, if it exists.
    pub target: Option<&'a TreeValue>,
    /// Levels to expand when rendering: `path.len() - depth_budget + 1`,
    /// clamped so it never goes below 1.
    pub display_depth: usize,
}

/// Locate the subtrees `depth_budget` levels above `path` in both trees.
pub fn locate<'a>(
    path: &PathTrace,
    reference: &'a TreeValue,
    target: &'a TreeValue,
    depth_budget: usize,
) -> LocatedSubtrees<'a> {
    LocatedSubtrees {
        anchor: path.ancestor(depth_budget),
        reference: resolve(reference, path, depth_budget),
        target: resolve(target, path, depth_budget),
        display_depth: path.len().saturating_sub(depth_budget) + 1,
    }
}
