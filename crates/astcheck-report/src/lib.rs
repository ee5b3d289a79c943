//! Divergence reporting for astcheck.
//!
//! Turns a [`Divergence`](astcheck_compare::Divergence) into a diagnostic that
//! shows the mismatch in context: the reason, the enclosing subtree from each
//! side (a few levels above the failing leaf), and a line diff between them.
//!
//! # Key Types
//!
//! - [`DivergenceReporter`] / [`report`] -- Render a divergence report
//! - [`locate`] / [`LocatedSubtrees`] -- Find the ancestor subtrees to display
//! - [`ReportOptions`] -- Depth budget and side labels
//! - [`line_diff`] / [`DiffLine`] -- Line-level diff of two rendered subtrees

pub mod line_diff;
pub mod locator;
pub mod options;
pub mod reporter;

pub use line_diff::{line_diff, DiffLine};
pub use locator::{locate, LocatedSubtrees};
pub use options::ReportOptions;
pub use reporter::{report, DivergenceReporter};
