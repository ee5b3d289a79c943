use serde::{Deserialize, Serialize};

/// Label used for the reference side when none is configured.
pub const DEFAULT_REFERENCE_LABEL: &str = "reference";
/// Label used for the target side when none is configured.
pub const DEFAULT_TARGET_LABEL: &str = "target";

/// Configuration for divergence reports.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// Number of trailing path segments dropped to find the subtree shown.
    /// The default of 2 shows the mismatching field together with its parent.
    pub depth_budget: usize,
    /// Display name of the reference implementation.
    pub reference_label: String,
    /// Display name of the target implementation.
    pub target_label: String,
    /// Append a line diff of the two rendered subtrees.
    pub line_diff: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            depth_budget: 2,
            reference_label: DEFAULT_REFERENCE_LABEL.into(),
            target_label: DEFAULT_TARGET_LABEL.into(),
            line_diff: true,
        }
    }
}

impl ReportOptions {
    /// Set both side labels.
    pub fn with_labels(
        mut self,
        reference_label: impl Into<String>,
        target_label: impl Into<String>,
    ) -> Self {
        self.reference_label = reference_label.into();
        self.target_label = target_label.into();
        self
    }

    pub fn with_depth_budget(mut self, depth_budget: usize) -> Self {
        self.depth_budget = depth_budget;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let options = ReportOptions::default();
        assert_eq!(options.depth_budget, 2);
        assert_eq!(options.reference_label, "reference");
        assert_eq!(options.target_label, "target");
        assert!(options.line_diff);
    }

    #[test]
    fn builders() {
        let options = ReportOptions::default()
            .with_labels("acorn", "acorn-loose")
            .with_depth_budget(1);
        assert_eq!(options.reference_label, "acorn");
        assert_eq!(options.target_label, "acorn-loose");
        assert_eq!(options.depth_budget, 1);
    }
}
