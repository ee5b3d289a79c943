//! Diagnostic rendering for divergences.
//!
//! A report has up to four parts:
//!
//! 1. the divergence reason, path and both raw values
//! 2. the reference subtree at the located ancestor
//! 3. the target subtree at the same ancestor
//! 4. a line diff between the two rendered subtrees
//!
//! Rendering is pure; writing the report anywhere is up to the caller.

use astcheck_compare::{CompareError, Divergence};
use astcheck_types::{render, PathTrace, TreeValue};

use crate::line_diff::line_diff;
use crate::locator::locate;
use crate::options::{ReportOptions, DEFAULT_REFERENCE_LABEL, DEFAULT_TARGET_LABEL};

/// Render a report for `divergence` found between `reference` and `target`.
///
/// Labels fall back to `"reference"` and `"target"` when not supplied.
pub fn report(
    divergence: &Divergence,
    reference: &TreeValue,
    target: &TreeValue,
    reference_label: Option<&str>,
    target_label: Option<&str>,
    depth_budget: usize,
) -> String {
    let options = ReportOptions::default()
        .with_labels(
            reference_label.unwrap_or(DEFAULT_REFERENCE_LABEL),
            target_label.unwrap_or(DEFAULT_TARGET_LABEL),
        )
        .with_depth_budget(depth_budget);
    DivergenceReporter::new(options).report(divergence, reference, target)
}

/// Renders divergence reports under a fixed set of [`ReportOptions`].
#[derive(Clone, Debug, Default)]
pub struct DivergenceReporter {
    options: ReportOptions,
}

impl DivergenceReporter {
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    /// Render a full report for a divergence.
    ///
    /// `reference` and `target` are the complete trees that were compared.
    pub fn report(
        &self,
        divergence: &Divergence,
        reference: &TreeValue,
        target: &TreeValue,
    ) -> String {
        let ReportOptions {
            reference_label,
            target_label,
            ..
        } = &self.options;

        let mut out = String::new();
        out.push_str(&divergence.reason());
        out.push('\n');
        out.push_str(&format!("  path: {}\n", location(divergence.path())));
        out.push_str(&format!(
            "  {reference_label}: {}\n",
            raw(divergence.reference())
        ));
        out.push_str(&format!("  {target_label}: {}\n", raw(divergence.target())));

        self.push_context(&mut out, divergence.path(), reference, target);
        out
    }

    /// Render a report for any comparison failure.
    ///
    /// A depth-limit failure has no values to show, only the surrounding
    /// subtrees at the point where the walk stopped.
    pub fn report_error(
        &self,
        error: &CompareError,
        reference: &TreeValue,
        target: &TreeValue,
    ) -> String {
        match error {
            CompareError::Diverged(divergence) => self.report(divergence, reference, target),
            CompareError::DepthLimitExceeded { path, .. } => {
                let mut out = error.to_string();
                out.push('\n');
                self.push_context(&mut out, path, reference, target);
                out
            }
        }
    }

    fn push_context(
        &self,
        out: &mut String,
        path: &PathTrace,
        reference: &TreeValue,
        target: &TreeValue,
    ) {
        let located = locate(path, reference, target, self.options.depth_budget);
        let anchor = location(&located.anchor);
        let reference_text = located
            .reference
            .map(|v| render(v, located.display_depth));
        let target_text = located.target.map(|v| render(v, located.display_depth));

        for (label, text) in [
            (&self.options.reference_label, &reference_text),
            (&self.options.target_label, &target_text),
        ] {
            out.push_str(&format!("\n{label} at {anchor}:\n"));
            out.push_str(text.as_deref().unwrap_or("(not found)"));
            out.push('\n');
        }

        if !self.options.line_diff {
            return;
        }
        if let (Some(reference_text), Some(target_text)) = (&reference_text, &target_text) {
            let lines = line_diff(reference_text, target_text);
            if lines.is_empty() {
                return;
            }
            out.push_str(&format!(
                "\ndiff ({} -> {}):\n",
                self.options.reference_label, self.options.target_label
            ));
            for line in lines {
                out.push_str(&line.to_string());
                out.push('\n');
            }
        }
    }
}

fn location(path: &PathTrace) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.to_dotted()
    }
}

fn raw(value: Option<&TreeValue>) -> String {
    match value {
        Some(value) => render(value, 0),
        None => "(absent)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astcheck_compare::{compare, Comparator, CompareOptions};
    use proptest::prelude::*;
    use serde_json::json;

    fn divergence_between(reference: &TreeValue, target: &TreeValue) -> Divergence {
        match compare(reference, target) {
            Err(CompareError::Diverged(d)) => d,
            other => panic!("expected divergence, got {other:?}"),
        }
    }

    fn program(value: serde_json::Value) -> TreeValue {
        TreeValue::from(json!({
            "type": "Program",
            "body": [{
                "type": "ExpressionStatement",
                "expression": {"type": "Literal", "value": value, "raw": "5"}
            }]
        }))
    }

    #[test]
    fn report_shows_reason_values_and_context() {
        let reference = program(json!(5));
        let target = program(json!(6));
        let d = divergence_between(&reference, &target);
        assert_eq!(d.path().to_dotted(), "body.0.expression.value");

        let text = report(&d, &reference, &target, Some("acorn"), Some("loose"), 2);
        assert!(text.starts_with(
            "value mismatch at body.0.expression.value: reference is number 5, target is number 6"
        ));
        assert!(text.contains("  path: body.0.expression.value\n"));
        assert!(text.contains("  acorn: 5\n"));
        assert!(text.contains("  loose: 6\n"));
        assert!(text.contains("\nacorn at body.0:\n"));
        assert!(text.contains("\nloose at body.0:\n"));
        assert!(text.contains("\"type\": \"ExpressionStatement\""));
        assert!(text.contains("\"value\": 5"));
        assert!(text.contains("\"value\": 6"));
        assert!(text.contains("diff (acorn -> loose):"));
        assert!(text.contains("-     \"value\": 5\n"));
        assert!(text.contains("+     \"value\": 6\n"));
    }

    #[test]
    fn labels_default_to_generic_names() {
        let reference = TreeValue::from(json!({"v": 1}));
        let target = TreeValue::from(json!({"v": 2}));
        let d = divergence_between(&reference, &target);

        let text = report(&d, &reference, &target, None, None, 2);
        assert!(text.contains("\nreference at <root>:\n"));
        assert!(text.contains("\ntarget at <root>:\n"));
        assert!(text.contains("diff (reference -> target):"));
    }

    #[test]
    fn missing_key_reports_absent_side() {
        let reference = TreeValue::from(json!({"type": "Literal", "value": 5, "extra": "x"}));
        let target = TreeValue::from(json!({"type": "Literal", "value": 5}));
        let d = divergence_between(&reference, &target);

        let text = report(&d, &reference, &target, None, None, 1);
        assert!(text.contains("  target: (absent)\n"));
        assert!(text.contains("\"extra\": \"x\""));
    }

    #[test]
    fn missing_ancestor_is_not_found() {
        let reference = TreeValue::from(json!({"body": [{"a": {"b": 1}}]}));
        let target = TreeValue::from(json!({"body": []}));
        let d = divergence_between(&reference, &target);
        assert_eq!(d.path().to_dotted(), "body.0");

        let text = report(&d, &reference, &target, None, None, 0);
        assert!(text.contains("\ntarget at body.0:\n(not found)\n"));
        assert!(!text.contains("diff ("));
    }

    #[test]
    fn display_depth_bounds_output() {
        let reference = TreeValue::from(json!({
            "a": {"b": {"c": 1, "deep": {"x": {"y": 1}}}}
        }));
        let target = TreeValue::from(json!({
            "a": {"b": {"c": 2, "deep": {"x": {"y": 1}}}}
        }));
        let d = divergence_between(&reference, &target);

        // Anchor "a", depth 2: "b" expands, "deep" collapses.
        let text = report(&d, &reference, &target, None, None, 2);
        assert!(text.contains("\"deep\": {...1 key}"));
        assert!(!text.contains("\"y\""));
    }

    #[test]
    fn line_diff_can_be_disabled() {
        let reference = TreeValue::from(json!({"v": 1}));
        let target = TreeValue::from(json!({"v": 2}));
        let d = divergence_between(&reference, &target);

        let reporter = DivergenceReporter::new(ReportOptions {
            line_diff: false,
            ..Default::default()
        });
        assert!(!reporter.report(&d, &reference, &target).contains("diff ("));
    }

    #[test]
    fn depth_limit_error_report() {
        let mut deep = TreeValue::from(1i64);
        for _ in 0..6 {
            deep = TreeValue::mapping([("n", deep)]);
        }
        let comparator = Comparator::new(CompareOptions::default().with_max_depth(3));
        let error = comparator.check(&deep, &deep).unwrap_err();

        let text = DivergenceReporter::default().report_error(&error, &deep, &deep);
        assert!(text.starts_with("recursion limit of 3 exceeded at n.n.n.n"));
        assert!(text.contains("\nreference at n.n:\n"));
        assert!(!text.contains("diff ("));
    }

    proptest! {
        #[test]
        fn report_always_names_path_and_values(a in -50i64..50, b in -50i64..50, key in "[a-z]{1,6}") {
            prop_assume!(a != b);
            let reference = TreeValue::mapping([(key.clone(), TreeValue::mapping([("v", TreeValue::from(a))]))]);
            let target = TreeValue::mapping([(key.clone(), TreeValue::mapping([("v", TreeValue::from(b))]))]);
            let d = divergence_between(&reference, &target);
            let text = DivergenceReporter::default().report(&d, &reference, &target);
            let path_line = format!("  path: {key}.v\n");
            let reference_line = format!("  reference: {a}\n");
            let target_line = format!("  target: {b}\n");
            prop_assert!(text.contains(&path_line));
            prop_assert!(text.contains(&reference_line));
            prop_assert!(text.contains(&target_line));
        }
    }
}
