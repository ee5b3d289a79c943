//! Reference-driven structural comparison.
//!
//! The walk is depth-first in reference key order and stops at the first
//! mismatch:
//!
//! - kinds differ (including one side absent) -> [`DivergenceKind::TypeMismatch`]
//! - mappings: only the reference's keys are visited; extra target keys are ignored
//! - sequences: compared index by index over the longer length, so a length
//!   difference surfaces as a type mismatch against an absent element
//! - scalars: exact equality, otherwise [`DivergenceKind::ValueMismatch`]

use tracing::{debug, trace};

use astcheck_types::{Kind, PathTrace, TreeValue};

use crate::config::CompareOptions;
use crate::divergence::{Divergence, DivergenceKind};
use crate::error::{CompareError, CompareResult};
use crate::filter::strip_keys;

/// Compare `target` against `reference` with default options.
pub fn compare(reference: &TreeValue, target: &TreeValue) -> CompareResult<()> {
    Comparator::default().check(reference, target)
}

/// Compare two subtrees that sit at `path` within their enclosing trees.
///
/// Reported paths are prefixed with `path`. Ignored keys do not apply here
/// since the subtrees are not roots.
pub fn compare_from(
    reference: &TreeValue,
    target: &TreeValue,
    path: &PathTrace,
) -> CompareResult<()> {
    let comparator = Comparator::default();
    let mut path = path.clone();
    comparator.walk(Some(reference), Some(target), &mut path)
}

/// A configured structural comparator.
///
/// Holds no state between calls; one instance can check any number of tree
/// pairs, from any number of threads.
#[derive(Clone, Debug, Default)]
pub struct Comparator {
    options: CompareOptions,
}

impl Comparator {
    pub fn new(options: CompareOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    /// Check that `target` conforms to `reference`.
    ///
    /// Ignored top-level keys are removed from both sides first. Neither
    /// input is modified.
    pub fn check(&self, reference: &TreeValue, target: &TreeValue) -> CompareResult<()> {
        let reference = strip_keys(reference, &self.options.ignored_keys);
        let target = strip_keys(target, &self.options.ignored_keys);

        let mut path = PathTrace::root();
        let outcome = self.walk(Some(&*reference), Some(&*target), &mut path);
        match &outcome {
            Ok(()) => trace!("trees conform"),
            Err(CompareError::Diverged(divergence)) => debug!(
                path = %divergence.path(),
                kind = %divergence.kind(),
                "divergence found"
            ),
            Err(CompareError::DepthLimitExceeded { path, limit }) => {
                debug!(path = %path, limit, "comparison depth limit exceeded")
            }
        }
        outcome
    }

    /// Returns `true` if `target` conforms to `reference`.
    pub fn conforms(&self, reference: &TreeValue, target: &TreeValue) -> bool {
        self.check(reference, target).is_ok()
    }

    fn walk(
        &self,
        reference: Option<&TreeValue>,
        target: Option<&TreeValue>,
        path: &mut PathTrace,
    ) -> CompareResult<()> {
        if path.len() > self.options.max_depth {
            return Err(CompareError::DepthLimitExceeded {
                path: path.clone(),
                limit: self.options.max_depth,
            });
        }

        if Kind::of(reference) != Kind::of(target) {
            return Err(diverged(DivergenceKind::TypeMismatch, path, reference, target));
        }

        match (reference, target) {
            (Some(TreeValue::Mapping(entries)), Some(other)) => {
                for (key, value) in entries {
                    path.push(key.as_str());
                    self.walk(Some(value), other.get(key), path)?;
                    path.pop();
                }
                Ok(())
            }
            (Some(TreeValue::Sequence(items)), Some(TreeValue::Sequence(others))) => {
                for i in 0..items.len().max(others.len()) {
                    path.push(i);
                    self.walk(items.get(i), others.get(i), path)?;
                    path.pop();
                }
                Ok(())
            }
            (Some(r), Some(t)) if r != t => {
                Err(diverged(DivergenceKind::ValueMismatch, path, reference, target))
            }
            _ => Ok(()),
        }
    }
}

fn diverged(
    kind: DivergenceKind,
    path: &PathTrace,
    reference: Option<&TreeValue>,
    target: Option<&TreeValue>,
) -> CompareError {
    CompareError::Diverged(Divergence::new(
        kind,
        path.clone(),
        reference.cloned(),
        target.cloned(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use astcheck_types::PathSegment;
    use proptest::prelude::*;
    use serde_json::json;

    fn tree(value: serde_json::Value) -> TreeValue {
        TreeValue::from(value)
    }

    fn divergence(result: CompareResult<()>) -> Divergence {
        match result {
            Err(CompareError::Diverged(d)) => d,
            other => panic!("expected divergence, got {other:?}"),
        }
    }

    #[test]
    fn identical_trees_conform() {
        let t = tree(json!({"type": "Program", "body": [{"type": "EmptyStatement"}]}));
        assert!(compare(&t, &t).is_ok());
    }

    #[test]
    fn extra_target_keys_are_ignored() {
        let reference = tree(json!({"type": "Identifier", "name": "x"}));
        let target = tree(json!({"type": "Identifier", "name": "x", "range": [0, 1]}));
        assert!(compare(&reference, &target).is_ok());
    }

    #[test]
    fn missing_target_key_is_type_mismatch() {
        let reference = tree(json!({"type": "Identifier", "name": "x"}));
        let target = tree(json!({"type": "Identifier"}));
        let d = divergence(compare(&reference, &target));
        assert_eq!(d.kind(), DivergenceKind::TypeMismatch);
        assert_eq!(d.path().last(), Some(&PathSegment::Key("name".into())));
        assert_eq!(d.target_kind(), Kind::Absent);
        assert_eq!(d.reference(), Some(&TreeValue::from("x")));
    }

    #[test]
    fn scalar_exactness() {
        assert!(compare(&tree(json!({"v": 1})), &tree(json!({"v": 1.0}))).is_ok());

        let d = divergence(compare(&tree(json!({"v": 1})), &tree(json!({"v": "1"}))));
        assert_eq!(d.kind(), DivergenceKind::TypeMismatch);

        let d = divergence(compare(&tree(json!({"v": 1})), &tree(json!({"v": 2}))));
        assert_eq!(d.kind(), DivergenceKind::ValueMismatch);
        assert_eq!(d.reference(), Some(&TreeValue::Number(1.0)));
        assert_eq!(d.target(), Some(&TreeValue::Number(2.0)));
    }

    #[test]
    fn path_points_at_the_leaf() {
        let d = divergence(compare(
            &tree(json!({"a": {"b": {"c": 1}}})),
            &tree(json!({"a": {"b": {"c": 2}}})),
        ));
        assert_eq!(d.path(), &PathTrace::from_segments(["a", "b", "c"]));
    }

    #[test]
    fn sequence_order_matters() {
        assert!(compare(&tree(json!([1, 2])), &tree(json!([1, 2]))).is_ok());

        let d = divergence(compare(&tree(json!([1, 2])), &tree(json!([2, 1]))));
        assert_eq!(d.kind(), DivergenceKind::ValueMismatch);
        assert_eq!(d.path(), &PathTrace::from_segments([0usize]));
    }

    #[test]
    fn sequence_length_difference_reports_first_missing_index() {
        let d = divergence(compare(&tree(json!([1, 2, 3])), &tree(json!([1, 2]))));
        assert_eq!(d.kind(), DivergenceKind::TypeMismatch);
        assert_eq!(d.path(), &PathTrace::from_segments([2usize]));
        assert_eq!(d.target_kind(), Kind::Absent);

        // Extra trailing target elements also diverge.
        let d = divergence(compare(&tree(json!([1])), &tree(json!([1, 2]))));
        assert_eq!(d.path(), &PathTrace::from_segments([1usize]));
        assert_eq!(d.reference_kind(), Kind::Absent);
    }

    #[test]
    fn comparison_is_directional() {
        let full = tree(json!({"type": "Literal", "value": 5, "extra": "x"}));
        let lean = tree(json!({"type": "Literal", "value": 5}));

        let d = divergence(compare(&full, &lean));
        assert_eq!(d.path(), &PathTrace::from_segments(["extra"]));
        assert!(compare(&lean, &full).is_ok());
    }

    #[test]
    fn first_divergence_in_reference_key_order() {
        let reference = TreeValue::from_json_str(r#"{"z": 1, "a": 1}"#).unwrap();
        let target = TreeValue::from_json_str(r#"{"a": 2, "z": 2}"#).unwrap();
        let d = divergence(compare(&reference, &target));
        assert_eq!(d.path(), &PathTrace::from_segments(["z"]));
    }

    #[test]
    fn json_fixture_divergence_follows_written_key_order() {
        let reference = tree(json!({"z": 1, "a": 1}));
        let target = tree(json!({"z": 2, "a": 2}));
        let d = divergence(compare(&reference, &target));
        assert_eq!(d.path(), &PathTrace::from_segments(["z"]));
    }

    #[test]
    fn mapping_versus_sequence_is_type_mismatch() {
        let d = divergence(compare(&tree(json!({"body": {}})), &tree(json!({"body": []}))));
        assert_eq!(d.kind(), DivergenceKind::TypeMismatch);
        assert_eq!(d.reference_kind(), Kind::Mapping);
        assert_eq!(d.target_kind(), Kind::Sequence);
    }

    #[test]
    fn null_matches_null_only() {
        assert!(compare(&tree(json!({"loc": null})), &tree(json!({"loc": null}))).is_ok());
        let d = divergence(compare(&tree(json!({"loc": null})), &tree(json!({"loc": {}}))));
        assert_eq!(d.kind(), DivergenceKind::TypeMismatch);
    }

    #[test]
    fn ignored_keys_are_stripped_on_both_sides() {
        let reference = tree(json!({"type": "Program", "tokens": [1, 2, 3]}));
        let target = tree(json!({"type": "Program", "tokens": []}));
        assert!(compare(&reference, &target).is_err());

        let comparator = Comparator::new(CompareOptions::without_tokens());
        assert!(comparator.conforms(&reference, &target));
        // Inputs untouched.
        assert_eq!(reference.get("tokens").map(TreeValue::len), Some(3));
    }

    #[test]
    fn depth_limit_fails_cleanly() {
        let mut deep = TreeValue::Null;
        for _ in 0..20 {
            deep = TreeValue::mapping([("child", deep)]);
        }
        let comparator = Comparator::new(CompareOptions::default().with_max_depth(8));
        match comparator.check(&deep, &deep) {
            Err(CompareError::DepthLimitExceeded { path, limit }) => {
                assert_eq!(limit, 8);
                assert_eq!(path.len(), 9);
            }
            other => panic!("expected depth limit, got {other:?}"),
        }
        assert!(compare(&deep, &deep).is_ok());
    }

    #[test]
    fn compare_from_prefixes_paths() {
        let base: PathTrace = "body.0".parse().unwrap();
        let d = divergence(compare_from(
            &tree(json!({"value": 1})),
            &tree(json!({"value": 2})),
            &base,
        ));
        assert_eq!(d.path().to_dotted(), "body.0.value");
    }

    fn arb_tree() -> impl Strategy<Value = TreeValue> {
        let leaf = prop_oneof![
            Just(TreeValue::Null),
            any::<bool>().prop_map(TreeValue::Bool),
            (-1000i64..1000).prop_map(TreeValue::from),
            "[a-z]{0,6}".prop_map(TreeValue::String),
        ];
        leaf.prop_recursive(4, 48, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..5).prop_map(TreeValue::Sequence),
                prop::collection::vec(("[a-z]{1,4}", inner), 0..5)
                    .prop_map(|entries| TreeValue::mapping(entries)),
            ]
        })
    }

    proptest! {
        #[test]
        fn reflexive(t in arb_tree()) {
            prop_assert!(compare(&t, &t).is_ok());
        }

        #[test]
        fn superset_tolerant(
            t in prop::collection::vec(("[a-z]{1,4}", arb_tree()), 0..5),
            extra in prop::collection::vec(("[A-Z]{1,4}", arb_tree()), 1..4),
        ) {
            let reference = TreeValue::mapping(t.clone());
            let target = TreeValue::mapping(t.into_iter().chain(extra));
            prop_assert!(compare(&reference, &target).is_ok());
        }

        #[test]
        fn divergence_path_resolves_in_reference(a in arb_tree(), b in arb_tree()) {
            if let Err(CompareError::Diverged(d)) = compare(&a, &b) {
                let at = astcheck_types::resolve(&a, d.path(), 0);
                prop_assert_eq!(at, d.reference());
                let at = astcheck_types::resolve(&b, d.path(), 0);
                prop_assert_eq!(at, d.target());
            }
        }
    }
}
