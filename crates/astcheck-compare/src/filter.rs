//! Top-level key filtering applied before comparison.

use std::borrow::Cow;

use astcheck_types::TreeValue;

/// Return `tree` without the named top-level keys.
///
/// The input is never modified. Borrows the original when there is nothing
/// to remove (no keys given, not a mapping, or none of the keys present).
pub fn strip_keys<'a, S: AsRef<str>>(tree: &'a TreeValue, keys: &[S]) -> Cow<'a, TreeValue> {
    let Some(entries) = tree.entries() else {
        return Cow::Borrowed(tree);
    };
    let ignored = |key: &str| keys.iter().any(|k| k.as_ref() == key);
    if !entries.iter().any(|(key, _)| ignored(key)) {
        return Cow::Borrowed(tree);
    }
    let kept = entries
        .iter()
        .filter(|(key, _)| !ignored(key))
        .cloned()
        .collect();
    Cow::Owned(TreeValue::Mapping(kept))
}
