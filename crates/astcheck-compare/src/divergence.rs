use std::fmt;

use serde::{Deserialize, Serialize};

use astcheck_types::{render, Kind, PathTrace, TreeValue};

/// How the two trees differ at the divergence point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DivergenceKind {
    /// The two positions have different kinds, or one side is absent.
    TypeMismatch,
    /// Both positions are scalars of the same kind with different content.
    ValueMismatch,
}

impl fmt::Display for DivergenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DivergenceKind::TypeMismatch => f.write_str("type mismatch"),
            DivergenceKind::ValueMismatch => f.write_str("value mismatch"),
        }
    }
}

/// The first mismatch between a reference tree and a target tree.
///
/// Carries the structured path to the mismatch and both raw values
/// (`None` where a side is absent).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Divergence {
    kind: DivergenceKind,
    path: PathTrace,
    reference: Option<TreeValue>,
    target: Option<TreeValue>,
}

impl Divergence {
    pub fn new(
        kind: DivergenceKind,
        path: PathTrace,
        reference: Option<TreeValue>,
        target: Option<TreeValue>,
    ) -> Self {
        Self {
            kind,
            path,
            reference,
            target,
        }
    }

    pub fn kind(&self) -> DivergenceKind {
        self.kind
    }

    pub fn path(&self) -> &PathTrace {
        &self.path
    }

    /// The reference-side value at the path.
    pub fn reference(&self) -> Option<&TreeValue> {
        self.reference.as_ref()
    }

    /// The target-side value at the path.
    pub fn target(&self) -> Option<&TreeValue> {
        self.target.as_ref()
    }

    pub fn reference_kind(&self) -> Kind {
        Kind::of(self.reference())
    }

    pub fn target_kind(&self) -> Kind {
        Kind::of(self.target())
    }

    /// One-line human explanation naming the path, both kinds and both values.
    pub fn reason(&self) -> String {
        let location = if self.path.is_empty() {
            "<root>".to_string()
        } else {
            self.path.to_dotted()
        };
        format!(
            "{} at {}: reference is {}, target is {}",
            self.kind,
            location,
            describe(self.reference()),
            describe(self.target()),
        )
    }
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason())
    }
}

fn describe(value: Option<&TreeValue>) -> String {
    match value {
        None => "absent".to_string(),
        // Containers collapse to a key/item count.
        Some(value) => format!("{} {}", value.kind(), render(value, 0)),
    }
}
