//! Paths into a tree.
//!
//! A [`PathTrace`] is an ordered list of field-name and index steps. The
//! comparator pushes a segment on descent and pops it on return, so the
//! trace length always equals the current recursion depth.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TreeError;
use crate::value::TreeValue;

/// One step into a tree: a mapping field or a sequence position.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Key(String),
}

impl PathSegment {
    /// Follow this segment from `value`.
    ///
    /// An index also addresses a mapping field spelled as that number, and a
    /// numeric key also addresses a sequence element, so paths parsed from
    /// dotted strings resolve either way.
    pub fn step<'a>(&self, value: &'a TreeValue) -> Option<&'a TreeValue> {
        match (self, value) {
            (PathSegment::Key(key), TreeValue::Mapping(_)) => value.get(key),
            (PathSegment::Index(i), TreeValue::Sequence(_)) => value.get_index(*i),
            (PathSegment::Index(i), TreeValue::Mapping(_)) => value.get(&i.to_string()),
            (PathSegment::Key(key), TreeValue::Sequence(_)) => {
                key.parse::<usize>().ok().and_then(|i| value.get_index(i))
            }
            _ => None,
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(i) => write!(f, "{i}"),
            PathSegment::Key(key) => f.write_str(key),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// An ordered sequence of [`PathSegment`]s from the root of a tree.
///
/// Displays as a dotted string (`body.0.expression`) for messages; the
/// empty trace is the root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathTrace {
    segments: Vec<PathSegment>,
}

impl PathTrace {
    /// The empty trace, addressing the root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a trace from segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn push(&mut self, segment: impl Into<PathSegment>) {
        self.segments.push(segment.into());
    }

    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// The leading segments left after dropping `trim_from_end` from the end.
    /// Clamps to the root when `trim_from_end` exceeds the length.
    pub fn prefix(&self, trim_from_end: usize) -> &[PathSegment] {
        let keep = self.segments.len().saturating_sub(trim_from_end);
        &self.segments[..keep]
    }

    /// The ancestor trace `trim_from_end` levels up.
    pub fn ancestor(&self, trim_from_end: usize) -> PathTrace {
        Self {
            segments: self.prefix(trim_from_end).to_vec(),
        }
    }

    /// Dotted form, e.g. `body.0.expression.value`. The root is `""`.
    pub fn to_dotted(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PathTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for PathTrace {
    type Err = TreeError;

    /// Parse a dotted path. All-digit segments become indices.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::root());
        }
        let mut trace = Self::root();
        for part in s.split('.') {
            if part.is_empty() {
                return Err(TreeError::InvalidPath {
                    path: s.to_string(),
                    reason: "empty segment".into(),
                });
            }
            match part.parse::<usize>() {
                Ok(index) => trace.push(index),
                Err(_) => trace.push(part),
            }
        }
        Ok(trace)
    }
}

impl<'a> IntoIterator for &'a PathTrace {
    type Item = &'a PathSegment;
    type IntoIter = std::slice::Iter<'a, PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

/// Walk `tree` along the first `len - trim_from_end` segments of `trace`.
///
/// Returns `None` if any segment along the way does not exist.
pub fn resolve<'a>(
    tree: &'a TreeValue,
    trace: &PathTrace,
    trim_from_end: usize,
) -> Option<&'a TreeValue> {
    trace
        .prefix(trim_from_end)
        .iter()
        .try_fold(tree, |node, segment| segment.step(node))
}
