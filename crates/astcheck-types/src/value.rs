use std::fmt;

use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::{TreeError, TreeResult};

/// Largest integer magnitude an `f64` represents exactly.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// Nesting limit applied when parsing without an explicit one.
///
/// serde_json's own limit of 128 is disabled; this one replaces it.
pub const DEFAULT_MAX_NESTING: usize = 512;

/// A dynamically-typed tree value, as produced by a parser.
///
/// Mapping entries keep the order they had in the source document; keys are
/// AST field names such as `type`, `loc` or `body`. Sequences are node lists.
///
/// Numbers are stored as `f64`, so `1` and `1.0` are the same value.
#[derive(Clone, Debug, PartialEq)]
pub enum TreeValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Mapping(Vec<(String, TreeValue)>),
    Sequence(Vec<TreeValue>),
}

/// The dynamic kind of a tree position.
///
/// `Absent` stands for a field or index that does not exist on one side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Absent,
    Null,
    Boolean,
    Number,
    String,
    Mapping,
    Sequence,
}

impl Kind {
    /// Kind of an optional position; `None` is [`Kind::Absent`].
    pub fn of(value: Option<&TreeValue>) -> Self {
        value.map_or(Kind::Absent, TreeValue::kind)
    }

    /// Lowercase name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Absent => "absent",
            Kind::Null => "null",
            Kind::Boolean => "boolean",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Mapping => "mapping",
            Kind::Sequence => "sequence",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TreeValue {
    /// Build a mapping from `(key, value)` pairs, keeping their order.
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, TreeValue)>,
    {
        let mut map = TreeValue::Mapping(Vec::new());
        for (key, value) in entries {
            map.insert(key, value);
        }
        map
    }

    /// Build a sequence from items.
    pub fn sequence<I>(items: I) -> Self
    where
        I: IntoIterator<Item = TreeValue>,
    {
        TreeValue::Sequence(items.into_iter().collect())
    }

    /// The dynamic kind of this value.
    pub fn kind(&self) -> Kind {
        match self {
            TreeValue::Null => Kind::Null,
            TreeValue::Bool(_) => Kind::Boolean,
            TreeValue::Number(_) => Kind::Number,
            TreeValue::String(_) => Kind::String,
            TreeValue::Mapping(_) => Kind::Mapping,
            TreeValue::Sequence(_) => Kind::Sequence,
        }
    }

    /// Look up a field of a mapping. Returns `None` for other kinds.
    pub fn get(&self, key: &str) -> Option<&TreeValue> {
        match self {
            TreeValue::Mapping(entries) => entries
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Look up an element of a sequence. Returns `None` for other kinds.
    pub fn get_index(&self, index: usize) -> Option<&TreeValue> {
        match self {
            TreeValue::Sequence(items) => items.get(index),
            _ => None,
        }
    }

    /// Insert or replace a mapping field. A replaced field keeps its position.
    ///
    /// Has no effect on non-mapping values.
    pub fn insert(&mut self, key: impl Into<String>, value: TreeValue) {
        if let TreeValue::Mapping(entries) = self {
            let key = key.into();
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => entries.push((key, value)),
            }
        }
    }

    /// Mapping entries in order, if this is a mapping.
    pub fn entries(&self) -> Option<&[(String, TreeValue)]> {
        match self {
            TreeValue::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Number of direct children (0 for scalars).
    pub fn len(&self) -> usize {
        match self {
            TreeValue::Mapping(entries) => entries.len(),
            TreeValue::Sequence(items) => items.len(),
            _ => 0,
        }
    }

    /// Returns `true` if this value has no children.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_null(&self) -> bool {
        matches!(self, TreeValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TreeValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TreeValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Parse a JSON document, keeping mapping key order.
    ///
    /// Nesting is limited to [`DEFAULT_MAX_NESTING`] levels.
    pub fn from_json_str(text: &str) -> TreeResult<Self> {
        Self::from_json_str_with_limit(text, DEFAULT_MAX_NESTING)
    }

    /// Parse a JSON document, rejecting values nested deeper than `max_nesting`.
    pub fn from_json_str_with_limit(text: &str, max_nesting: usize) -> TreeResult<Self> {
        parse_json(serde_json::Deserializer::from_str(text), max_nesting)
    }

    /// Parse a JSON document from bytes, keeping mapping key order.
    pub fn from_json_slice(bytes: &[u8]) -> TreeResult<Self> {
        Self::from_json_slice_with_limit(bytes, DEFAULT_MAX_NESTING)
    }

    /// Byte-slice form of [`TreeValue::from_json_str_with_limit`].
    pub fn from_json_slice_with_limit(bytes: &[u8], max_nesting: usize) -> TreeResult<Self> {
        parse_json(serde_json::Deserializer::from_slice(bytes), max_nesting)
    }

    /// Compact JSON encoding.
    pub fn to_json_string(&self) -> TreeResult<String> {
        serde_json::to_string(self).map_err(|e| TreeError::Serialization(e.to_string()))
    }
}

impl fmt::Display for TreeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

impl From<serde_json::Value> for TreeValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => TreeValue::Null,
            serde_json::Value::Bool(b) => TreeValue::Bool(b),
            serde_json::Value::Number(n) => TreeValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => TreeValue::String(s),
            serde_json::Value::Array(items) => {
                TreeValue::Sequence(items.into_iter().map(TreeValue::from).collect())
            }
            serde_json::Value::Object(map) => TreeValue::Mapping(
                map.into_iter().map(|(k, v)| (k, TreeValue::from(v))).collect(),
            ),
        }
    }
}

impl From<bool> for TreeValue {
    fn from(b: bool) -> Self {
        TreeValue::Bool(b)
    }
}

impl From<f64> for TreeValue {
    fn from(n: f64) -> Self {
        TreeValue::Number(n)
    }
}

impl From<i64> for TreeValue {
    fn from(n: i64) -> Self {
        TreeValue::Number(n as f64)
    }
}

impl From<&str> for TreeValue {
    fn from(s: &str) -> Self {
        TreeValue::String(s.to_string())
    }
}

impl From<String> for TreeValue {
    fn from(s: String) -> Self {
        TreeValue::String(s)
    }
}

// ---------------------------------------------------------------------------
// Serde
// ---------------------------------------------------------------------------

impl Serialize for TreeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TreeValue::Null => serializer.serialize_unit(),
            TreeValue::Bool(b) => serializer.serialize_bool(*b),
            TreeValue::Number(n) => {
                // Integral values print without a trailing `.0`.
                if n.fract() == 0.0 && n.abs() <= MAX_EXACT_INT {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            TreeValue::String(s) => serializer.serialize_str(s),
            TreeValue::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            TreeValue::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for TreeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        NestingSeed::root(DEFAULT_MAX_NESTING).deserialize(deserializer)
    }
}

fn parse_json<'de, R>(
    mut de: serde_json::Deserializer<R>,
    max_nesting: usize,
) -> TreeResult<TreeValue>
where
    R: serde_json::de::Read<'de>,
{
    de.disable_recursion_limit();
    let value = NestingSeed::root(max_nesting)
        .deserialize(&mut de)
        .map_err(|e| TreeError::Parse(e.to_string()))?;
    de.end().map_err(|e| TreeError::Parse(e.to_string()))?;
    Ok(value)
}

/// Deserializes one value at `depth`, failing past `limit`.
#[derive(Clone, Copy)]
struct NestingSeed {
    depth: usize,
    limit: usize,
}

impl NestingSeed {
    fn root(limit: usize) -> Self {
        Self { depth: 0, limit }
    }

    fn child(self) -> Self {
        Self {
            depth: self.depth + 1,
            limit: self.limit,
        }
    }
}

impl<'de> DeserializeSeed<'de> for NestingSeed {
    type Value = TreeValue;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<TreeValue, D::Error> {
        if self.depth > self.limit {
            return Err(de::Error::custom(format!(
                "nesting exceeds {} levels",
                self.limit
            )));
        }
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for NestingSeed {
    type Value = TreeValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON-compatible tree value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<TreeValue, E> {
        Ok(TreeValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<TreeValue, E> {
        Ok(TreeValue::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<TreeValue, E> {
        Ok(TreeValue::Number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<TreeValue, E> {
        Ok(TreeValue::Number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<TreeValue, E> {
        Ok(TreeValue::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<TreeValue, E> {
        Ok(TreeValue::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<TreeValue, E> {
        Ok(TreeValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<TreeValue, E> {
        Ok(TreeValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<TreeValue, D::Error> {
        DeserializeSeed::deserialize(self, deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<TreeValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element_seed(self.child())? {
            items.push(item);
        }
        Ok(TreeValue::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<TreeValue, A::Error> {
        let mut map = TreeValue::Mapping(Vec::with_capacity(access.size_hint().unwrap_or(0)));
        while let Some(key) = access.next_key::<String>()? {
            let value = access.next_value_seed(self.child())?;
            map.insert(key, value);
        }
        Ok(map)
    }
}
