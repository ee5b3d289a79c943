use astcheck_types::DEFAULT_MAX_NESTING;
use serde::{Deserialize, Serialize};

/// Configuration for a structural comparison.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareOptions {
    /// Top-level keys removed from both trees before comparing.
    ///
    /// Token lists are the usual candidate: tokenization detail may differ
    /// between parsers even when the AST shape must match.
    pub ignored_keys: Vec<String>,
    /// Maximum nesting depth walked before giving up with
    /// [`CompareError::DepthLimitExceeded`](crate::CompareError::DepthLimitExceeded).
    pub max_depth: usize,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            ignored_keys: Vec::new(),
            max_depth: DEFAULT_MAX_NESTING,
        }
    }
}

impl CompareOptions {
    /// Options that drop the top-level `tokens` list from both sides.
    pub fn without_tokens() -> Self {
        Self::default().ignore("tokens")
    }

    /// Add a top-level key to ignore.
    pub fn ignore(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        if !self.ignored_keys.contains(&key) {
            self.ignored_keys.push(key);
        }
        self
    }

    /// Set the recursion limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
