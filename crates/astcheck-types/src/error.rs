use thiserror::Error;

/// Errors produced by tree and path operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("invalid path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for tree results.
pub type TreeResult<T> = Result<T, TreeError>;
