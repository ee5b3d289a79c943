//! Error types for the compare crate.

use astcheck_types::PathTrace;

use crate::divergence::Divergence;

/// Errors that end a comparison.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompareError {
    /// The trees differ. Only the first divergence is reported.
    #[error("{0}")]
    Diverged(Divergence),

    /// The trees nest deeper than the configured limit.
    #[error("recursion limit of {limit} exceeded at {path}")]
    DepthLimitExceeded { path: PathTrace, limit: usize },
}

impl CompareError {
    /// The divergence, if the trees were found to differ.
    pub fn divergence(&self) -> Option<&Divergence> {
        match self {
            CompareError::Diverged(divergence) => Some(divergence),
            CompareError::DepthLimitExceeded { .. } => None,
        }
    }

    /// Where in the trees the comparison stopped.
    pub fn path(&self) -> &PathTrace {
        match self {
            CompareError::Diverged(divergence) => divergence.path(),
            CompareError::DepthLimitExceeded { path, .. } => path,
        }
    }
}

impl From<Divergence> for CompareError {
    fn from(divergence: Divergence) -> Self {
        CompareError::Diverged(divergence)
    }
}

/// Convenience alias for compare results.
pub type CompareResult<T> = Result<T, CompareError>;
