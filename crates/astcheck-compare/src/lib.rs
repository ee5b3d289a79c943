//! Structural comparator for astcheck.
//!
//! Checks that a target parser's tree conforms to a reference parser's tree.
//! Comparison is directional: every field the reference carries must be
//! matched by the target, while extra target fields are ignored.
//!
//! # Key Types
//!
//! - [`Comparator`] -- Reference-driven deep comparison with a depth guard
//! - [`Divergence`] / [`DivergenceKind`] -- The first mismatch found, with its path
//! - [`CompareOptions`] -- Ignored top-level keys and the recursion limit
//! - [`strip_keys`] -- Drop top-level fields (such as `tokens`) before comparing

pub mod comparator;
pub mod config;
pub mod divergence;
pub mod error;
pub mod filter;

pub use comparator::{compare, compare_from, Comparator};
pub use config::CompareOptions;
pub use divergence::{Divergence, DivergenceKind};
pub use error::{CompareError, CompareResult};
pub use filter::strip_keys;
