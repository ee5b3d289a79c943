//! Foundation types for astcheck.
//!
//! This crate provides the value and location types shared by the comparator
//! and the reporter. Every other astcheck crate depends on `astcheck-types`.
//!
//! # Key Types
//!
//! - [`TreeValue`] -- Dynamically-typed AST node: null, boolean, number, string, mapping, sequence
//! - [`Kind`] -- The dynamic kind of a value, including [`Kind::Absent`] for missing fields
//! - [`PathSegment`] / [`PathTrace`] -- Field/index steps locating a node inside a tree
//! - [`resolve`] -- Walk a tree along a path prefix
//! - [`render`] -- Depth-bounded pretty printer for diagnostics

pub mod error;
pub mod path;
pub mod render;
pub mod value;

pub use error::{TreeError, TreeResult};
pub use path::{resolve, PathSegment, PathTrace};
pub use render::render;
pub use value::{Kind, TreeValue, DEFAULT_MAX_NESTING};
