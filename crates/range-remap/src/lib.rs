//! Interval remapping engine for layered range-translation puzzles.
//!
//! This crate provides the range pipeline shared by a family of puzzle
//! solvers: a multiset of integer intervals is passed through an ordered
//! sequence of translation layers, each a table of disjoint
//! source-to-destination rules, with values no rule covers passing through
//! unchanged. Callers build the layers once from their own input format and
//! read back the resulting intervals or a minimum.

pub mod error;
pub mod interval;
pub mod layer;
pub mod pipeline;

// Re-export main types
pub use error::RemapError;
pub use interval::{Interval, Split};
pub use layer::{Layer, Rule};
pub use pipeline::Pipeline;
