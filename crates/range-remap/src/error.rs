//! Configuration errors for intervals and layers.
//!
//! Both variants are fatal: the engine refuses to run on malformed input
//! rather than clamping or picking an arbitrary rule, since the result
//! would be silently wrong.

use thiserror::Error;

/// A violation of the engine's construction preconditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RemapError {
    /// An interval or rule was given a negative length.
    #[error("invalid interval: negative length {length} at start {start}")]
    InvalidInterval { start: i64, length: i64 },

    /// Two rules in the same layer claim overlapping source domains.
    #[error("invalid layer: rule domains starting at {first} and {second} overlap")]
    InvalidLayer { first: i64, second: i64 },
}
