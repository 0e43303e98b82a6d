//! Half-open integer intervals.
//!
//! An [`Interval`] is the leaf value type of the engine: a contiguous run of
//! integers `[start, start + length)`. Intervals are immutable once built;
//! splitting produces new intervals rather than mutating in place.

use serde::{Deserialize, Serialize};

use crate::error::RemapError;

/// A half-open range of integers `[start, start + length)`.
///
/// `length` is always non-negative; the constructor rejects negative lengths
/// with [`RemapError::InvalidInterval`] instead of clamping. Deserialization
/// goes through the same check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct Interval {
    start: i64,
    length: i64,
}

/// Wire form of an interval, validated on the way in.
#[derive(Debug, Deserialize)]
struct RawInterval {
    start: i64,
    length: i64,
}

impl TryFrom<RawInterval> for Interval {
    type Error = RemapError;

    fn try_from(raw: RawInterval) -> Result<Self, Self::Error> {
        Interval::new(raw.start, raw.length)
    }
}

impl Interval {
    /// Create an interval, rejecting negative lengths.
    pub fn new(start: i64, length: i64) -> Result<Self, RemapError> {
        if length < 0 {
            return Err(RemapError::InvalidInterval { start, length });
        }
        Ok(Self { start, length })
    }

    /// Build without validation, for lengths already known non-negative.
    pub(crate) fn new_unchecked(start: i64, length: i64) -> Self {
        debug_assert!(length >= 0);
        Self { start, length }
    }

    /// A single value as a length-1 interval.
    pub fn point(value: i64) -> Self {
        Self {
            start: value,
            length: 1,
        }
    }

    /// Inclusive start.
    pub fn start(&self) -> i64 {
        self.start
    }

    /// Number of values covered.
    pub fn length(&self) -> i64 {
        self.length
    }

    /// Exclusive end.
    pub fn end(&self) -> i64 {
        self.start + self.length
    }

    /// True if the interval covers no values.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// True if `value` falls inside the interval.
    pub fn contains(&self, value: i64) -> bool {
        self.start <= value && value < self.end()
    }

    /// True if the two intervals share at least one value.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end() && other.start < self.end()
    }

    /// The overlapping sub-interval, or `None` when disjoint.
    pub fn intersect(&self, other: &Interval) -> Option<Interval> {
        let start = self.start.max(other.start);
        let end = self.end().min(other.end());
        if start < end {
            Some(Interval {
                start,
                length: end - start,
            })
        } else {
            None
        }
    }

    /// Shift the whole interval by `offset`, keeping its length.
    pub fn translate(&self, offset: i64) -> Interval {
        Interval {
            start: self.start + offset,
            length: self.length,
        }
    }

    /// Partition against `domain` into the piece strictly before it, the
    /// overlapping piece, and the piece strictly after it.
    ///
    /// Every overlap shape (containment, partial left, partial right,
    /// straddling, disjoint) reduces to these three outcomes. Zero-length
    /// pieces come back as `None`, never as degenerate intervals.
    pub fn split_by(&self, domain: &Interval) -> Split {
        let before_end = self.end().min(domain.start);
        let before = (self.start < before_end).then(|| Interval {
            start: self.start,
            length: before_end - self.start,
        });

        let after_start = self.start.max(domain.end());
        let after = (after_start < self.end()).then(|| Interval {
            start: after_start,
            length: self.end() - after_start,
        });

        Split {
            before,
            overlap: self.intersect(domain),
            after,
        }
    }
}

/// Outcome of splitting one interval against a rule's source domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Split {
    /// Piece strictly before the domain, if any.
    pub before: Option<Interval>,
    /// Intersection with the domain, if any.
    pub overlap: Option<Interval>,
    /// Piece strictly after the domain, if any.
    pub after: Option<Interval>,
}
