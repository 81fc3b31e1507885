//! Core interval type for integer range representation.

use crate::config::normalize_bounds;
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Errors that can occur when building an interval.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalError {
    #[error("Reversed interval: start ({start}) > end ({end})")]
    Reversed { start: i64, end: i64 },
}

/// An inclusive integer range `(start, end)`.
///
/// The `start <= end` invariant is enforced at construction, so every
/// `Interval` in circulation is well formed. Values are `Copy`; nothing
/// returned by this crate aliases caller memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    start: i64,
    end: i64,
}

impl Interval {
    /// Create a new interval.
    ///
    /// Fails with [`IntervalError::Reversed`] when `start > end`, unless
    /// [`crate::config::set_normalize_reversed`] is enabled, in which case
    /// the endpoints are swapped.
    #[inline]
    pub fn new(start: i64, end: i64) -> Result<Self, IntervalError> {
        let (start, end) = normalize_bounds(start, end);
        if start > end {
            return Err(IntervalError::Reversed { start, end });
        }
        Ok(Self { start, end })
    }

    #[inline]
    pub fn start(&self) -> i64 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> i64 {
        self.end
    }

    /// Returns `end - start` as an unsigned distance.
    ///
    /// Bounds are inclusive, so `(7, 7)` has width 0 yet covers one point.
    #[inline]
    pub fn width(&self) -> u64 {
        self.end.abs_diff(self.start)
    }

    /// Returns true if the interval covers exactly one point.
    #[inline]
    pub fn is_point(&self) -> bool {
        self.start == self.end
    }

    /// Check if this interval overlaps or touches another.
    ///
    /// Touching endpoints (`a.end == b.start`) count.
    #[inline]
    pub fn overlaps_or_touches(&self, other: &Interval) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Smallest interval covering both.
    #[inline]
    pub fn union(&self, other: &Interval) -> Interval {
        Interval {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Extend the end of this interval, never shrinking it.
    #[inline]
    pub(crate) fn extend_to(&mut self, end: i64) {
        self.end = self.end.max(end);
    }
}

impl TryFrom<(i64, i64)> for Interval {
    type Error = IntervalError;

    fn try_from((start, end): (i64, i64)) -> Result<Self, Self::Error> {
        Interval::new(start, end)
    }
}

impl From<Interval> for (i64, i64) {
    fn from(iv: Interval) -> Self {
        (iv.start, iv.end)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.start, self.end)
    }
}

impl Ord for Interval {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start.cmp(&other.start).then(self.end.cmp(&other.end))
    }
}

impl PartialOrd for Interval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Build intervals from raw pairs, failing on the first reversed pair.
pub fn from_pairs(pairs: &[(i64, i64)]) -> Result<Vec<Interval>, IntervalError> {
    pairs.iter().map(|&pair| Interval::try_from(pair)).collect()
}
