//! Merge command implementation.
//!
//! Uses O(n log n) sort + O(n) single-pass sweep-line merge.

use crate::interval::Interval;
use crate::parallel::sort_intervals;
use log::trace;

/// Merge command configuration.
#[derive(Debug, Clone, Default)]
pub struct MergeCommand {
    /// Maximum gap between intervals to merge (default: 0, touching merges)
    pub distance: u64,
}

impl MergeCommand {
    pub fn new() -> Self {
        Self { distance: 0 }
    }

    /// Set the maximum merge distance.
    pub fn with_distance(mut self, d: u64) -> Self {
        self.distance = d;
        self
    }

    /// Merge intervals, returning merged intervals sorted by start.
    ///
    /// The input slice is never reordered; a sorted copy is swept instead.
    pub fn merge(&self, intervals: &[Interval]) -> Vec<Interval> {
        if intervals.is_empty() {
            return Vec::new();
        }

        let mut sorted = intervals.to_vec();
        sort_intervals(&mut sorted);
        self.merge_sorted(&sorted)
    }

    /// Merge intervals already sorted by `(start, end)`.
    fn merge_sorted(&self, intervals: &[Interval]) -> Vec<Interval> {
        debug_assert!(intervals.windows(2).all(|w| w[0] <= w[1]));
        let Some((&first, rest)) = intervals.split_first() else {
            return Vec::new();
        };

        let mut result = Vec::new();
        let mut current = first;

        for interval in rest {
            if self.should_merge(&current, interval) {
                current.extend_to(interval.end());
            } else {
                trace!("closing merge run {}", current);
                result.push(current);
                current = *interval;
            }
        }

        result.push(current);
        result
    }

    /// Check if `next` continues the run `current`.
    ///
    /// `next` must not sort before `current`.
    #[inline]
    fn should_merge(&self, current: &Interval, next: &Interval) -> bool {
        let reach = current.end().saturating_add_unsigned(self.distance);
        next.start() <= reach
    }
}

/// Merge overlapping or touching intervals.
///
/// ```
/// use orderkit::merge_intervals;
///
/// let input = orderkit::interval::from_pairs(&[(1, 3), (2, 4), (6, 7), (7, 9)]).unwrap();
/// let merged: Vec<(i64, i64)> = merge_intervals(&input).into_iter().map(Into::into).collect();
/// assert_eq!(merged, vec![(1, 4), (6, 9)]);
/// ```
pub fn merge_intervals(intervals: &[Interval]) -> Vec<Interval> {
    MergeCommand::new().merge(intervals)
}
