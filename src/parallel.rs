//! Parallel processing utilities using Rayon.

use crate::interval::Interval;
use crate::order::{parse_line, Order, OrderError};
use rayon::prelude::*;

/// Minimum number of items before enabling parallelization.
/// Below this threshold, sequential processing is faster due to
/// thread spawn overhead.
pub const PARALLEL_THRESHOLD: usize = 10_000;

/// Sort intervals by `(start, end)`, in parallel for large inputs.
///
/// Unstable sort is fine here: the sort key is the whole value, so equal
/// elements are indistinguishable.
pub fn sort_intervals(intervals: &mut [Interval]) {
    if intervals.len() < PARALLEL_THRESHOLD {
        intervals.sort_unstable();
    } else {
        intervals.par_sort_unstable();
    }
}

/// Parse order lines, in parallel for large inputs.
///
/// Every line yields one result; a blank line is a parse error. Results
/// keep input order, so errors can be reported in the order the lines
/// were supplied.
pub fn parse_order_lines<S>(lines: &[S]) -> Vec<Result<Order, OrderError>>
where
    S: AsRef<str> + Sync,
{
    let parse = |line: &S| parse_line(line.as_ref());

    if lines.len() < PARALLEL_THRESHOLD {
        lines.iter().map(parse).collect()
    } else {
        lines.par_iter().map(parse).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_intervals() {
        let mut intervals = vec![
            Interval::new(7, 9).unwrap(),
            Interval::new(1, 3).unwrap(),
            Interval::new(1, 2).unwrap(),
        ];

        sort_intervals(&mut intervals);

        assert_eq!(intervals[0], Interval::new(1, 2).unwrap());
        assert_eq!(intervals[1], Interval::new(1, 3).unwrap());
        assert_eq!(intervals[2], Interval::new(7, 9).unwrap());
    }

    #[test]
    fn test_parallel_sort_matches_sequential() {
        let mut large: Vec<Interval> = (0..PARALLEL_THRESHOLD as i64 + 10)
            .rev()
            .map(|i| Interval::new(i % 97, i % 97 + i % 5).unwrap())
            .collect();
        let mut expected = large.clone();
        expected.sort();

        sort_intervals(&mut large);

        assert_eq!(large, expected);
    }

    #[test]
    fn test_parse_order_lines_blank_is_error() {
        let lines = [
            "o1,2025-03-01T12:00:00Z,c1,i1,2,10.0,USD,PLACED",
            "   ",
            "o2,bad",
        ];

        let parsed = parse_order_lines(&lines);

        assert_eq!(parsed.len(), 3);
        assert!(parsed[0].is_ok());
        assert!(matches!(parsed[1], Err(OrderError::Parse(_))));
        assert!(parsed[2].is_err());
    }

    #[test]
    fn test_parallel_parse_keeps_order() {
        let lines: Vec<String> = (0..PARALLEL_THRESHOLD + 5)
            .map(|i| format!("o{i},1709251200,c1,i1,1,1.0,USD,PLACED"))
            .collect();

        let parsed = parse_order_lines(&lines);

        assert_eq!(parsed.len(), lines.len());
        assert_eq!(parsed[0].as_ref().unwrap().order_id, "o0");
        assert_eq!(
            parsed[PARALLEL_THRESHOLD].as_ref().unwrap().order_id,
            format!("o{PARALLEL_THRESHOLD}")
        );
    }
}
