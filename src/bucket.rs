//! Even-value bucketizing.
//!
//! Parity uses Rust's truncating remainder: `v % 2 == 0`. Negative even
//! values (`-4`) are even, negative odd values (`-3 % 2 == -1`) are odd.

/// Returns true if `v` is even.
#[inline]
pub fn is_even(v: i64) -> bool {
    v % 2 == 0
}

/// Filter even values into an accumulator.
///
/// When `accumulator` is `None` a fresh `Vec` is created for this call,
/// so no state leaks between calls. A supplied accumulator is consumed,
/// appended to and handed back.
///
/// ```
/// use orderkit::bucketize;
///
/// assert_eq!(bucketize(&[1, 2, 3, 4], None), vec![2, 4]);
/// assert_eq!(bucketize(&[6], None), vec![6]);
/// assert_eq!(bucketize(&[8, 9], Some(vec![0])), vec![0, 8]);
/// ```
pub fn bucketize(values: &[i64], accumulator: Option<Vec<i64>>) -> Vec<i64> {
    let mut bucket = accumulator.unwrap_or_default();
    bucketize_into(values, &mut bucket);
    bucket
}

/// Append the even values of `values` to `bucket`, in input order.
///
/// Existing contents of `bucket` are left in place.
pub fn bucketize_into(values: &[i64], bucket: &mut Vec<i64>) {
    bucket.extend(values.iter().copied().filter(|&v| is_even(v)));
}
