//! Global configuration for orderkit runtime behavior.
//!
//! This module provides thread-safe global configuration that affects
//! interval construction without threading a flag through every call.

use std::sync::atomic::{AtomicBool, Ordering};

/// Global flag for reversed interval handling.
///
/// When enabled, an interval built from `start > end` has its endpoints
/// swapped. When disabled (the default), such an interval is rejected.
///
/// This is set once at startup and read on every interval construction.
static NORMALIZE_REVERSED: AtomicBool = AtomicBool::new(false);

/// Enable or disable normalization of reversed intervals.
///
/// # Example
///
/// ```
/// use orderkit::config;
/// use orderkit::Interval;
///
/// config::set_normalize_reversed(true);
/// let iv = Interval::new(9, 3).unwrap();
/// assert_eq!((iv.start(), iv.end()), (3, 9));
/// config::set_normalize_reversed(false);
/// ```
#[inline]
pub fn set_normalize_reversed(enabled: bool) {
    NORMALIZE_REVERSED.store(enabled, Ordering::Release);
}

/// Check if reversed intervals are normalized instead of rejected.
#[inline]
pub fn is_normalize_reversed() -> bool {
    NORMALIZE_REVERSED.load(Ordering::Acquire)
}

/// Normalize interval bounds according to the current mode.
///
/// Returns the bounds in ascending order when normalization is enabled,
/// otherwise returns them untouched.
#[inline]
pub fn normalize_bounds(start: i64, end: i64) -> (i64, i64) {
    if is_normalize_reversed() && start > end {
        (end, start)
    } else {
        (start, end)
    }
}
