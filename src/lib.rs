//! orderkit: order analytics utilities
//!
//! This library provides small, pure transforms over in-memory data.
//!
//! # Features
//!
//! - **Bucketizing**: filter even values into a fresh or caller-owned accumulator
//! - **Interval merging**: sweep-line merge of overlapping and touching ranges
//! - **Order KPIs**: parsing, deduplication, GMV rollups, cancellation rates
//!
//! # Example
//!
//! ```rust
//! use orderkit::{bucketize, interval, merge_intervals};
//!
//! assert_eq!(bucketize(&[1, 2, 3, 4], None), vec![2, 4]);
//!
//! let input = interval::from_pairs(&[(1, 10), (2, 3)]).unwrap();
//! let merged = merge_intervals(&input);
//! assert_eq!((merged[0].start(), merged[0].end()), (1, 10));
//! ```

pub mod bucket;
pub mod commands;
pub mod config;
pub mod interval;
pub mod metrics;
pub mod order;
pub mod output;
pub mod parallel;

// Re-export commonly used types
pub use bucket::{bucketize, bucketize_into};
pub use commands::{merge_intervals, MergeCommand, Report, ReportCommand};
pub use interval::{Interval, IntervalError};
pub use order::{parse_line, Order, OrderError, Status};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bucket::{bucketize, bucketize_into};
    pub use crate::commands::{merge_intervals, MergeCommand, Report, ReportCommand};
    pub use crate::interval::{Interval, IntervalError};
    pub use crate::metrics::{
        daily_gmv, deduplicate_latest, rolling_7d_gmv, top_n_items_by_gmv, weekly_cancellation_rate,
    };
    pub use crate::order::{parse_line, parse_lines, Order, OrderError, Status};
    pub use crate::output::{ReportError, ReportWriter};
}
