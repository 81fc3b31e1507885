//! Command implementations for orderkit.

pub mod merge;
pub mod report;

pub use merge::{merge_intervals, MergeCommand};
pub use report::{Report, ReportCommand, ReportCounts};
