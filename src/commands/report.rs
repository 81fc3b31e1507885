//! Report command implementation.
//!
//! Orchestrates lines -> parse -> validate -> deduplicate -> KPIs, entirely
//! in memory.

use crate::metrics::{
    daily_gmv, deduplicate_latest, rolling_7d_gmv, top_n_items_by_gmv, weekly_cancellation_rate,
    IsoWeekKey,
};
use crate::order::Order;
use crate::parallel::parse_order_lines;
use chrono::NaiveDate;
use log::{debug, info};
use std::collections::BTreeMap;

/// Default number of items in the top-N ranking.
pub const DEFAULT_TOP_N: usize = 5;

/// Number of error messages kept in [`Report::errors_sample`].
pub const ERRORS_SAMPLE_LEN: usize = 3;

/// Line and record counts for a report run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportCounts {
    /// Lines supplied, blank lines included.
    pub input_lines: usize,
    pub parsed: usize,
    pub deduplicated: usize,
    pub errors: usize,
}

/// KPIs computed over one batch of order lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub counts: ReportCounts,
    pub daily_gmv: BTreeMap<NaiveDate, f64>,
    pub rolling_7d_gmv: BTreeMap<NaiveDate, f64>,
    pub top_items: Vec<(String, f64)>,
    pub cancel_rate: BTreeMap<IsoWeekKey, f64>,
    /// First few skip messages, in input order.
    pub errors_sample: Vec<String>,
}

/// Report command configuration.
#[derive(Debug, Clone)]
pub struct ReportCommand {
    /// Number of items in the GMV ranking
    pub top_n: usize,
}

impl Default for ReportCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportCommand {
    pub fn new() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
        }
    }

    /// Set the size of the GMV ranking.
    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }

    /// Build a report from raw order lines.
    ///
    /// Malformed lines, blank ones included, are skipped and recorded,
    /// never fatal.
    pub fn build<S>(&self, lines: &[S]) -> Report
    where
        S: AsRef<str> + Sync,
    {
        let mut parsed: Vec<Order> = Vec::new();
        let mut errors: Vec<String> = Vec::new();

        for result in parse_order_lines(lines) {
            match result {
                Ok(order) => parsed.push(order),
                Err(e) => {
                    let msg = format!("skip line due to {}", e);
                    debug!("{}", msg);
                    errors.push(msg);
                }
            }
        }

        let counts_parsed = parsed.len();
        let dedup = deduplicate_latest(parsed);
        let daily = daily_gmv(&dedup);
        let rolling = rolling_7d_gmv(&daily);
        let top_items = top_n_items_by_gmv(&dedup, self.top_n);
        let cancel_rate = weekly_cancellation_rate(&dedup);

        let counts = ReportCounts {
            input_lines: lines.len(),
            parsed: counts_parsed,
            deduplicated: dedup.len(),
            errors: errors.len(),
        };
        info!(
            "report built: {} lines, {} parsed, {} deduplicated, {} errors",
            counts.input_lines, counts.parsed, counts.deduplicated, counts.errors
        );

        errors.truncate(ERRORS_SAMPLE_LEN);

        Report {
            counts,
            daily_gmv: daily,
            rolling_7d_gmv: rolling,
            top_items,
            cancel_rate,
            errors_sample: errors,
        }
    }
}
