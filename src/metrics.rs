//! Order KPIs: deduplication, GMV rollups and cancellation rates.
//!
//! Every function here is a pure transform over in-memory orders. Keyed
//! outputs use `BTreeMap` so iteration order is deterministic.

use crate::order::{Order, Status};
use chrono::{Datelike, NaiveDate};
use rustc_hash::FxHashMap;
use std::collections::{BTreeMap, VecDeque};
use std::fmt;

/// Number of day entries covered by the rolling GMV window.
pub const ROLLING_WINDOW_DAYS: usize = 7;

/// ISO 8601 week identifier, displayed as `YYYY-Www`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IsoWeekKey {
    pub year: i32,
    pub week: u32,
}

impl fmt::Display for IsoWeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

/// Keep only the latest record per `(order_id, item_id)` by timestamp.
///
/// On a timestamp tie the record seen first wins. Output is sorted by
/// `(order_id, item_id, timestamp)`.
///
/// O(n) grouping with O(u) memory, u = unique keys, plus the final sort.
pub fn deduplicate_latest<I>(orders: I) -> Vec<Order>
where
    I: IntoIterator<Item = Order>,
{
    let mut store: FxHashMap<(String, String), Order> = FxHashMap::default();

    for order in orders {
        let key = (order.order_id.clone(), order.item_id.clone());
        match store.get_mut(&key) {
            Some(existing) => {
                if order.timestamp > existing.timestamp {
                    *existing = order;
                }
            }
            None => {
                store.insert(key, order);
            }
        }
    }

    let mut result: Vec<Order> = store.into_values().collect();
    result.sort_by(|a, b| {
        a.order_id
            .cmp(&b.order_id)
            .then_with(|| a.item_id.cmp(&b.item_id))
            .then(a.timestamp.cmp(&b.timestamp))
    });
    result
}

/// GMV per UTC calendar day: `sum(qty * price)`.
pub fn daily_gmv(orders: &[Order]) -> BTreeMap<NaiveDate, f64> {
    let mut totals = BTreeMap::new();
    for order in orders {
        *totals.entry(order.timestamp.date_naive()).or_insert(0.0) += order.gmv();
    }
    totals
}

/// Rolling GMV over the last [`ROLLING_WINDOW_DAYS`] day entries.
///
/// The window slides over the days present in `daily`, not over calendar
/// days: a gap in the data does not shorten the window.
pub fn rolling_7d_gmv(daily: &BTreeMap<NaiveDate, f64>) -> BTreeMap<NaiveDate, f64> {
    let mut window: VecDeque<f64> = VecDeque::with_capacity(ROLLING_WINDOW_DAYS + 1);
    let mut result = BTreeMap::new();

    for (&day, &value) in daily {
        window.push_back(value);
        if window.len() > ROLLING_WINDOW_DAYS {
            window.pop_front();
        }
        // Re-summing a bounded window avoids drift from add/subtract.
        result.insert(day, window.iter().sum());
    }

    result
}

/// Top `n` item ids by GMV.
///
/// Ranked by descending GMV, ties broken by ascending item id.
pub fn top_n_items_by_gmv(orders: &[Order], n: usize) -> Vec<(String, f64)> {
    let mut totals: FxHashMap<&str, f64> = FxHashMap::default();
    for order in orders {
        *totals.entry(order.item_id.as_str()).or_insert(0.0) += order.gmv();
    }

    let mut ranked: Vec<(String, f64)> = totals
        .into_iter()
        .map(|(item, gmv)| (item.to_string(), gmv))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}

/// Cancelled over total orders, per ISO week.
pub fn weekly_cancellation_rate(orders: &[Order]) -> BTreeMap<IsoWeekKey, f64> {
    let mut counts: BTreeMap<IsoWeekKey, (u64, u64)> = BTreeMap::new();

    for order in orders {
        let iso = order.timestamp.iso_week();
        let key = IsoWeekKey {
            year: iso.year(),
            week: iso.week(),
        };
        let (total, cancelled) = counts.entry(key).or_insert((0, 0));
        *total += 1;
        if order.status == Status::Cancelled {
            *cancelled += 1;
        }
    }

    counts
        .into_iter()
        .map(|(key, (total, cancelled))| (key, cancelled as f64 / total as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::parse_line;

    fn order(line: &str) -> Order {
        parse_line(line).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_dedup_keeps_latest() {
        let orders = vec![
            order("o1,2025-03-02T12:00:00Z,c1,i1,1,15.0,USD,SHIPPED"),
            order("o1,2025-03-01T12:00:00Z,c1,i1,2,10.0,USD,PLACED"),
            order("o1,2025-03-01T12:00:00Z,c1,i2,1,5.0,USD,PLACED"),
        ];

        let dedup = deduplicate_latest(orders);

        assert_eq!(dedup.len(), 2);
        assert_eq!(dedup[0].item_id, "i1");
        assert_eq!(dedup[0].status, Status::Shipped);
        assert_eq!(dedup[1].item_id, "i2");
    }

    #[test]
    fn test_dedup_tie_keeps_first() {
        let orders = vec![
            order("o1,2025-03-01T12:00:00Z,c1,i1,1,1.0,USD,PLACED"),
            order("o1,2025-03-01T12:00:00Z,c9,i1,1,1.0,USD,CANCELLED"),
        ];

        let dedup = deduplicate_latest(orders);

        assert_eq!(dedup.len(), 1);
        assert_eq!(dedup[0].customer_id, "c1");
    }

    #[test]
    fn test_daily_gmv() {
        let orders = vec![
            order("o1,2025-03-01T01:00:00Z,c1,i1,2,10.0,USD,PLACED"),
            order("o2,2025-03-01T23:00:00Z,c1,i2,1,5.0,USD,PLACED"),
            order("o3,2025-03-02T00:30:00+01:00,c1,i2,1,7.0,USD,PLACED"), // 2025-03-01 in UTC
            order("o4,2025-03-02T08:00:00Z,c1,i2,3,1.0,USD,PLACED"),
        ];

        let daily = daily_gmv(&orders);

        assert_eq!(daily.len(), 2);
        assert_eq!(daily[&day(2025, 3, 1)], 32.0);
        assert_eq!(daily[&day(2025, 3, 2)], 3.0);
    }

    #[test]
    fn test_rolling_window() {
        let daily: BTreeMap<NaiveDate, f64> = (1..=9).map(|d| (day(2025, 3, d), 1.0)).collect();

        let rolling = rolling_7d_gmv(&daily);

        assert_eq!(rolling[&day(2025, 3, 1)], 1.0);
        assert_eq!(rolling[&day(2025, 3, 7)], 7.0);
        assert_eq!(rolling[&day(2025, 3, 9)], 7.0);
    }

    #[test]
    fn test_rolling_window_counts_entries_not_calendar_days() {
        let mut daily = BTreeMap::new();
        daily.insert(day(2025, 1, 1), 5.0);
        daily.insert(day(2025, 2, 1), 2.0);

        let rolling = rolling_7d_gmv(&daily);

        assert_eq!(rolling[&day(2025, 2, 1)], 7.0);
    }

    #[test]
    fn test_top_n_ordering() {
        let orders = vec![
            order("o1,1709251200,c1,b,1,10.0,USD,PLACED"),
            order("o2,1709251200,c1,a,2,5.0,USD,PLACED"),
            order("o3,1709251200,c1,c,1,30.0,USD,PLACED"),
            order("o4,1709251200,c1,d,1,1.0,USD,PLACED"),
        ];

        let top = top_n_items_by_gmv(&orders, 3);

        assert_eq!(
            top,
            vec![
                ("c".to_string(), 30.0),
                ("a".to_string(), 10.0), // Tie with b, a sorts first
                ("b".to_string(), 10.0),
            ]
        );
        assert!(top_n_items_by_gmv(&orders, 0).is_empty());
    }

    #[test]
    fn test_weekly_cancellation_rate() {
        let orders = vec![
            order("o1,2025-02-24T12:00:00Z,c1,i1,1,1.0,USD,CANCELLED"),
            order("o2,2025-02-25T12:00:00Z,c1,i1,1,1.0,USD,PLACED"),
            order("o3,2025-03-03T12:00:00Z,c1,i1,1,1.0,USD,SHIPPED"),
        ];

        let rates = weekly_cancellation_rate(&orders);
        let rendered: Vec<(String, f64)> =
            rates.iter().map(|(k, v)| (k.to_string(), *v)).collect();

        assert_eq!(
            rendered,
            vec![("2025-W09".to_string(), 0.5), ("2025-W10".to_string(), 0.0)]
        );
    }

    #[test]
    fn test_iso_week_year_boundary() {
        // 2024-12-30 belongs to ISO week 1 of 2025.
        let orders = vec![order("o1,2024-12-30T00:00:00Z,c1,i1,1,1.0,USD,PLACED")];

        let rates = weekly_cancellation_rate(&orders);

        assert_eq!(
            rates.keys().next().copied(),
            Some(IsoWeekKey { year: 2025, week: 1 })
        );
    }
}
