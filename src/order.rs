//! Order records and CSV-like line parsing.
//!
//! Expected columns:
//! `order_id,timestamp,customer_id,item_id,qty,price,currency,status,coupon_code?`

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use memchr::memchr_iter;
use std::fmt;
use thiserror::Error;

/// Minimum number of comma-separated fields in an order line.
pub const MIN_FIELDS: usize = 8;

/// Errors that can occur during order parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// The line could not be split into fields or a field could not be read.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A field was readable but violates a domain constraint.
    #[error("Validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, OrderError>;

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Status {
    Placed,
    Shipped,
    Cancelled,
}

impl Status {
    /// Parse the upper-case textual form. Matching is exact.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PLACED" => Some(Status::Placed),
            "SHIPPED" => Some(Status::Shipped),
            "CANCELLED" => Some(Status::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Placed => "PLACED",
            Status::Shipped => "SHIPPED",
            Status::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validated order line.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub order_id: String,
    /// Always UTC.
    pub timestamp: DateTime<Utc>,
    pub customer_id: String,
    pub item_id: String,
    /// Strictly positive.
    pub qty: u32,
    /// Finite and non-negative.
    pub price: f64,
    pub currency: String,
    pub status: Status,
    pub coupon_code: Option<String>,
}

impl Order {
    /// Gross merchandise value of this line: `qty * price`.
    #[inline]
    pub fn gmv(&self) -> f64 {
        f64::from(self.qty) * self.price
    }
}

/// Offset-less date-time layouts, taken as UTC.
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Date-time layouts with an explicit offset, beyond RFC 3339.
const OFFSET_DATETIME_FORMATS: [&str; 1] = ["%Y-%m-%d %H:%M:%S%.f%:z"];

/// Convert epoch seconds or an ISO 8601 timestamp to UTC.
///
/// Accepted forms:
/// - `1709251200` (epoch seconds)
/// - `2025-03-01T12:00:00Z`
/// - `2025-03-01T12:00:00+02:00` or `2025-03-01 12:00:00+02:00`
/// - `2025-03-01T12:00:00` or `2025-03-01 12:00:00` (no offset, taken as UTC)
/// - `2025-03-01` (midnight UTC)
pub fn parse_timestamp(ts: &str) -> Result<DateTime<Utc>> {
    let ts = ts.trim();
    let unrecognized = || OrderError::Parse(format!("Unrecognized timestamp: '{}'", ts));

    if !ts.is_empty() && ts.bytes().all(|b| b.is_ascii_digit()) {
        let secs: i64 = ts.parse().map_err(|_| unrecognized())?;
        return DateTime::<Utc>::from_timestamp(secs, 0).ok_or_else(unrecognized);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Some(dt) = OFFSET_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(ts, fmt).ok())
    {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Some(naive) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(ts, fmt).ok())
    {
        return Ok(naive.and_utc());
    }

    NaiveDate::parse_from_str(ts, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| unrecognized())
}

/// Split a line on commas and trim each field.
fn split_fields(line: &str) -> Vec<&str> {
    let mut fields = Vec::with_capacity(MIN_FIELDS + 1);
    let mut begin = 0;
    for comma in memchr_iter(b',', line.as_bytes()) {
        fields.push(line[begin..comma].trim());
        begin = comma + 1;
    }
    fields.push(line[begin..].trim());
    fields
}

/// Parse a single order line.
pub fn parse_line(line: &str) -> Result<Order> {
    let fields = split_fields(line.trim());

    if fields.len() < MIN_FIELDS {
        return Err(OrderError::Parse(format!(
            "Expected at least {} fields, got {}: '{}'",
            MIN_FIELDS,
            fields.len(),
            line.trim()
        )));
    }

    let qty: i64 = fields[4].parse().map_err(|_| {
        OrderError::Validation(format!("qty must be an integer, got '{}'", fields[4]))
    })?;
    let price: f64 = fields[5].parse().map_err(|_| {
        OrderError::Validation(format!("price must be a number, got '{}'", fields[5]))
    })?;
    let qty = validate_qty(qty)?;
    let price = validate_price(price)?;
    let status = Status::parse(fields[7])
        .ok_or_else(|| OrderError::Validation(format!("Unknown status '{}'", fields[7])))?;
    let timestamp = parse_timestamp(fields[1])?;

    let coupon_code = fields
        .get(8)
        .filter(|c| !c.is_empty())
        .map(|c| c.to_string());

    Ok(Order {
        order_id: fields[0].to_string(),
        timestamp,
        customer_id: fields[2].to_string(),
        item_id: fields[3].to_string(),
        qty,
        price,
        currency: fields[6].to_string(),
        status,
        coupon_code,
    })
}

fn validate_qty(qty: i64) -> Result<u32> {
    if qty <= 0 {
        return Err(OrderError::Validation(format!(
            "qty must be > 0, got {}",
            qty
        )));
    }
    u32::try_from(qty)
        .map_err(|_| OrderError::Validation(format!("qty out of range, got {}", qty)))
}

fn validate_price(price: f64) -> Result<f64> {
    if !price.is_finite() {
        return Err(OrderError::Validation(format!(
            "price must be finite, got {}",
            price
        )));
    }
    if price < 0.0 {
        return Err(OrderError::Validation(format!(
            "price must be >= 0, got {}",
            price
        )));
    }
    Ok(price)
}

/// Lazily parse lines, skipping blank ones.
///
/// Malformed lines yield `Err`; the caller decides whether to stop or
/// keep going.
pub fn parse_lines<'a, I>(lines: I) -> impl Iterator<Item = Result<Order>> + 'a
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: 'a,
{
    lines
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
}
