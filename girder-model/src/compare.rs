//! Heterogeneous value comparison for sorting
//!
//! List columns carry whatever the endpoint returned: real datetimes,
//! ISO-formatted date strings, numbers as numbers, numbers as strings.
//! [`compare_values`] orders any two field values with an explicit attempt
//! sequence: date-like, then numeric-like, then lowercased string.
//!
//! Dates are tried before numbers on purpose. A year-leading ISO string
//! such as `"2024-01-02"` would otherwise parse its numeric prefix and sort
//! numerically instead of chronologically.

use std::cmp::Ordering;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use serde::Serialize;

use crate::model::Value;

/// Sort direction for ordering rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9, oldest first).
    Asc,
    /// Descending order (Z-A, 9-0, newest first).
    Desc,
}

impl Direction {
    /// Applies the direction to a comparator result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }

    /// Returns the opposite direction.
    pub fn toggle(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }
}

/// Orders two field values; `None` is the absent sentinel from path
/// resolution.
///
/// 1. Both sides date-like: compare millisecond timestamps.
/// 2. Both sides numeric-like: compare as `f64`.
/// 3. Otherwise: compare lowercased display strings (absent and null
///    coerce to the empty string).
///
/// Transitivity across heterogeneous types is not guaranteed beyond these
/// rules; a sort pass uses a single key through this one comparator.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    if let (Some(ta), Some(tb)) = (as_timestamp(a), as_timestamp(b)) {
        return ta.timestamp_millis().cmp(&tb.timestamp_millis());
    }
    if let (Some(na), Some(nb)) = (as_number(a), as_number(b)) {
        return na.total_cmp(&nb);
    }
    display_lower(a).cmp(&display_lower(b))
}

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

fn as_timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::DateTime(dt) => Some(*dt),
        Value::String(s) => parse_timestamp(s),
        _ => None,
    }
}

/// Parses calendar-shaped strings only. The format list is explicit rather
/// than lenient so a plain number can never satisfy the date predicate.
fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt.and_utc());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }
    None
}

fn as_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Int(i) => Some(*i as f64),
        Value::Float(f) => Some(*f),
        Value::Decimal(d) => d.to_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn display_lower(value: Option<&Value>) -> String {
    value
        .map(ToString::to_string)
        .unwrap_or_default()
        .to_lowercase()
}
