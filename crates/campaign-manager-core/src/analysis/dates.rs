//! Ad set flight dates

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use crate::constants::MILLIS_PER_DAY;

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];
const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y"];

/// Read a date field. Strings may be RFC 3339, a numeric or long-form date,
/// or a date and time without zone (taken as UTC); numbers are epoch
/// milliseconds.
pub fn parse_date(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        Value::String(s) => parse_date_str(s.trim()),
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// Fractional days from `start` to `end`, when both parse and `end` is
/// strictly later; `None` otherwise
pub fn span_days(start: Option<&Value>, end: Option<&Value>) -> Option<f64> {
    let (start, end) = (parse_date(start)?, parse_date(end)?);
    (end > start).then(|| (end - start).num_milliseconds() as f64 / MILLIS_PER_DAY)
}
