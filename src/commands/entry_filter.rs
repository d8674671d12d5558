use chrono::format::{self, Parsed, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{LogsortError, Result};
use crate::logs::LogRecord;

pub const DEFAULT_TIMESTAMP_FIELD: &str = "@timestamp";

type TimestampParser = fn(&str) -> Option<NaiveDate>;

// ISO 8601 forms, tried in order; the first parser that yields a date wins.
const ISO_PARSERS: &[TimestampParser] = &[
    parse_offset_datetime,
    parse_naive_datetime,
    parse_hour_only,
];

// `%#z` takes `Z`, `+HH`, `+HHMM` and `+HH:MM`.
const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M%#z",
];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

// NaiveDateTime needs a minute, so these only resolve the date part.
const HOUR_ONLY_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H",
    "%Y-%m-%dT%H%#z",
    "%Y-%m-%d %H",
    "%Y-%m-%d %H%#z",
];

/// Parse a `--date` argument. Only the plain `YYYY-MM-DD` form is accepted.
pub fn parse_target_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| LogsortError::InvalidDate(s.to_string()))
}

/// Keep only records whose `timestamp_field` falls on `target`.
///
/// With no target every record passes through unchanged. Records whose
/// timestamp is missing, not a string, or unparseable are dropped silently.
pub fn filter_by_date(
    records: Vec<LogRecord>,
    target: Option<NaiveDate>,
    timestamp_field: &str,
) -> Vec<LogRecord> {
    let Some(target) = target else {
        return records;
    };

    records
        .into_iter()
        .filter(|record| {
            record
                .get(timestamp_field)
                .and_then(|v| v.as_str())
                .and_then(timestamp_date)
                .is_some_and(|date| date == target)
        })
        .collect()
}

/// Resolve a timestamp string to its calendar date, ignoring time-of-day and
/// offset. The date is the one local to the timestamp's own offset.
///
/// ISO 8601 forms must match exactly; anything else falls back to the
/// `YYYY-MM-DD` text before the first space.
pub fn timestamp_date(s: &str) -> Option<NaiveDate> {
    let iso = if is_padded(s) {
        None
    } else {
        ISO_PARSERS.iter().find_map(|parse| parse(s))
    };
    iso.or_else(|| parse_leading_date(s))
}

// chrono skips whitespace ahead of numeric fields.
fn is_padded(s: &str) -> bool {
    s.trim() != s
}

fn parse_offset_datetime(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    OFFSET_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date_naive())
}

fn parse_naive_datetime(s: &str) -> Option<NaiveDate> {
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

fn parse_hour_only(s: &str) -> Option<NaiveDate> {
    HOUR_ONLY_FORMATS.iter().find_map(|fmt| {
        let mut parsed = Parsed::new();
        format::parse(&mut parsed, s, StrftimeItems::new(fmt)).ok()?;
        parsed.to_naive_date().ok()
    })
}

fn parse_leading_date(s: &str) -> Option<NaiveDate> {
    let head = s.split(' ').next().unwrap_or(s);
    if head.is_empty() || is_padded(head) {
        return None;
    }
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}
