//! Date parsing and the day axis used by the predictor.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::{EngineError, ResultEngine};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a transaction date.
///
/// Accepts RFC 3339 timestamps (converted to UTC), naive ISO date-times and
/// plain `YYYY-MM-DD` dates, which are taken at midnight.
///
/// ```rust
/// use engine::parse_date;
///
/// let a = parse_date("2025-08-20T02:48:00.000Z").unwrap();
/// let b = parse_date("2025-08-20T09:48:00+07:00").unwrap();
/// assert_eq!(a, b);
/// assert!(parse_date("yesterday").is_err());
/// ```
pub fn parse_date(value: &str) -> ResultEngine<NaiveDateTime> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_utc());
    }
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN));
    }

    Err(EngineError::InvalidDate(format!(
        "unable to parse \"{value}\" as a date"
    )))
}

/// Whole days elapsed from `baseline` to `date`, truncated.
pub(crate) fn elapsed_days(baseline: NaiveDateTime, date: NaiveDateTime) -> i64 {
    (date - baseline).num_days()
}
