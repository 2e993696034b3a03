//! Parsers for the free-form date, clock-time and duration strings carried on
//! journal records.
//!
//! Every parser returns a `Result`, so callers decide explicitly what to do with
//! an invalid value instead of letting a `NaN` leak into a chart.

use crate::error::AnalyticsError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::time::Duration;

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];
const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];
// 12-hour formats first: "2:30:00" is a valid 24-hour time too, but "2:30:00 PM" is not.
const TIME_FORMATS: [&str; 4] = ["%I:%M:%S %p", "%I:%M %p", "%H:%M:%S", "%H:%M"];

/// Parses a record date.
///
/// Accepts ISO dates (`2025-03-14`), ISO date-times (the date part is used) and
/// US style dates (`3/14/2025`).
pub fn parse_date(raw: &str) -> Result<NaiveDate, AnalyticsError> {
    let s = raw.trim();

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Ok(date);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt.date());
        }
    }

    Err(AnalyticsError::InvalidDate(raw.to_string()))
}

/// Parses a wall-clock entry time into a fractional hour in `[0, 24)`.
///
/// Both `h:mm:ss AM/PM` (case-insensitive) and `HH:mm:ss` are understood;
/// seconds may be omitted. `"2:30:00 PM"` yields `14.5`.
pub fn parse_time_of_day(raw: &str) -> Result<f64, AnalyticsError> {
    let normalized = raw.trim().to_ascii_uppercase();
    if normalized.is_empty() {
        return Err(AnalyticsError::InvalidTime(raw.to_string()));
    }

    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(&normalized, format).ok())
        .map(|t| t.hour() as f64 + t.minute() as f64 / 60.0 + t.second() as f64 / 3600.0)
        .ok_or_else(|| AnalyticsError::InvalidTime(raw.to_string()))
}

/// Parses an elapsed time in `H:MM:SS` form. Hours are unbounded; minutes and
/// seconds must be below 60.
pub fn parse_duration(raw: &str) -> Result<Duration, AnalyticsError> {
    let invalid = || AnalyticsError::InvalidDuration(raw.to_string());

    let parts: Vec<&str> = raw.trim().split(':').collect();
    let [hours, minutes, seconds] = parts.as_slice() else {
        return Err(invalid());
    };

    let field = |s: &str| -> Option<u64> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        s.parse().ok()
    };

    let h = field(*hours).ok_or_else(invalid)?;
    let m = field(*minutes).filter(|m| *m < 60).ok_or_else(invalid)?;
    let s = field(*seconds).filter(|s| *s < 60).ok_or_else(invalid)?;

    let total = h
        .checked_mul(3600)
        .and_then(|secs| secs.checked_add(m * 60 + s))
        .ok_or_else(invalid)?;
    Ok(Duration::from_secs(total))
}

/// Parses an `H:MM:SS` duration into total minutes. `"1:15:30"` yields `75.5`.
pub fn parse_duration_minutes(raw: &str) -> Result<f64, AnalyticsError> {
    parse_duration(raw).map(|d| d.as_secs_f64() / 60.0)
}
