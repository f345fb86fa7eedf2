//! Snapshot date helpers
//!
//! Altos publishes one rental file per week, dated on the Friday it was
//! released. These helpers turn loosely formatted user input into that date.

use crate::altos::error::{AltosError, Result};
use chrono::{
    DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Weekday,
};

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y%m%d",
    "%m/%d/%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Most recent Friday strictly before `start`'s calendar date.
///
/// A Friday maps to the Friday one week earlier.
pub fn last_friday_before<Tz: TimeZone>(start: &DateTime<Tz>) -> NaiveDate {
    let date = start.date_naive();
    let since_friday = (date.weekday().num_days_from_monday() + 7
        - Weekday::Fri.num_days_from_monday())
        % 7;
    let days_back = if since_friday == 0 { 7 } else { since_friday };
    date - chrono::Duration::days(i64::from(days_back))
}

/// `YYYY-MM-DD` of the last Friday before `start`, or before now (local time).
///
/// Any zone converts with `DateTime::fixed_offset`.
pub fn date_of_last_friday(start: Option<DateTime<FixedOffset>>) -> String {
    let start = start.unwrap_or_else(|| Local::now().fixed_offset());
    last_friday_before(&start).format("%Y-%m-%d").to_string()
}

/// Parse a calendar date from any reasonably common notation.
///
/// Timestamps carrying an offset keep the date as seen in that offset.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Ok(dt.date_naive());
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
                .map(|dt| dt.date())
        })
        .ok_or_else(|| AltosError::InvalidInput(format!("unrecognized date: {:?}", input)))
}

/// Normalize a date string to `YYYY-MM-DD`
pub fn normalize_date(input: &str) -> Result<String> {
    Ok(parse_date(input)?.format("%Y-%m-%d").to_string())
}
