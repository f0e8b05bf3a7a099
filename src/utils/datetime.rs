//! Date/time parsing utilities for argbind
//!
//! Values carrying an explicit offset keep it. Values without one are
//! interpreted in the local time zone.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use crate::error::{ArgbindError, Result};

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S %z",
    "%Y-%m-%d %H:%M:%S%:z",
    "%Y-%m-%dT%H:%M:%S%z",
];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a date/time accepting surrounding whitespace.
///
/// Tried in order: RFC 3339, explicit offsets, ISO local date-times, the
/// locale `datetime_formats`, the locale `date_formats` and finally an ISO
/// date. Date-only inputs mean local midnight.
pub fn parse_local_datetime(
    input: &str,
    datetime_formats: &[&str],
    date_formats: &[&str],
) -> Result<DateTime<FixedOffset>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt);
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(input, format) {
            return Ok(dt);
        }
    }

    for format in NAIVE_DATETIME_FORMATS.iter().chain(datetime_formats) {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return localize(naive, input);
        }
    }

    for format in date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            return localize(date.and_time(NaiveTime::MIN), input);
        }
    }

    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")?;
    localize(date.and_time(NaiveTime::MIN), input)
}

fn localize(naive: NaiveDateTime, input: &str) -> Result<DateTime<FixedOffset>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(DateTime::<FixedOffset>::from)
        .ok_or_else(|| {
            ArgbindError::invalid_value(format!(
                "Time \"{}\" does not exist in the local time zone",
                input
            ))
        })
}
