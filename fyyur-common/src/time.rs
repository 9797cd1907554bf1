//! Timestamp utilities

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::{Error, Result};

/// Display format for show start times
pub const SHOW_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Naive layouts accepted from the show form, interpreted as UTC
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Parse a submitted show start time
///
/// Accepts RFC 3339 first, then the naive layouts in [`NAIVE_FORMATS`].
pub fn parse_show_time(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
        return Ok(time.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| Error::Validation(format!("unrecognized start time: {:?}", raw)))
}

/// Render a show start time for listings
pub fn format_show_time(time: &DateTime<Utc>) -> String {
    time.format(SHOW_TIME_FORMAT).to_string()
}
