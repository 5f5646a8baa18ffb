//! Date/time display helpers for the client.
//!
//! The server stores timestamps as UTC text (`YYYY-MM-DD HH:MM:SS`); the
//! health endpoint and older data may carry RFC 3339. Both are accepted.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Format used for snippet and comment dates.
pub const DATE_FORMAT: &str = "%b %-d, %Y";

/// Format used for full timestamps.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parse a stored timestamp into UTC.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` (assumed UTC) and a bare
/// `YYYY-MM-DD` date (midnight UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Format a stored timestamp in the given timezone.
///
/// Returns the input unchanged if it cannot be parsed. An unknown timezone
/// falls back to UTC.
pub fn format_in_timezone(value: &str, timezone: &str, format: &str) -> String {
    let Some(utc) = parse_timestamp(value) else {
        return value.to_string();
    };
    match timezone.parse::<Tz>() {
        Ok(tz) => utc.with_timezone(&tz).format(format).to_string(),
        Err(_) => utc.format(format).to_string(),
    }
}

/// Format a stored timestamp as a short date, e.g. `Nov 15, 2024`.
pub fn format_date(value: &str, timezone: &str) -> String {
    format_in_timezone(value, timezone, DATE_FORMAT)
}

/// Format a stored timestamp as date and time.
pub fn format_datetime(value: &str, timezone: &str) -> String {
    format_in_timezone(value, timezone, DATETIME_FORMAT)
}
