//! Date/time utilities for Blogun.
//!
//! Timestamps are stored as UTC text in SQLite's `datetime('now')` format
//! (`YYYY-MM-DD HH:MM:SS`). These helpers convert between that storage
//! format and the representations used in API payloads and rendered pages.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Storage format for timestamps (UTC, matches SQLite `datetime('now')`).
pub const STORAGE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Short date display format.
pub const DATE_FORMAT: &str = "%Y/%m/%d";

/// Long datetime display format.
pub const DATETIME_FORMAT: &str = "%Y/%m/%d %H:%M";

/// Current UTC time in storage format.
pub fn now_storage() -> String {
    Utc::now().format(STORAGE_FORMAT).to_string()
}

/// Parse a storage-format timestamp into a UTC datetime.
pub fn parse_storage(datetime_str: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(datetime_str, STORAGE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Convert a storage-format timestamp to RFC3339 for API responses.
///
/// The database stores times in UTC, so this appends 'Z' to mark UTC.
/// Returns the original string unchanged if it does not parse.
pub fn to_rfc3339(datetime_str: &str) -> String {
    match parse_storage(datetime_str) {
        Some(_) => format!("{}Z", datetime_str.replace(' ', "T")),
        None => datetime_str.to_string(),
    }
}

/// Format a storage-format timestamp as a short date.
///
/// Returns the original string if parsing fails.
pub fn format_date(datetime_str: &str) -> String {
    match parse_storage(datetime_str) {
        Some(dt) => dt.format(DATE_FORMAT).to_string(),
        None => datetime_str.to_string(),
    }
}

/// Format a storage-format timestamp as a long datetime.
///
/// Returns the original string if parsing fails.
pub fn format_datetime(datetime_str: &str) -> String {
    match parse_storage(datetime_str) {
        Some(dt) => dt.format(DATETIME_FORMAT).to_string(),
        None => datetime_str.to_string(),
    }
}
