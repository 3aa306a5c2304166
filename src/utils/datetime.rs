//! Date and time utility functions
//!
//! Backend rows carry timestamps as strings in a handful of shapes (RFC 3339,
//! ISO 8601 without offset, space separated). These helpers turn them into the
//! text shown in grid cells and produce the date stamp used in export file names.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Date format used in export file names and API date filters
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format used when a timestamp is displayed in a grid cell
pub const DISPLAY_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a date string in YYYY-MM-DD format to NaiveDate
pub fn parse_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(date_str, ISO_DATE_FORMAT)
}

/// Format a NaiveDate to YYYY-MM-DD string
pub fn format_ymd(d: NaiveDate) -> String {
    d.format(ISO_DATE_FORMAT).to_string()
}

/// Today's date in UTC, the calendar day an export is stamped with
pub fn export_date() -> NaiveDate {
    Utc::now().date_naive()
}

/// Current instant as an RFC 3339 string with millisecond precision
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Parse a backend timestamp into local time.
///
/// Accepts RFC 3339 (`2025-01-15T14:30:00Z`), ISO 8601 without offset
/// (`2025-01-15T14:30:00`), the space separated variant and a bare date.
/// Values without an offset are taken as UTC, the way the backend emits them.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Local>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local));
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, pattern) {
            return Some(Local.from_utc_datetime(&naive));
        }
    }

    parse_date(value)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Local.from_utc_datetime(&naive))
}

/// Format a backend timestamp as local date and time, or return it unchanged
/// when it cannot be parsed
pub fn format_display_datetime(value: &str) -> String {
    match parse_timestamp(value) {
        Some(dt) => dt.format(DISPLAY_DATETIME_FORMAT).to_string(),
        None => value.to_string(),
    }
}

/// Format a backend timestamp as a local calendar date
pub fn format_display_date(value: &str) -> String {
    match parse_timestamp(value) {
        Some(dt) => dt.format(ISO_DATE_FORMAT).to_string(),
        None => value.to_string(),
    }
}
