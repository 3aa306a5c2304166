use chrono::{Datelike, NaiveDate};
use fraudwatch::utils::datetime;
use fraudwatch::utils::format;
use serde_json::json;

#[test]
fn test_parse_and_format_date() {
    let date = datetime::parse_date("2025-01-15").unwrap();
    assert_eq!((date.year(), date.month(), date.day()), (2025, 1, 15));
    assert_eq!(datetime::format_ymd(date), "2025-01-15");
    assert!(datetime::parse_date("15/01/2025").is_err());
}

#[test]
fn test_parse_timestamp_shapes() {
    for value in [
        "2025-01-15T14:30:00Z",
        "2025-01-15T14:30:00+01:00",
        "2025-01-15T14:30:00",
        "2025-01-15 14:30:00.123",
        "2025-01-15",
    ] {
        assert!(datetime::parse_timestamp(value).is_some(), "failed to parse {value}");
    }
    assert!(datetime::parse_timestamp("yesterday").is_none());
}

#[test]
fn test_unparseable_timestamp_is_shown_as_is() {
    assert_eq!(datetime::format_display_datetime("pending"), "pending");
    assert_eq!(datetime::format_display_date("pending"), "pending");
}

#[test]
fn test_display_datetime_shape() {
    let shown = datetime::format_display_datetime("2025-06-01T12:00:00Z");
    assert_eq!(shown.len(), "2025-06-01 12:00:00".len());
    assert!(NaiveDate::parse_from_str(&shown[..10], datetime::ISO_DATE_FORMAT).is_ok());
}

#[test]
fn test_now_iso_is_rfc3339() {
    let now = datetime::now_iso();
    assert!(now.ends_with('Z'));
    assert!(chrono::DateTime::parse_from_rfc3339(&now).is_ok());
}

#[test]
fn test_number_helpers() {
    assert_eq!(format::group_thousands(1200.0), "1,200");
    assert_eq!(format::group_thousands(-0.0004), "0");
    assert_eq!(format::as_number(&json!(" 42.5 ")), Some(42.5));
    assert_eq!(format::as_number(&json!(true)), None);
    assert_eq!(format::format_amount(&json!(1234567), "MAD"), "1,234,567 MAD");
    assert_eq!(format::format_amount(&json!("n/a"), "MAD"), "n/a MAD");
}
