//! Date parsing and formatting for post metadata.
//!
//! Post dates are free-form strings in frontmatter. Anything that parses as
//! ISO 8601 (date only, local date-time, or date-time with offset / `Z`) is
//! normalized to UTC; everything else is reported as `None` so callers can
//! degrade gracefully.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Naive date-time layouts accepted after the offset-aware forms fail.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO 8601 date or date-time, treating offset-less values as UTC.
pub fn parse_iso8601(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(dt) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.and_utc());
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Long human-readable form, e.g. `January 15, 2024`.
pub fn to_long_form(dt: &DateTime<Utc>) -> String {
    dt.format("%B %-d, %Y").to_string()
}

/// Format for rss `pubDate` / `lastBuildDate`.
pub fn to_rfc2822(dt: &DateTime<Utc>) -> String {
    dt.to_rfc2822()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike};

    #[test]
    fn test_parse_date_only() {
        let dt = parse_iso8601("2024-01-15").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 1, 15));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (0, 0, 0));
    }

    #[test]
    fn test_parse_trailing_z() {
        let dt = parse_iso8601("2024-06-15T14:30:45Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 6, 15, 14, 30, 45).unwrap());
    }

    #[test]
    fn test_parse_offset_normalized_to_utc() {
        let dt = parse_iso8601("2024-06-15T14:30:45+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 6, 15, 12, 30, 45).unwrap());
    }

    #[test]
    fn test_parse_naive_datetime() {
        let dt = parse_iso8601("2024-06-15T14:30:45").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 6, 15, 14, 30, 45).unwrap());

        let dt = parse_iso8601("2024-06-15T14:30").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 6, 15, 14, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_iso8601("").is_none());
        assert!(parse_iso8601("yesterday").is_none());
        assert!(parse_iso8601("2024-13-01").is_none());
        // Feb 29 in a non-leap year
        assert!(parse_iso8601("2023-02-29").is_none());
        assert!(parse_iso8601("15/01/2024").is_none());
    }

    #[test]
    fn test_to_long_form() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap();
        assert_eq!(to_long_form(&dt), "January 5, 2024");

        let dt = Utc.with_ymd_and_hms(2024, 12, 25, 0, 0, 0).unwrap();
        assert_eq!(to_long_form(&dt), "December 25, 2024");
    }

    #[test]
    fn test_to_rfc2822() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 45).unwrap();
        let rfc2822 = to_rfc2822(&dt);

        assert!(rfc2822.starts_with("Mon, 15 Jan 2024"));
        assert!(rfc2822.contains("10:30:45"));
    }
}
