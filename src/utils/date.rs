//! Date parsing and display formatting.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Format a date as `<Mon> <D>, <YYYY>` (e.g. `Jan 15, 2024`).
///
/// The instant is interpreted in UTC, so the rendered day never drifts with
/// the host timezone.
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Parse a frontmatter date value into a UTC instant.
///
/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates (interpreted as
/// midnight UTC). Returns `None` for anything else.
pub fn parse_date_value(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_fixed_pattern() {
        // Late-evening UTC instant must stay on the 15th regardless of the
        // host timezone.
        let date = parse_date_value("2024-01-15T23:00:00Z").unwrap();
        assert_eq!(format_date(date), "Jan 15, 2024");
    }

    #[test]
    fn test_format_date_single_digit_day() {
        let date = parse_date_value("2023-09-05").unwrap();
        assert_eq!(format_date(date), "Sep 5, 2023");
    }

    #[test]
    fn test_parse_date_value_ymd() {
        let date = parse_date_value("2024-01-15").unwrap();
        assert_eq!(date.timestamp(), 1_705_276_800);
    }

    #[test]
    fn test_parse_date_value_rfc3339_offset() {
        // +02:00 offset converts back to UTC
        let date = parse_date_value("2024-01-15T01:00:00+02:00").unwrap();
        assert_eq!(format_date(date), "Jan 14, 2024");
    }

    #[test]
    fn test_parse_date_value_invalid() {
        assert!(parse_date_value("someday").is_none());
        assert!(parse_date_value("2024-13-40").is_none());
        assert!(parse_date_value("").is_none());
    }
}
