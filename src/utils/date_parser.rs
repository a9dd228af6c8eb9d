//! Parsing of user-supplied expiry dates.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Date-time layouts without an offset. They are read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Errors returned by [`parse_expires_at`] and [`expires_at_from_millis`].
#[derive(Debug, thiserror::Error)]
pub enum DateParseError {
    #[error("Invalid date '{0}': expected RFC 3339 timestamp, ISO date-time or YYYY-MM-DD")]
    Malformed(String),

    #[error("Timestamp {0} ms is out of range")]
    OutOfRange(i64),
}

/// Parses an expiry date into UTC.
///
/// Accepts, in order:
///
/// - an RFC 3339 timestamp with any offset (converted to UTC)
/// - an ISO date-time without offset, e.g. `2030-01-01T10:00:00` (taken as UTC)
/// - a bare `YYYY-MM-DD` date, which means midnight UTC of that day
///
/// # Examples
///
/// ```ignore
/// let t = parse_expires_at("2026-01-01T03:00:00+03:00").unwrap();
/// assert_eq!(t.to_rfc3339(), "2026-01-01T00:00:00+00:00");
/// ```
pub fn parse_expires_at(input: &str) -> Result<DateTime<Utc>, DateParseError> {
    let trimmed = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
    {
        return Ok(naive.and_utc());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| DateParseError::Malformed(input.to_string()))
}

/// Converts milliseconds since the Unix epoch into UTC.
pub fn expires_at_from_millis(millis: i64) -> Result<DateTime<Utc>, DateParseError> {
    DateTime::from_timestamp_millis(millis).ok_or(DateParseError::OutOfRange(millis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339_utc() {
        let dt = parse_expires_at("2026-01-01T00:00:00.000Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_with_offset_converts_to_utc() {
        let dt = parse_expires_at("2026-01-01T03:00:00+03:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_plain_date() {
        let dt = parse_expires_at("2030-12-31").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2030, 12, 31, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_datetime_without_offset_is_utc() {
        let expected = Utc.with_ymd_and_hms(2030, 1, 1, 10, 0, 0).unwrap();

        assert_eq!(parse_expires_at("2030-01-01T10:00:00").unwrap(), expected);
        assert_eq!(parse_expires_at("2030-01-01 10:00:00").unwrap(), expected);
        assert_eq!(parse_expires_at("2030-01-01T10:00").unwrap(), expected);
        assert_eq!(
            parse_expires_at("2030-01-01T10:00:00.250").unwrap(),
            expected + chrono::Duration::milliseconds(250)
        );
    }

    #[test]
    fn test_parse_malformed() {
        assert!(parse_expires_at("tomorrow").is_err());
        assert!(parse_expires_at("2026-13-01").is_err());
        assert!(parse_expires_at("2030-01-01T25:00:00").is_err());
        assert!(parse_expires_at("").is_err());
    }

    #[test]
    fn test_from_millis() {
        assert_eq!(
            expires_at_from_millis(1_893_456_000_000).unwrap(),
            Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(expires_at_from_millis(0).unwrap(), DateTime::UNIX_EPOCH);
        assert!(matches!(
            expires_at_from_millis(i64::MAX),
            Err(DateParseError::OutOfRange(_))
        ));
    }
}
