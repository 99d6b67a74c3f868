//! Timestamp parsing and formatting for the first CSV column.
//!
//! Benchmark data files in the wild write timestamps a few different ways;
//! parsing tries each accepted format in order. Serialization always uses
//! `YYYY-MM-DD HH:MM:SS` with the fractional part appended only when
//! non-zero, so a file that was parsed from any accepted format round-trips
//! to the same in-memory values.

use chrono::{NaiveDate, NaiveDateTime};

/// Formats accepted for the timestamp column, tried in order.
const PARSE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Canonical output format. `%.f` prints nothing for whole seconds.
const WRITE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Parse a timestamp cell. Date-only values resolve to midnight.
pub fn parse(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    for fmt in PARSE_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(ts);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_hms_opt(0, 0, 0).expect("midnight is always valid"))
}

/// Format a timestamp for serialization.
pub fn format(ts: &NaiveDateTime) -> String {
    ts.format(WRITE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_standard_format() {
        let ts = parse("2014-04-01 00:00:00").unwrap();
        assert_eq!(format(&ts), "2014-04-01 00:00:00");
    }

    #[test]
    fn test_parse_iso_t_separator() {
        let a = parse("2014-04-01T12:30:00").unwrap();
        let b = parse("2014-04-01 12:30:00").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_date_only_is_midnight() {
        let ts = parse("2014-04-01").unwrap();
        assert_eq!(format(&ts), "2014-04-01 00:00:00");
    }

    #[test]
    fn test_parse_minutes_precision() {
        let ts = parse("2014-04-01 09:15").unwrap();
        assert_eq!(format(&ts), "2014-04-01 09:15:00");
    }

    #[test]
    fn test_fractional_seconds_round_trip() {
        let ts = parse("2014-04-01 00:00:00.250").unwrap();
        let again = parse(&format(&ts)).unwrap();
        assert_eq!(ts, again);
    }

    #[test]
    fn test_whole_seconds_have_no_fraction() {
        let ts = parse("2014-04-01 00:00:00.000").unwrap();
        assert_eq!(format(&ts), "2014-04-01 00:00:00");
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(parse("not a date").is_none());
        assert!(parse("").is_none());
        assert!(parse("04/01/2014").is_none());
    }
}
