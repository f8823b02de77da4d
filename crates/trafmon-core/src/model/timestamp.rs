// ── Backend timestamps ──
//
// The backend emits timestamps as strings whose exact shape depends on how
// it serializes datetimes. Anything we can parse becomes a UTC instant;
// anything else is kept verbatim so the UI can still show it.

use std::fmt;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// A record timestamp: parsed when possible, raw otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Parsed(DateTime<Utc>),
    Raw(String),
}

impl Timestamp {
    /// Parse RFC 3339, naive ISO-8601 (taken as UTC) or RFC 2822.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Self::Parsed(dt.with_timezone(&Utc));
        }
        for fmt in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
                return Self::Parsed(naive.and_utc());
            }
        }
        if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
            return Self::Parsed(dt.with_timezone(&Utc));
        }

        Self::Raw(raw.to_owned())
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Parsed(dt) => Some(*dt),
            Self::Raw(_) => None,
        }
    }

    /// Wall-clock time (`HH:MM:SS`) in the local zone, for chart axes.
    pub fn time_label(&self) -> String {
        self.time_label_in(&Local)
    }

    /// Date and time (`YYYY-MM-DD HH:MM:SS`) in the local zone, for tables.
    pub fn datetime_label(&self) -> String {
        self.datetime_label_in(&Local)
    }

    pub fn time_label_in<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: fmt::Display,
    {
        self.format_in(tz, "%H:%M:%S")
    }

    pub fn datetime_label_in<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: fmt::Display,
    {
        self.format_in(tz, "%Y-%m-%d %H:%M:%S")
    }

    fn format_in<Tz: TimeZone>(&self, tz: &Tz, fmt: &str) -> String
    where
        Tz::Offset: fmt::Display,
    {
        match self {
            Self::Parsed(dt) => dt.with_timezone(tz).format(fmt).to_string(),
            Self::Raw(raw) => raw.clone(),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parsed(dt) => write!(f, "{}", dt.to_rfc3339()),
            Self::Raw(raw) => f.write_str(raw),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{FixedOffset, TimeZone, Utc};

    use super::Timestamp;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Timestamp {
        Timestamp::Parsed(Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap())
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        assert_eq!(
            Timestamp::parse("2024-06-15T12:30:00+02:00"),
            utc(2024, 6, 15, 10, 30, 0)
        );
    }

    #[test]
    fn parses_naive_iso_as_utc() {
        assert_eq!(
            Timestamp::parse("2024-06-15T10:30:00"),
            utc(2024, 6, 15, 10, 30, 0)
        );
        let fractional = Timestamp::parse("2024-06-15T10:30:00.123456");
        assert_eq!(
            fractional.time_label_in(&Utc),
            "10:30:00",
            "fractional seconds are dropped from labels"
        );
    }

    #[test]
    fn parses_http_date() {
        assert_eq!(
            Timestamp::parse("Sat, 15 Jun 2024 10:30:00 GMT"),
            utc(2024, 6, 15, 10, 30, 0)
        );
    }

    #[test]
    fn keeps_garbage_verbatim() {
        let ts = Timestamp::parse("yesterday-ish");
        assert_eq!(ts, Timestamp::Raw("yesterday-ish".into()));
        assert_eq!(ts.datetime_label(), "yesterday-ish");
        assert_eq!(ts.time_label(), "yesterday-ish");
        assert!(ts.as_datetime().is_none());
    }

    #[test]
    fn labels_follow_the_given_zone() {
        let ts = utc(2024, 6, 15, 23, 45, 10);
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(ts.time_label_in(&Utc), "23:45:10");
        assert_eq!(ts.datetime_label_in(&plus_two), "2024-06-16 01:45:10");
    }
}
