//! Normalization helpers shared by every aggregator

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

/// Offset-less layouts accepted for `data_criacao`, tried in order.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Layouts carrying a numeric offset (`+00`, `+0000`, `+00:00`).
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M:%S%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%#z",
];

/// Treat absent, empty and whitespace-only values as missing.
///
/// Present values are returned verbatim so that grouping keys match the raw
/// stored strings.
pub fn normalize_field(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// A successfully parsed creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationTime {
    /// Literal calendar-day prefix of the raw value (`YYYY-MM-DD`).
    pub date_key: String,
    /// Wall-clock time in the reporting timezone.
    pub local: NaiveDateTime,
}

impl CreationTime {
    pub fn local_date(&self) -> NaiveDate {
        self.local.date()
    }
}

/// Parse a raw `data_criacao` value.
///
/// Offset-less values are taken as already local; values with an offset are
/// converted into `timezone`. The day bucket (`date_key`) is always the literal
/// `YYYY-MM-DD` prefix, never a converted date.
pub fn parse_creation_time(raw: &str, timezone: &Tz) -> Option<CreationTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let local = parse_with_offset(trimmed)
        .map(|dt| timezone.from_utc_datetime(&dt.naive_utc()).naive_local())
        .or_else(|| parse_naive(trimmed))?;

    // Fixed-width day prefix; RFC 3339 also accepts a lowercase `t` separator.
    let date_key = trimmed
        .get(..10)
        .filter(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").is_ok())?
        .to_string();

    Some(CreationTime { date_key, local })
}

fn parse_with_offset(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).ok().or_else(|| {
        OFFSET_FORMATS
            .iter()
            .find_map(|fmt| DateTime::parse_from_str(value, fmt).ok())
    })
}

fn parse_naive(value: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
