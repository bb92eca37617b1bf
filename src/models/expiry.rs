use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, de};

/// Years every supported backend can store in its datetime column.
pub const STORABLE_YEARS: RangeInclusive<i32> = 1..=9999;

const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parses an ISO-8601 expiry. Values without an offset are taken as UTC.
/// Fractional seconds are dropped and years outside [`STORABLE_YEARS`] rejected.
pub fn parse_expiry(raw: &str) -> Option<DateTime<Utc>> {
    parse_instant(raw.trim()).and_then(storable)
}

fn storable(instant: DateTime<Utc>) -> Option<DateTime<Utc>> {
    STORABLE_YEARS
        .contains(&instant.year())
        .then(|| instant.trunc_subsecs(0))
}

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(start_of_day)
}

/// Midnight UTC at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    raw.map(|value| {
        parse_expiry(&value).ok_or_else(|| {
            de::Error::custom(format!(
                "invalid expiryDate '{value}': expected an ISO-8601 date or date-time \
                 between years 0001 and 9999"
            ))
        })
    })
    .transpose()
}
