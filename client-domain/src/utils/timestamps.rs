// Timestamp (de)serialization for the service's local date-times
// Accepts "2025-03-05T14:03:22.123456" as well as RFC 3339 with an offset

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer};

const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const FALLBACK_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(ts) => serializer.serialize_str(&ts.format(WIRE_FORMAT).to_string()),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => parse_timestamp(text)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{}'", text))),
    }
}

pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.naive_utc());
    }
    std::iter::once(WIRE_FORMAT)
        .chain(FALLBACK_FORMATS)
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}

/// `-` when absent, otherwise e.g. `Mar 5, 14:03:22`.
pub fn format_timestamp(value: Option<&NaiveDateTime>) -> String {
    match value {
        Some(ts) => ts.format("%b %-d, %H:%M:%S").to_string(),
        None => "-".to_string(),
    }
}
