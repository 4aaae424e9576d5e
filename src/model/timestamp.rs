//! Wire codec for entry timestamps.
//!
//! The service writes UTC instants as `YYYY-MM-DDTHH:MM:SS.mmmZ`. Anything that
//! deviates from that exact shape is rejected instead of being interpreted.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serializer};

const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

// Byte layout of `2024-01-02T10:00:00.000Z`
const TEMPLATE: &[u8; 24] = b"dddd-dd-ddTdd:dd:dd.dddZ";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimestampError {
    #[error("timestamp '{0}' does not match yyyy-MM-ddTHH:mm:ss.SSSZ")]
    Shape(String),
    #[error("timestamp '{value}' is out of range: {reason}")]
    Range { value: String, reason: String },
}

pub fn parse(value: &str) -> Result<DateTime<Utc>, TimestampError> {
    let bytes = value.as_bytes();
    let shape_ok = bytes.len() == TEMPLATE.len()
        && bytes.iter().zip(TEMPLATE.iter()).all(|(&b, &t)| match t {
            b'd' => b.is_ascii_digit(),
            literal => b == literal,
        });
    if !shape_ok {
        return Err(TimestampError::Shape(value.to_string()));
    }

    let naive = NaiveDateTime::parse_from_str(&value[..23], FORMAT).map_err(|e| {
        TimestampError::Range {
            value: value.to_string(),
            reason: e.to_string(),
        }
    })?;

    Ok(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc))
}

pub fn format(instant: &DateTime<Utc>) -> String {
    format!("{}Z", instant.format(FORMAT))
}

pub fn serialize<S>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(instant))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(de::Error::custom)
}
