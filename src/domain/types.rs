//! Shared value types for mailbox and calendar records.
//!
//! Records arrive from external data sources and are treated as untrusted, so
//! every field is deserialized leniently: a missing field or a field of the
//! wrong JSON type becomes `None` instead of failing the whole record.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Naive layouts accepted when a timestamp carries no UTC offset.
const NAIVE_LAYOUTS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Deserializes a field into `Some(T)` when it has the expected shape and
/// `None` otherwise.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// A timestamp exactly as supplied by the data source.
///
/// Parsing is deferred until rendering so an unparseable value never rejects
/// the record that carries it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub String);

impl Timestamp {
    /// Resolves the timestamp to wall-clock time in `tz`.
    ///
    /// Values with an offset (RFC 3339) are converted into `tz`. Values
    /// without one are already wall-clock time and are returned unchanged.
    pub fn to_wall_clock<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDateTime> {
        let raw = self.0.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(tz).naive_local());
        }
        parse_naive(raw)
    }

    /// Resolves a naive timestamp known to be in UTC to wall-clock time in `tz`.
    pub(crate) fn to_wall_clock_from_utc<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDateTime> {
        match parse_naive(self.0.trim()) {
            Some(naive) => Some(Utc.from_utc_datetime(&naive).with_timezone(tz).naive_local()),
            None => self.to_wall_clock(tz),
        }
    }
}

fn parse_naive(raw: &str) -> Option<NaiveDateTime> {
    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(raw, layout).ok())
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Timestamp {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Timestamp {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Returns the value unchanged when it is present and not empty.
pub(crate) fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}
