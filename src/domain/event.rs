//! Calendar event records.

use chrono::{NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

use super::types::{lenient, non_empty, Timestamp};

/// A calendar event as supplied by the calendar data source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub start: Option<EventTime>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub end: Option<EventTime>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

/// A point in time paired with the zone it is expressed in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub date_time: Option<Timestamp>,
    /// Zone name; "UTC" is the only one interpreted.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl EventTime {
    pub fn new(date_time: impl Into<Timestamp>) -> Self {
        Self {
            date_time: Some(date_time.into()),
            time_zone: None,
        }
    }

    pub fn utc(date_time: impl Into<Timestamp>) -> Self {
        Self {
            date_time: Some(date_time.into()),
            time_zone: Some("UTC".to_string()),
        }
    }

    /// Wall-clock time in `tz`, if the timestamp parses.
    pub fn to_wall_clock<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDateTime> {
        let date_time = self.date_time.as_ref()?;
        match self.time_zone.as_deref() {
            Some(zone) if zone.eq_ignore_ascii_case("utc") => date_time.to_wall_clock_from_utc(tz),
            _ => date_time.to_wall_clock(tz),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl EventRecord {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: Some(subject.into()),
            ..Default::default()
        }
    }

    pub fn with_times(mut self, start: EventTime, end: EventTime) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn with_location(mut self, display_name: impl Into<String>) -> Self {
        self.location = Some(Location {
            display_name: Some(display_name.into()),
        });
        self
    }

    /// Location display name, if present and not empty.
    pub fn location_name(&self) -> Option<&str> {
        self.location
            .as_ref()
            .and_then(|l| non_empty(l.display_name.as_ref()))
    }
}
