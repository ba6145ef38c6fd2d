use chrono::{DateTime, NaiveDate, Utc};

#[cfg(feature = "serde")]
use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize};
#[cfg(feature = "serde")]
use serde_json::Value;

use crate::time::format_minutes;

#[cfg(feature = "serde")]
fn default_weeks() -> u32 {
    1
}

/// Non-string values decode as empty text, which normalization then drops.
#[cfg(feature = "serde")]
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_optional_string(deserializer)?.unwrap_or_default())
}

#[cfg(feature = "serde")]
fn lenient_optional_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// Entries that are not event objects are skipped instead of failing the
/// whole document.
#[cfg(feature = "serde")]
fn lenient_events<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<RawEvent>, D::Error> {
    let entries = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();

    Ok(entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<RawEvent>(entry) {
            Ok(event) => Some(event),
            Err(err) => {
                debug!("Skipping feed entry: {err}");
                None
            }
        })
        .collect())
}

/// The document published by the upstream scraper.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Feed {
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "lenient_events")
    )]
    pub events: Vec<RawEvent>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub meta: FeedMeta,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeedMeta {
    #[cfg_attr(
        feature = "serde",
        serde(rename = "ts", default, skip_serializing_if = "Option::is_none")
    )]
    pub scraped_at: Option<DateTime<Utc>>,
    /// Number of weeks of data available, bounds forward navigation.
    #[cfg_attr(feature = "serde", serde(rename = "w", default = "default_weeks"))]
    pub weeks: u32,
}

impl Default for FeedMeta {
    fn default() -> Self {
        Self {
            scraped_at: None,
            weeks: 1,
        }
    }
}

/// An event exactly as it appears in the feed. Times and date are kept as
/// text so that malformed entries survive decoding and get dropped later.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawEvent {
    #[cfg_attr(
        feature = "serde",
        serde(rename = "g", default, deserialize_with = "lenient_string")
    )]
    pub group: String,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "t", default, deserialize_with = "lenient_string")
    )]
    pub title: String,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "st", default, deserialize_with = "lenient_string")
    )]
    pub start: String,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "et", default, deserialize_with = "lenient_string")
    )]
    pub end: String,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "sd", default, deserialize_with = "lenient_string")
    )]
    pub date: String,
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "l",
            default,
            deserialize_with = "lenient_optional_string",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub location: Option<String>,
}

/// An event reduced to minute offsets. `start_minute < end_minute` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NormalizedEvent {
    pub group: String,
    pub title: String,
    pub start_minute: u32,
    pub end_minute: u32,
    pub date: Option<NaiveDate>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColumnAssignment {
    pub column_index: usize,
    pub total_columns: usize,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LaidOutEvent {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub event: NormalizedEvent,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub column: ColumnAssignment,
    pub top: f32,
    pub height: f32,
}

impl LaidOutEvent {
    #[must_use]
    pub fn start_label(&self) -> String {
        format_minutes(self.event.start_minute)
    }

    #[must_use]
    pub fn end_label(&self) -> String {
        format_minutes(self.event.end_minute)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DayLayout {
    pub date: NaiveDate,
    pub events: Vec<LaidOutEvent>,
}
