use chrono::{NaiveTime, Timelike};
use log::debug;

use crate::{parser::parse_feed_date, NormalizedEvent, RawEvent};

/// Parses a strict `HH:MM` 24-hour clock value into minutes past midnight.
pub fn parse_time(text: &str) -> Option<u32> {
    // exact shape here, chrono checks the ranges
    let [h1, h2, b':', m1, m2] = text.as_bytes() else {
        return None;
    };
    if ![h1, h2, m1, m2].iter().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let time = NaiveTime::parse_from_str(text, "%H:%M").ok()?;
    Some(time.hour() * 60 + time.minute())
}

pub(crate) fn format_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

impl NormalizedEvent {
    /// Returns `None` when either time is malformed or the range is empty.
    pub fn from_raw(raw: &RawEvent) -> Option<Self> {
        let (Some(start_minute), Some(end_minute)) = (parse_time(&raw.start), parse_time(&raw.end))
        else {
            debug!(
                "Dropping {:?} ({}): unparseable time {:?}-{:?}",
                raw.title, raw.group, raw.start, raw.end
            );
            return None;
        };

        if end_minute <= start_minute {
            debug!(
                "Dropping {:?} ({}): non-positive duration {}-{}",
                raw.title, raw.group, raw.start, raw.end
            );
            return None;
        }

        Some(Self {
            group: raw.group.clone(),
            title: raw.title.clone(),
            start_minute,
            end_minute,
            date: parse_feed_date(&raw.date),
            location: raw.location.clone(),
        })
    }

    /// Half-open `[start, end)` intersection.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_minute < other.end_minute && other.start_minute < self.end_minute
    }

    #[must_use]
    pub fn duration(&self) -> u32 {
        self.end_minute - self.start_minute
    }
}

/// Normalizes raw events in feed order, silently skipping invalid ones.
pub fn normalize(events: &[RawEvent]) -> Vec<NormalizedEvent> {
    events.iter().filter_map(NormalizedEvent::from_raw).collect()
}
