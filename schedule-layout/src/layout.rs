use chrono::NaiveDate;
use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    assign_columns, collision_blocks, normalize, parser::parse_feed_date, DayLayout,
    GroupSelection, LaidOutEvent, NormalizedEvent, RawEvent,
};

/// Maps minutes of the day to pixel offsets on a vertical timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimelineScale {
    pub start_hour: u32,
    pub end_hour: u32,
    pub hour_height: f32,
    pub min_block_height: f32,
    pub block_gap: f32,
}

impl Default for TimelineScale {
    fn default() -> Self {
        Self {
            start_hour: 6,
            end_hour: 21,
            hour_height: 60.0,
            min_block_height: 20.0,
            block_gap: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HourMark {
    pub hour: u32,
    pub top: f32,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub label: Option<String>,
}

impl TimelineScale {
    /// Offset of `minute` from the top of the timeline. Negative before the
    /// first visible hour.
    #[must_use]
    pub fn top(&self, minute: u32) -> f32 {
        (minute as f32 - (self.start_hour * 60) as f32) / 60.0 * self.hour_height
    }

    #[must_use]
    pub fn height(&self, duration: u32) -> f32 {
        let raw = duration as f32 / 60.0 * self.hour_height;
        (raw - self.block_gap).max(self.min_block_height)
    }

    #[must_use]
    pub fn total_height(&self) -> f32 {
        self.end_hour.saturating_sub(self.start_hour) as f32 * self.hour_height
    }

    /// One mark per hour line; only the inner hours carry a label.
    #[must_use]
    pub fn hour_marks(&self) -> Vec<HourMark> {
        (self.start_hour..=self.end_hour)
            .map(|hour| HourMark {
                hour,
                top: self.top(hour * 60),
                label: (hour > self.start_hour && hour < self.end_hour)
                    .then(|| format!("{hour}:00")),
            })
            .collect()
    }

    /// Position of the current-time line, if `minute` is inside the window.
    #[must_use]
    pub fn now_marker(&self, minute: u32) -> Option<f32> {
        (self.start_hour * 60..=self.end_hour * 60)
            .contains(&minute)
            .then(|| self.top(minute))
    }
}

/// Lays out one day's events. Pure: partition, assign columns, then map to
/// pixel geometry. Output is grouped by collision block in start order.
pub fn layout_day(events: &[NormalizedEvent], scale: &TimelineScale) -> Vec<LaidOutEvent> {
    let blocks = collision_blocks(events.to_vec());

    let mut laid_out = Vec::with_capacity(events.len());
    for block in blocks {
        let columns = assign_columns(&block);
        for (event, column) in block.into_events().into_iter().zip(columns) {
            laid_out.push(LaidOutEvent {
                top: scale.top(event.start_minute),
                height: scale.height(event.duration()),
                event,
                column,
            });
        }
    }

    laid_out
}

/// Filters the feed down to one calendar day and the selected groups, then
/// lays it out.
pub fn render_day(
    events: &[RawEvent],
    date: NaiveDate,
    groups: &GroupSelection,
    scale: &TimelineScale,
) -> DayLayout {
    let day_events: Vec<RawEvent> = events
        .iter()
        .filter(|event| groups.contains(&event.group))
        .filter(|event| parse_feed_date(&event.date) == Some(date))
        .cloned()
        .collect();

    let normalized = normalize(&day_events);
    if normalized.len() < day_events.len() {
        debug!(
            "{date}: dropped {} of {} events with invalid times",
            day_events.len() - normalized.len(),
            day_events.len()
        );
    }

    DayLayout {
        date,
        events: layout_day(&normalized, scale),
    }
}
