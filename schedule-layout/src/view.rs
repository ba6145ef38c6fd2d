use chrono::{Datelike, Duration, NaiveDate};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{render_day, DayLayout, Feed, GroupSelection, TimelineScale};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ViewMode {
    #[default]
    Daily,
    Weekly,
}

impl ViewMode {
    /// Days shown at once, which is also the navigation step.
    #[must_use]
    pub fn days(self) -> i64 {
        match self {
            ViewMode::Daily => 2,
            ViewMode::Weekly => 7,
        }
    }
}

/// Navigation state, relative to whatever the caller considers today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ViewState {
    pub mode: ViewMode,
    pub offset_days: i64,
}

fn max_offset(weeks: u32) -> i64 {
    (i64::from(weeks) - 1) * 7
}

impl ViewState {
    #[must_use]
    pub fn new(mode: ViewMode) -> Self {
        Self {
            mode,
            offset_days: 0,
        }
    }

    /// First day of the view. Weekly views start on the Monday of the week
    /// containing `today + offset`. `None` past the calendar's range.
    #[must_use]
    pub fn first_day(&self, today: NaiveDate) -> Option<NaiveDate> {
        let base = today.checked_add_signed(Duration::try_days(self.offset_days)?)?;
        match self.mode {
            ViewMode::Daily => Some(base),
            ViewMode::Weekly => base.checked_sub_signed(Duration::try_days(i64::from(
                base.weekday().num_days_from_monday(),
            ))?),
        }
    }

    /// Days of the view, cut short where the calendar's range ends.
    #[must_use]
    pub fn visible_days(&self, today: NaiveDate) -> Vec<NaiveDate> {
        let Some(first) = self.first_day(today) else {
            return Vec::new();
        };
        (0..self.mode.days())
            .map_while(|idx| first.checked_add_signed(Duration::try_days(idx)?))
            .collect()
    }

    /// Whether navigation from today could land on this offset.
    #[must_use]
    pub fn is_reachable(&self, weeks: u32) -> bool {
        (0..max_offset(weeks).max(0) + self.mode.days()).contains(&self.offset_days)
    }

    #[must_use]
    pub fn can_go_previous(&self) -> bool {
        self.offset_days > 0
    }

    #[must_use]
    pub fn can_go_next(&self, weeks: u32) -> bool {
        self.offset_days < max_offset(weeks)
    }

    /// Moves forward one step. Returns `false` at the end of the data.
    pub fn next(&mut self, weeks: u32) -> bool {
        if !self.can_go_next(weeks) {
            return false;
        }
        self.offset_days += self.mode.days();
        true
    }

    /// Moves back one step, never before today. Returns `false` at today.
    pub fn previous(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.offset_days = (self.offset_days - self.mode.days()).max(0);
        true
    }

    /// Changing mode resets navigation to today.
    pub fn switch_mode(&mut self, mode: ViewMode) {
        if self.mode != mode {
            *self = Self::new(mode);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ViewLayout {
    pub mode: ViewMode,
    pub days: Vec<DayLayout>,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

/// Runs the day pipeline for every visible day. Nothing is reused between
/// calls.
pub fn render_view(
    feed: &Feed,
    state: &ViewState,
    groups: &GroupSelection,
    today: NaiveDate,
    scale: &TimelineScale,
) -> ViewLayout {
    let days = state
        .visible_days(today)
        .into_iter()
        .map(|date| render_day(&feed.events, date, groups, scale))
        .collect();

    ViewLayout {
        mode: state.mode,
        days,
        can_go_previous: state.can_go_previous(),
        can_go_next: state.can_go_next(feed.meta.weeks),
    }
}
