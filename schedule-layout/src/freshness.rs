use chrono::{DateTime, TimeZone, Timelike, Utc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::FeedMeta;

const STALE_AFTER_DAY_MIN: i64 = 15;
const STALE_AFTER_NIGHT_MIN: i64 = 70;

/// How old the scraped data is, judged from the viewer's wall clock.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Freshness {
    pub minutes_ago: i64,
    pub stale: bool,
    pub label: String,
}

impl Freshness {
    /// The scraper runs less often at night, so the staleness threshold is
    /// looser outside 06:00-21:59 in `now`'s time zone.
    pub fn assess<Tz: TimeZone>(scraped_at: DateTime<Utc>, now: &DateTime<Tz>) -> Self {
        let elapsed = now.with_timezone(&Utc) - scraped_at;
        let minutes_ago = (elapsed.num_milliseconds() as f64 / 60_000.0).round() as i64;

        let threshold = if (6..22).contains(&now.hour()) {
            STALE_AFTER_DAY_MIN
        } else {
            STALE_AFTER_NIGHT_MIN
        };

        Self {
            minutes_ago,
            stale: minutes_ago > threshold,
            label: label(minutes_ago),
        }
    }
}

fn label(minutes_ago: i64) -> String {
    let plural = |n: i64| if n > 1 { "s" } else { "" };

    if minutes_ago < 1 {
        "Last update: just now".to_string()
    } else if minutes_ago < 60 {
        format!(
            "Last update: {minutes_ago} minute{} ago",
            plural(minutes_ago)
        )
    } else {
        let hours = minutes_ago / 60;
        format!("Last update: {hours} hour{} ago", plural(hours))
    }
}

impl FeedMeta {
    #[must_use]
    pub fn freshness<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<Freshness> {
        self.scraped_at
            .map(|scraped_at| Freshness::assess(scraped_at, now))
    }
}
