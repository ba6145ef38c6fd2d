use chrono::NaiveDate;

/// Converts the feed's `dd/mm/yyyy` date into a calendar day.
pub fn parse_feed_date<S: AsRef<str>>(s: S) -> Option<NaiveDate> {
    let mut parts = s.as_ref().trim().split('/');

    let day = parts.next()?.parse::<u32>().ok()?;
    let month = parts.next()?.parse::<u32>().ok()?;
    let year = parts.next()?.parse::<i32>().ok()?;

    if parts.next().is_some() {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(feature = "serde")]
mod json {
    use log::debug;

    use crate::{Feed, FeedError};

    impl Feed {
        pub fn from_json<S: AsRef<str>>(s: S) -> Result<Feed, FeedError> {
            let s = s.as_ref();
            if s.trim().is_empty() {
                return Err(FeedError::Empty);
            }

            let feed: Feed = serde_json::from_str(s)?;
            debug!(
                "Decoded feed with {} events covering {} weeks",
                feed.events.len(),
                feed.meta.weeks
            );

            Ok(feed)
        }
    }
}
