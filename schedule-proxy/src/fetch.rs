use anyhow::{bail, Result};
use chrono::Utc;
use log::{debug, info};
use once_cell::sync::Lazy;
use schedule_layout::Feed;

static CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

/// Downloads and decodes the feed. The timestamp query keeps intermediate
/// caches from serving an old copy.
pub async fn fetch_feed(url: &str) -> Result<Feed> {
    debug!("Sending HTTP request to {url}");
    let response = CLIENT
        .get(url)
        .query(&[("t", Utc::now().timestamp_millis())])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        bail!("Got response status {status}");
    }

    debug!("Reading response body");
    let feed = Feed::from_json(response.text().await?)?;
    info!(
        "Fetched {} events covering {} weeks",
        feed.events.len(),
        feed.meta.weeks
    );

    Ok(feed)
}
