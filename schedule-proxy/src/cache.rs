use std::sync::Arc;

use schedule_layout::Feed;
use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};

/// Holds the last fetched feed until its time-to-live runs out.
pub struct FeedCache {
    inner: RwLock<Option<(Instant, Arc<Feed>)>>,
    ttl: Duration,
}

impl FeedCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Default::default(),
            ttl,
        }
    }

    pub async fn insert(&self, feed: Feed) -> Arc<Feed> {
        let feed = Arc::new(feed);
        *self.inner.write().await = Some((Instant::now() + self.ttl, Arc::clone(&feed)));
        feed
    }

    pub async fn get(&self) -> Option<Arc<Feed>> {
        match self.inner.read().await.as_ref() {
            Some((expires, feed)) if *expires > Instant::now() => Some(Arc::clone(feed)),
            _ => None,
        }
    }
}
