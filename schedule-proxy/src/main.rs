mod cache;
mod cli;
mod fetch;
mod server;

use std::{env, sync::Arc};

use anyhow::Result;
use log::{info, warn};
use schedule_layout::TimelineScale;
use tokio::{net::TcpListener, signal};

use crate::{
    cache::FeedCache,
    server::{load_feed, router, AppState},
};

fn setup_logging() {
    if env::var("LOG").is_err() {
        env::set_var("LOG", "schedule_proxy=info");
    }

    pretty_env_logger::init_custom_env("LOG");
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::parse(env::args().skip(1).collect());
    setup_logging();

    let state = Arc::new(AppState {
        feed_url: args.feed_url,
        cache: FeedCache::new(args.cache_ttl),
        scale: TimelineScale::default(),
    });

    // warm the cache
    if load_feed(&state).await.is_none() {
        warn!("Starting without calendar data, will retry on request");
    }

    let listener = TcpListener::bind(args.address).await?;
    info!("Listening at http://{}", args.address);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
