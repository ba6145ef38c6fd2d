use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Timelike};
use log::{error, warn};
use schedule_layout::{
    render_day, render_view, unique_groups, Feed, Freshness, GroupSelection, HourMark,
    TimelineScale, ViewLayout, ViewMode, ViewState,
};
use serde::{Deserialize, Serialize};

use crate::{cache::FeedCache, fetch::fetch_feed};

const LOAD_FAILED: &str = "Failed to load calendar data.";

pub struct AppState {
    pub feed_url: String,
    pub cache: FeedCache,
    pub scale: TimelineScale,
}

type SharedState = Arc<AppState>;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/view", get(handle_view))
        .route("/day/:date", get(handle_day))
        .route("/groups", get(handle_groups))
        .fallback(|| async { Redirect::permanent(env!("CARGO_PKG_REPOSITORY")) })
        .with_state(state)
}

/// Cached feed, or a fresh one if the cache ran out. `None` if the upstream
/// fetch failed.
pub async fn load_feed(state: &AppState) -> Option<Arc<Feed>> {
    if let Some(feed) = state.cache.get().await {
        return Some(feed);
    }

    match fetch_feed(&state.feed_url).await {
        Ok(feed) => Some(state.cache.insert(feed).await),
        Err(err) => {
            error!("Failed to fetch feed from {}: {err:#}", state.feed_url);
            None
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    #[serde(default)]
    mode: ViewMode,
    #[serde(default)]
    offset: i64,
    groups: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DayQuery {
    groups: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NowMarker {
    date: NaiveDate,
    top: f32,
}

#[derive(Debug, Serialize)]
pub struct ViewResponse {
    #[serde(flatten)]
    view: ViewLayout,
    total_height: f32,
    hour_marks: Vec<HourMark>,
    #[serde(skip_serializing_if = "Option::is_none")]
    now: Option<NowMarker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    freshness: Option<Freshness>,
}

/// Comma separated group ids. Absent means the default selection, empty
/// means nothing selected.
fn selection(groups: Option<&str>) -> GroupSelection {
    match groups {
        None => GroupSelection::default(),
        Some(groups) => groups
            .split(',')
            .map(str::trim)
            .filter(|group| !group.is_empty())
            .collect(),
    }
}

pub fn build_view<Tz: TimeZone>(
    feed: &Feed,
    query: &ViewQuery,
    scale: &TimelineScale,
    now: &DateTime<Tz>,
) -> Result<ViewResponse, &'static str> {
    let state = ViewState {
        mode: query.mode,
        offset_days: query.offset,
    };
    if !state.is_reachable(feed.meta.weeks) {
        return Err("offset is outside the available data");
    }

    let today = now.date_naive();
    let view = render_view(
        feed,
        &state,
        &selection(query.groups.as_deref()),
        today,
        scale,
    );

    let now_marker = view
        .days
        .iter()
        .any(|day| day.date == today)
        .then(|| scale.now_marker(now.hour() * 60 + now.minute()))
        .flatten()
        .map(|top| NowMarker { date: today, top });

    Ok(ViewResponse {
        view,
        total_height: scale.total_height(),
        hour_marks: scale.hour_marks(),
        now: now_marker,
        freshness: feed.meta.freshness(now),
    })
}

async fn handle_view(State(state): State<SharedState>, Query(query): Query<ViewQuery>) -> Response {
    let Some(feed) = load_feed(&state).await else {
        return (StatusCode::BAD_GATEWAY, LOAD_FAILED).into_response();
    };

    match build_view(&feed, &query, &state.scale, &Local::now()) {
        Ok(view) => Json(view).into_response(),
        Err(message) => (StatusCode::BAD_REQUEST, message).into_response(),
    }
}

async fn handle_day(
    State(state): State<SharedState>,
    Path(date): Path<String>,
    Query(query): Query<DayQuery>,
) -> Response {
    let Ok(date) = NaiveDate::parse_from_str(&date, "%Y-%m-%d") else {
        warn!("Rejecting malformed date {date:?}");
        return (StatusCode::BAD_REQUEST, "date must be formatted as YYYY-MM-DD").into_response();
    };

    let Some(feed) = load_feed(&state).await else {
        return (StatusCode::BAD_GATEWAY, LOAD_FAILED).into_response();
    };

    let day = render_day(
        &feed.events,
        date,
        &selection(query.groups.as_deref()),
        &state.scale,
    );
    Json(day).into_response()
}

async fn handle_groups(State(state): State<SharedState>) -> Response {
    let Some(feed) = load_feed(&state).await else {
        return (StatusCode::BAD_GATEWAY, LOAD_FAILED).into_response();
    };

    Json(unique_groups(&feed.events)).into_response()
}
