use chrono::NaiveDate;
use schedule_layout::{
    layout_day, normalize, render_day, render_view, Feed, GroupSelection, LaidOutEvent, RawEvent,
    TimelineScale, ViewMode, ViewState,
};

fn raw(title: &str, start: &str, end: &str) -> RawEvent {
    RawEvent {
        group: "M2".into(),
        title: title.into(),
        start: start.into(),
        end: end.into(),
        date: "14/10/2025".into(),
        location: None,
    }
}

fn lay_out(events: &[RawEvent]) -> Vec<LaidOutEvent> {
    layout_day(&normalize(events), &TimelineScale::default())
}

fn columns(laid_out: &[LaidOutEvent]) -> Vec<(&str, usize, usize)> {
    laid_out
        .iter()
        .map(|e| {
            (
                e.event.title.as_str(),
                e.column.column_index,
                e.column.total_columns,
            )
        })
        .collect()
}

#[test]
fn partial_overlap_splits_into_two_columns() {
    let laid_out = lay_out(&[raw("A", "09:00", "10:00"), raw("B", "09:30", "10:30")]);
    assert_eq!(columns(&laid_out), [("A", 0, 2), ("B", 1, 2)]);
}

#[test]
fn back_to_back_events_stay_full_width() {
    let laid_out = lay_out(&[raw("A", "09:00", "10:00"), raw("B", "10:00", "11:00")]);
    assert_eq!(columns(&laid_out), [("A", 0, 1), ("B", 0, 1)]);
    assert!(laid_out.iter().all(|e| e.column.width_percent() == 100.0));
}

#[test]
fn nested_events_share_the_second_column() {
    let laid_out = lay_out(&[
        raw("A", "09:00", "11:00"),
        raw("B", "09:15", "09:45"),
        raw("C", "09:50", "10:30"),
    ]);
    assert_eq!(columns(&laid_out), [("A", 0, 2), ("B", 1, 2), ("C", 1, 2)]);
    assert_eq!(laid_out[2].column.left_percent(), 50.0);
}

#[test]
fn malformed_only_day_is_empty() {
    assert!(lay_out(&[raw("A", "25:99", "26:00")]).is_empty());
}

#[test]
fn empty_input_is_empty_output() {
    assert!(lay_out(&[]).is_empty());
}

#[test]
fn first_fit_reuses_lowest_freed_column() {
    let laid_out = lay_out(&[
        raw("A", "09:00", "10:00"),
        raw("B", "09:10", "09:20"),
        raw("C", "09:30", "11:00"),
        raw("D", "10:10", "10:40"),
    ]);
    assert_eq!(
        columns(&laid_out),
        [("A", 0, 2), ("B", 1, 2), ("C", 1, 2), ("D", 0, 2)]
    );
}

#[test]
fn geometry_matches_the_timeline() {
    let laid_out = lay_out(&[raw("A", "08:00", "09:30")]);
    assert_eq!(laid_out[0].top, 120.0);
    assert_eq!(laid_out[0].height, 88.0);
}

#[test]
fn full_pipeline_from_feed_document() {
    let feed = Feed::from_json(
        r#"{
            "events": [
                {"g": "M2", "t": "Compilers", "st": "09:00", "et": "10:00", "sd": "14/10/2025", "l": "A1"},
                {"g": "M2", "t": "Networks", "st": "09:30", "et": "10:30", "sd": "14/10/2025"},
                {"g": "M2", "t": "Networks", "st": "09:30", "et": "10:30", "sd": "14/10/2025"},
                {"g": "M1", "t": "Algebra", "st": "09:00", "et": "12:00", "sd": "14/10/2025"},
                {"g": "M2", "t": "Broken", "st": "9h", "et": "10:00", "sd": "14/10/2025"},
                {"g": "M2", "t": "Tomorrow", "st": "09:00", "et": "10:00", "sd": "15/10/2025"}
            ],
            "meta": {"ts": "2025-10-14T06:00:00Z", "w": 2}
        }"#,
    )
    .unwrap();

    let date = NaiveDate::from_ymd_opt(2025, 10, 14).unwrap();
    let day = render_day(&feed.events, date, &GroupSelection::default(), &TimelineScale::default());

    // duplicates are tolerated and laid out side by side
    assert_eq!(
        columns(&day.events),
        [("Compilers", 0, 3), ("Networks", 1, 3), ("Networks", 2, 3)]
    );

    let selection: GroupSelection = ["M1", "M2"].into_iter().collect();
    let view = render_view(
        &feed,
        &ViewState::new(ViewMode::Daily),
        &selection,
        date,
        &TimelineScale::default(),
    );
    assert_eq!(view.days[0].events.len(), 4);
    assert_eq!(view.days[1].events.len(), 1);
    assert!(view.can_go_next);
}

#[test]
fn malformed_feed_entries_are_skipped_not_fatal() {
    let feed = Feed::from_json(
        r#"{
            "events": [
                {"g": "M2", "t": "Compilers", "st": "09:00", "et": "10:00", "sd": "14/10/2025"},
                {"g": "M2", "t": "Null start", "st": null, "et": "10:00", "sd": "14/10/2025"},
                {"g": "M2", "t": "No end", "st": "09:30", "sd": "14/10/2025"},
                {"g": "M2", "t": "Numeric", "st": 930, "et": 1030, "sd": "14/10/2025"},
                {"g": "M2", "t": "Padded", "st": " 9:30", "et": "10:30", "sd": "14/10/2025"},
                {"g": "M2", "t": "Networks", "st": "09:30", "et": "10:30", "sd": "14/10/2025"},
                42
            ],
            "meta": {"w": 1}
        }"#,
    )
    .unwrap();

    let date = NaiveDate::from_ymd_opt(2025, 10, 14).unwrap();
    let day = render_day(&feed.events, date, &GroupSelection::default(), &TimelineScale::default());

    assert_eq!(
        columns(&day.events),
        [("Compilers", 0, 2), ("Networks", 1, 2)]
    );
}

#[test]
fn far_offsets_render_no_days() {
    let feed = Feed::default();
    let state = ViewState {
        mode: ViewMode::Weekly,
        offset_days: 1_000_000_000,
    };
    let today = NaiveDate::from_ymd_opt(2025, 10, 14).unwrap();

    let view = render_view(
        &feed,
        &state,
        &GroupSelection::default(),
        today,
        &TimelineScale::default(),
    );
    assert!(view.days.is_empty());
    assert!(view.can_go_previous);
    assert!(!view.can_go_next);
}
