mod columns;
mod error;
mod freshness;
mod groups;
mod layout;
mod parser;
mod partition;
mod structs;
mod time;
mod view;

pub use columns::assign_columns;
pub use error::FeedError;
pub use freshness::Freshness;
pub use groups::{unique_groups, GroupSelection};
pub use layout::{layout_day, render_day, HourMark, TimelineScale};
pub use parser::parse_feed_date;
pub use partition::{collision_blocks, CollisionBlock};
pub use structs::{
    ColumnAssignment, DayLayout, Feed, FeedMeta, LaidOutEvent, NormalizedEvent, RawEvent,
};
pub use time::{normalize, parse_time};
pub use view::{render_view, ViewLayout, ViewMode, ViewState};
