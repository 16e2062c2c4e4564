#![warn(clippy::all, rust_2018_idioms)]
//! A composable egui table: a bordered root sharing one column template with
//! its header and rows, a body with loading and empty placeholders, and a
//! header that stays aligned with a scrolling body or sticks to the top of a
//! scrolling page.

mod body;
mod context;
mod header;
mod row;
mod table;
mod template;
mod theme;

pub use body::{
    BodyLayout, BodySizing, BodyState, EMPTY_LABEL, PLACEHOLDER_HEIGHT, SHRINK_THRESHOLD,
    body_extent,
};
pub use context::{BodySurface, TableContext};
pub use header::{HeaderLayout, HeaderPlacement, sticky_top};
pub use row::Row;
pub use table::{
    DEFAULT_HEADER_HEIGHT, DEFAULT_LOADING_LABEL, DEFAULT_ROW_HEIGHT, Table, TableLayout,
    TableResponse, TableUi,
};
pub use template::{
    Breadth, ColumnTemplate, DEFAULT_COLUMN_TEMPLATE, MAX_REPEAT_COUNT, MAX_TRACKS, TemplateError,
    Track, TrackMax,
};
pub use theme::TableTheme;
