//! Read-only state a table shares with its header, body and rows.
//!
//! The context is rebuilt from the builder on every frame. The only value
//! that outlives a frame is the body surface, kept in egui's temporary
//! memory under the table id: the body commits it after its layout and the
//! header of the next frame reads it back for gutter compensation.

use egui::{Context, Id, WidgetText};

use crate::body::BodyState;
use crate::template::ColumnTemplate;
use crate::theme::TableTheme;

/// Widths of the body's scrollable surface, measured after layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySurface {
    /// Width of the whole body, scroll bar included.
    pub outer_width: f32,
    /// Width left to the rows.
    pub client_width: f32,
}

impl BodySurface {
    /// Surface of a body without a scroll bar.
    pub const fn flush(width: f32) -> Self {
        Self {
            outer_width: width,
            client_width: width,
        }
    }

    /// Horizontal space taken by the vertical scroll bar.
    #[inline]
    pub fn scroll_gutter(&self) -> f32 {
        (self.outer_width - self.client_width).max(0.0)
    }
}

/// Configuration shared by one table with everything rendered inside it.
pub struct TableContext {
    pub(crate) id: Id,
    pub(crate) is_loading: bool,
    pub(crate) scroll_inside_body: bool,
    pub(crate) data_len: usize,
    pub(crate) template: ColumnTemplate,
    pub(crate) columns: Vec<f32>,
    pub(crate) loading_placeholder: WidgetText,
    pub(crate) row_height: f32,
    pub(crate) header_height: f32,
    pub(crate) theme: TableTheme,
    pub(crate) body_surface: Option<BodySurface>,
}

impl TableContext {
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn scroll_inside_body(&self) -> bool {
        self.scroll_inside_body
    }

    /// Number of records handed to the table.
    pub fn data_len(&self) -> usize {
        self.data_len
    }

    pub fn column_template(&self) -> &ColumnTemplate {
        &self.template
    }

    /// Column widths resolved for this frame, shared by the header and every row.
    pub fn columns(&self) -> &[f32] {
        &self.columns
    }

    pub fn loading_placeholder(&self) -> &WidgetText {
        &self.loading_placeholder
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    pub fn header_height(&self) -> f32 {
        self.header_height
    }

    pub fn theme(&self) -> &TableTheme {
        &self.theme
    }

    /// Body surface committed by the last laid out body, if any.
    pub fn body_surface(&self) -> Option<BodySurface> {
        self.body_surface
    }

    pub fn body_state(&self) -> BodyState {
        BodyState::new(self.is_loading, self.data_len)
    }

    /// Width of the body's vertical scroll bar.
    ///
    /// Zero when the page scrolls instead of the body, and before the body has
    /// been measured once.
    pub fn measure_scroll_gutter(&self) -> f32 {
        if !self.scroll_inside_body {
            return 0.0;
        }
        self.body_surface
            .map(|surface| surface.scroll_gutter())
            .unwrap_or(0.0)
    }
}

fn surface_id(table: Id) -> Id {
    table.with("body_surface")
}

pub(crate) fn load_surface(ctx: &Context, table: Id) -> Option<BodySurface> {
    ctx.data(|data| data.get_temp::<BodySurface>(surface_id(table)))
}

/// Stores a fresh measurement. Returns `true` when the gutter changed, in which
/// case a repaint is requested so the header catches up on the next frame.
pub(crate) fn commit_surface(ctx: &Context, table: Id, surface: BodySurface) -> bool {
    let previous = load_surface(ctx, table);
    if previous == Some(surface) {
        return false;
    }

    ctx.data_mut(|data| data.insert_temp(surface_id(table), surface));

    let previous_gutter = previous.map(|surface| surface.scroll_gutter()).unwrap_or(0.0);
    let gutter = surface.scroll_gutter();
    if previous_gutter == gutter {
        return false;
    }

    log::debug!("table {table:?}: scroll gutter {previous_gutter} -> {gutter}");
    ctx.request_repaint();
    true
}
