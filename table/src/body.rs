//! Table body: loading and empty placeholders, or one row per record.

use egui::{Align, Layout, Rect, ScrollArea, Sense, Ui, UiBuilder, Vec2, WidgetText, vec2};

use crate::context::{BodySurface, TableContext};
use crate::row::{Row, show_row};

/// Populated bodies with fewer records than this shrink to fit their rows.
pub const SHRINK_THRESHOLD: usize = 10;

/// Placeholder shown for a table without records.
pub const EMPTY_LABEL: &str = "No Data Found";

/// Height a loading or empty placeholder asks for.
pub const PLACEHOLDER_HEIGHT: f32 = 96.0;

/// What the body shows this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyState {
    Loading,
    Empty,
    Populated(usize),
}

/// How much vertical space the body takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodySizing {
    /// Only as tall as the content.
    ShrinkToFit,
    /// All the height the parent offers.
    Fill,
}

impl BodyState {
    /// Loading wins over the data; no records means empty.
    pub fn new(is_loading: bool, len: usize) -> Self {
        match (is_loading, len) {
            (true, _) => Self::Loading,
            (false, 0) => Self::Empty,
            (false, len) => Self::Populated(len),
        }
    }

    pub fn sizing(&self) -> BodySizing {
        match self {
            Self::Loading => BodySizing::Fill,
            Self::Empty => BodySizing::ShrinkToFit,
            Self::Populated(len) => {
                if *len < SHRINK_THRESHOLD {
                    BodySizing::ShrinkToFit
                } else {
                    BodySizing::Fill
                }
            }
        }
    }

    /// Height of the content before the parent's space is taken into account.
    pub fn natural_height(&self, row_height: f32) -> f32 {
        match self {
            Self::Loading | Self::Empty => PLACEHOLDER_HEIGHT,
            Self::Populated(len) => *len as f32 * row_height,
        }
    }
}

/// Height of the body given its content height and the height left in the
/// parent.
///
/// A scrolling body never outgrows the parent. When the page scrolls the body
/// keeps at least its content height. An unbounded parent gets the content
/// height.
pub fn body_extent(
    sizing: BodySizing,
    scroll_inside_body: bool,
    natural: f32,
    remaining: f32,
) -> f32 {
    if !remaining.is_finite() {
        return natural;
    }
    let remaining = remaining.max(0.0);
    match (sizing, scroll_inside_body) {
        (BodySizing::ShrinkToFit, true) => natural.min(remaining),
        (BodySizing::ShrinkToFit, false) => natural,
        (BodySizing::Fill, true) => remaining,
        (BodySizing::Fill, false) => natural.max(remaining),
    }
}

/// Result of laying out the body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyLayout {
    pub state: BodyState,
    pub sizing: BodySizing,
    pub rect: Rect,
    /// Rows rendered this frame.
    pub rows: usize,
    /// Measured surface when the body scrolls on its own.
    pub surface: Option<BodySurface>,
}

pub(crate) fn show_body<T>(
    ui: &mut Ui,
    ctx: &TableContext,
    data: &[T],
    clip_top: Option<f32>,
    mut render: impl FnMut(&mut Row<'_, '_>, &T, usize),
) -> BodyLayout {
    let state = ctx.body_state();
    let sizing = state.sizing();
    let extent = body_extent(
        sizing,
        ctx.scroll_inside_body,
        state.natural_height(ctx.row_height),
        ui.available_height(),
    );
    let (rect, _) = ui.allocate_exact_size(vec2(ui.available_width(), extent), Sense::hover());

    // Rows scrolled under a sticky header stay hidden behind it.
    let mut clip = rect.intersect(ui.clip_rect());
    if let Some(top) = clip_top {
        clip.min.y = clip.min.y.max(top);
    }

    let mut body_ui = ui.new_child(
        UiBuilder::new()
            .max_rect(rect)
            .layout(Layout::top_down(Align::Min)),
    );
    body_ui.set_clip_rect(clip);
    body_ui.spacing_mut().item_spacing = Vec2::ZERO;

    let mut rows = 0;
    let surface = match state {
        BodyState::Loading | BodyState::Empty => {
            let text = if state == BodyState::Loading {
                ctx.loading_placeholder.clone()
            } else {
                WidgetText::from(EMPTY_LABEL)
            };
            body_ui.centered_and_justified(|ui| {
                ui.label(text);
            });
            ctx.scroll_inside_body.then_some(BodySurface::flush(rect.width()))
        }
        BodyState::Populated(_) if ctx.scroll_inside_body => {
            body_ui.spacing_mut().scroll = egui::style::ScrollStyle::solid();
            let output = ScrollArea::vertical()
                .id_salt(ctx.id.with("body"))
                .auto_shrink([false, false])
                .show(&mut body_ui, |ui| {
                    rows = show_rows(ui, ctx, data, &mut render);
                });
            Some(BodySurface {
                outer_width: rect.width(),
                client_width: output.inner_rect.width(),
            })
        }
        BodyState::Populated(_) => {
            rows = show_rows(&mut body_ui, ctx, data, &mut render);
            None
        }
    };

    log::trace!(
        "table {:?}: body {state:?} {sizing:?} at {rect:?}, {rows} rows",
        ctx.id
    );

    BodyLayout {
        state,
        sizing,
        rect,
        rows,
        surface,
    }
}

fn show_rows<T>(
    ui: &mut Ui,
    ctx: &TableContext,
    data: &[T],
    render: &mut impl FnMut(&mut Row<'_, '_>, &T, usize),
) -> usize {
    let stroke = ctx.theme.border_stroke();
    let last = data.len().saturating_sub(1);
    for (index, item) in data.iter().enumerate() {
        let (rect, _) =
            ui.allocate_exact_size(vec2(ui.available_width(), ctx.row_height), Sense::hover());
        show_row(ui, rect, &ctx.columns, Some(index), |row| {
            render(row, item, index);
        });
        if index < last {
            ui.painter().hline(rect.x_range(), rect.bottom(), stroke);
        }
    }
    data.len()
}
