//! Header row: column titles on the shared widths.

use egui::{Rect, Sense, Ui, pos2, vec2};

use crate::body::body_extent;
use crate::context::TableContext;
use crate::row::{Row, show_row};

/// Where the header ended up this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeaderPlacement {
    /// In place above the scrolling body, padded on the right by the body's
    /// scroll gutter so the columns line up with the rows.
    Aligned { right_padding: f32 },
    /// Pinned to the top of the scrolling ancestor's visible area.
    Sticky { top: f32 },
}

impl HeaderPlacement {
    pub fn right_padding(&self) -> f32 {
        match self {
            Self::Aligned { right_padding } => *right_padding,
            Self::Sticky { .. } => 0.0,
        }
    }

    pub fn is_sticky(&self) -> bool {
        matches!(self, Self::Sticky { .. })
    }
}

/// Header placement and the rect it was painted in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderLayout {
    pub placement: HeaderPlacement,
    pub rect: Rect,
    /// Number of cells the caller added.
    pub cells: usize,
}

/// Top edge of a sticky header.
///
/// Follows the visible top of the scroll ancestor without leaving the table:
/// never above its slot, never past the point where its bottom meets the
/// table bottom.
pub fn sticky_top(
    natural_top: f32,
    visible_top: f32,
    table_bottom: f32,
    header_height: f32,
) -> f32 {
    let limit = (table_bottom - header_height).max(natural_top);
    visible_top.clamp(natural_top, limit)
}

pub(crate) fn show_header(
    ui: &mut Ui,
    ctx: &TableContext,
    add_cells: impl FnOnce(&mut Row<'_, '_>),
) -> HeaderLayout {
    let width = ui.available_width();
    let (slot, _) = ui.allocate_exact_size(vec2(width, ctx.header_height), Sense::hover());

    let placement = if ctx.scroll_inside_body {
        HeaderPlacement::Aligned {
            right_padding: ctx.measure_scroll_gutter(),
        }
    } else {
        let state = ctx.body_state();
        let remaining = ui.max_rect().bottom() - slot.bottom();
        let body_height = body_extent(
            state.sizing(),
            false,
            state.natural_height(ctx.row_height),
            remaining,
        );
        HeaderPlacement::Sticky {
            top: sticky_top(
                slot.top(),
                ui.clip_rect().top(),
                slot.bottom() + body_height,
                ctx.header_height,
            ),
        }
    };

    let rect = match placement {
        HeaderPlacement::Aligned { .. } => slot,
        HeaderPlacement::Sticky { top } => slot.translate(vec2(0.0, top - slot.top())),
    };

    let painter = ui.painter();
    painter.rect_filled(rect, 0.0, ctx.theme.surface);
    painter.hline(rect.x_range(), rect.bottom(), ctx.theme.border_stroke());

    let cells_rect = Rect::from_min_max(
        rect.min,
        pos2(rect.right() - placement.right_padding(), rect.bottom()),
    );
    let cells = show_row(ui, cells_rect, &ctx.columns, None, add_cells);

    HeaderLayout {
        placement,
        rect,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sticky_header_stays_in_its_slot_until_scrolled_past() {
        assert_eq!(sticky_top(100.0, 0.0, 800.0, 24.0), 100.0);
        assert_eq!(sticky_top(100.0, 100.0, 800.0, 24.0), 100.0);
    }

    #[test]
    fn sticky_header_follows_the_visible_top() {
        assert_eq!(sticky_top(100.0, 350.0, 800.0, 24.0), 350.0);
    }

    #[test]
    fn sticky_header_stops_at_the_table_bottom() {
        assert_eq!(sticky_top(100.0, 900.0, 800.0, 24.0), 776.0);
    }

    #[test]
    fn sticky_header_handles_tables_shorter_than_the_header() {
        assert_eq!(sticky_top(100.0, 300.0, 110.0, 24.0), 100.0);
    }

    #[test]
    fn only_aligned_headers_are_padded() {
        assert_eq!(
            HeaderPlacement::Aligned { right_padding: 12.0 }.right_padding(),
            12.0
        );
        assert_eq!(HeaderPlacement::Sticky { top: 40.0 }.right_padding(), 0.0);
        assert!(HeaderPlacement::Sticky { top: 40.0 }.is_sticky());
    }
}
