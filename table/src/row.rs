//! A single row of cells laid out on the table's column widths.

use egui::{Align, Layout, Rect, Ui, UiBuilder, Vec2};
use egui_extras::{Size, Strip, StripBuilder};

/// Cells of one header or body row.
///
/// Every cell gets the width of its column track and the full row height,
/// with content vertically centered and clipped to the cell.
pub struct Row<'a, 'b> {
    strip: Strip<'a, 'b>,
    widths: &'a [f32],
    index: Option<usize>,
    cells: usize,
}

impl Row<'_, '_> {
    /// Adds the next cell.
    ///
    /// Cells past the last column track are skipped.
    pub fn cell(&mut self, add_contents: impl FnOnce(&mut Ui)) -> &mut Self {
        if self.cells < self.widths.len() {
            self.strip.cell(add_contents);
        } else {
            log::debug!(
                "skipping cell {} of row {:?}: template has {} columns",
                self.cells,
                self.index,
                self.widths.len()
            );
        }
        self.cells += 1;
        self
    }

    /// Leaves the next column empty.
    pub fn empty(&mut self) -> &mut Self {
        if self.cells < self.widths.len() {
            self.strip.empty();
        }
        self.cells += 1;
        self
    }

    /// Position of the record in the table data; `None` for the header row.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Column widths this row is laid out on.
    pub fn widths(&self) -> &[f32] {
        self.widths
    }
}

/// Lays out one row inside `rect` without allocating space in `ui`.
///
/// Returns the number of cells the caller asked for.
pub(crate) fn show_row(
    ui: &mut Ui,
    rect: Rect,
    widths: &[f32],
    index: Option<usize>,
    add_cells: impl FnOnce(&mut Row<'_, '_>),
) -> usize {
    let mut row_ui = ui.new_child(
        UiBuilder::new()
            .max_rect(rect)
            .layout(Layout::left_to_right(Align::Center)),
    );
    row_ui.set_clip_rect(rect.intersect(ui.clip_rect()));
    row_ui.spacing_mut().item_spacing = Vec2::ZERO;

    let builder = widths.iter().fold(
        StripBuilder::new(&mut row_ui)
            .clip(true)
            .cell_layout(Layout::left_to_right(Align::Center)),
        |builder, width| builder.size(Size::exact(*width)),
    );

    let mut cells = 0;
    builder.horizontal(|strip| {
        let mut row = Row {
            strip,
            widths,
            index,
            cells: 0,
        };
        add_cells(&mut row);
        cells = row.cells;
    });
    cells
}
