use egui::{DragValue, ScrollArea, Ui};
use tabula_table::Table;

use crate::config::MAX_ROWS;
use crate::state::State;

pub struct TabulaApp {
    state: State,
}

impl TabulaApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self { state }
    }
}

impl eframe::App for TabulaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            toolbar(ui, &mut self.state);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            records_table(ui, &self.state);
        });
    }
}

/// Controls for the table's inputs.
pub fn toolbar(ui: &mut Ui, state: &mut State) {
    ui.horizontal_wrapped(|ui| {
        ui.checkbox(&mut state.loading, "Loading");
        ui.checkbox(&mut state.scroll_inside_body, "Scroll inside body");

        ui.separator();
        ui.label("Rows");
        let mut rows = state.rows();
        if ui
            .add(DragValue::new(&mut rows).range(0..=MAX_ROWS))
            .changed()
        {
            state.set_rows(rows);
        }

        ui.separator();
        ui.label("Columns");
        let mut input = state.template_input().to_owned();
        if ui.text_edit_singleline(&mut input).changed() {
            state.set_template_input(input);
        }
    });

    if let Some(err) = state.template_error() {
        ui.colored_label(ui.visuals().error_fg_color, err.to_string());
    }
}

/// The sample records table. Wrapped in a page scroll area when the body
/// does not scroll on its own.
pub fn records_table(ui: &mut Ui, state: &State) {
    if state.scroll_inside_body {
        show_table(ui, state);
    } else {
        ScrollArea::vertical()
            .id_salt("page_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| show_table(ui, state));
    }
}

fn show_table(ui: &mut Ui, state: &State) {
    Table::new(state.records())
        .id_salt("records")
        .loading(state.loading)
        .scroll_inside_body(state.scroll_inside_body)
        .column_template(state.template().clone())
        .show(ui, |table| {
            table.header(|row| {
                for title in ["ID", "Name", "Email", "Role", "Joined"] {
                    row.cell(|ui| {
                        ui.strong(title);
                    });
                }
            });
            table.body(|row, record, _| {
                row.cell(|ui| {
                    ui.label(record.id.to_string());
                })
                .cell(|ui| {
                    ui.label(record.name.as_str());
                })
                .cell(|ui| {
                    ui.label(record.email.as_str());
                })
                .cell(|ui| {
                    ui.label(record.role.to_string());
                })
                .cell(|ui| {
                    ui.weak(record.joined.as_str());
                });
            });
        });
}
