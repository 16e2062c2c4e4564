//! Behavior of a whole table: body states, sizing, header placement and
//! column sharing between header and rows.

use egui::{ScrollArea, Ui};
use egui_kittest::Harness;
use kittest::Queryable;
use tabula_table::{
    BodySizing, BodyState, ColumnTemplate, HeaderPlacement, Table, TableLayout, TableTheme,
};

struct Record {
    id: u32,
    name: String,
}

fn records(len: u32) -> Vec<Record> {
    (1..=len)
        .map(|id| Record {
            id,
            name: format!("user-{id}"),
        })
        .collect()
}

struct Probe {
    records: Vec<Record>,
    loading: bool,
    scroll_inside_body: bool,
    placeholder: Option<&'static str>,
    /// Wraps the table in a page scroll area scrolled to this offset.
    page_offset: Option<f32>,

    layout: Option<TableLayout>,
    rendered: Vec<(u32, usize)>,
    header_widths: Vec<f32>,
    row_widths: Vec<Vec<f32>>,
    visible_top: f32,
}

impl Probe {
    fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            loading: false,
            scroll_inside_body: true,
            placeholder: None,
            page_offset: None,
            layout: None,
            rendered: Vec::new(),
            header_widths: Vec::new(),
            row_widths: Vec::new(),
            visible_top: 0.0,
        }
    }

    fn loading(mut self) -> Self {
        self.loading = true;
        self
    }

    fn page_scroll(mut self, offset: f32) -> Self {
        self.scroll_inside_body = false;
        self.page_offset = Some(offset);
        self
    }

    fn layout(&self) -> &TableLayout {
        self.layout.as_ref().expect("table was shown")
    }
}

fn show_table(ui: &mut Ui, probe: &mut Probe) {
    let Probe {
        records,
        loading,
        scroll_inside_body,
        placeholder,
        layout,
        rendered,
        header_widths,
        row_widths,
        visible_top,
        ..
    } = probe;

    rendered.clear();
    row_widths.clear();
    *visible_top = ui.clip_rect().top();

    let mut table = Table::new(records)
        .loading(*loading)
        .scroll_inside_body(*scroll_inside_body)
        .column_template("60px 1fr".parse::<ColumnTemplate>().expect("valid template"));
    if let Some(placeholder) = placeholder {
        table = table.loading_placeholder(*placeholder);
    }

    let response = table.show(ui, |table| {
        table.header(|row| {
            header_widths.clear();
            header_widths.extend_from_slice(row.widths());
            row.cell(|ui| {
                ui.strong("ID");
            })
            .cell(|ui| {
                ui.strong("Name");
            });
        });
        table.body(|row, record, index| {
            rendered.push((record.id, index));
            row_widths.push(row.widths().to_vec());
            row.cell(|ui| {
                ui.label(record.id.to_string());
            })
            .cell(|ui| {
                ui.label(record.name.as_str());
            });
        });
    });
    *layout = Some(response.layout);
}

fn harness(probe: Probe) -> Harness<'static, Probe> {
    let mut harness = Harness::new_ui_state(
        |ui, probe: &mut Probe| match probe.page_offset {
            Some(offset) => {
                ScrollArea::vertical()
                    .vertical_scroll_offset(offset)
                    .show(ui, |ui| show_table(ui, probe));
            }
            None => show_table(ui, probe),
        },
        probe,
    );
    // Scroll bars fade in and the gutter settles one frame after the body.
    for _ in 0..30 {
        harness.step();
    }
    harness
}

#[test]
fn empty_table_shows_single_placeholder() {
    let harness = harness(Probe::new(Vec::new()));

    assert_eq!(harness.query_all_by_label("No Data Found").count(), 1);
    let body = harness.state().layout().body.expect("body laid out");
    assert_eq!(body.state, BodyState::Empty);
    assert_eq!(body.sizing, BodySizing::ShrinkToFit);
    assert_eq!(body.rows, 0);
    assert!(harness.state().rendered.is_empty());
}

#[test]
fn two_records_render_in_order_and_shrink() {
    let harness = harness(Probe::new(records(2)));

    let probe = harness.state();
    assert_eq!(probe.rendered, vec![(1, 0), (2, 1)]);
    assert!(harness.query_by_label("1").is_some());
    assert!(harness.query_by_label("2").is_some());
    assert!(harness.query_by_label("user-2").is_some());
    assert!(harness.query_by_label("No Data Found").is_none());

    let body = probe.layout().body.expect("body laid out");
    assert_eq!(body.state, BodyState::Populated(2));
    assert_eq!(body.sizing, BodySizing::ShrinkToFit);
    assert_eq!(body.rows, 2);
    assert_eq!(body.rect.height(), 2.0 * tabula_table::DEFAULT_ROW_HEIGHT);
}

#[test]
fn sizing_switches_to_fill_at_ten_records() {
    for (len, sizing) in [
        (9, BodySizing::ShrinkToFit),
        (10, BodySizing::Fill),
        (25, BodySizing::Fill),
    ] {
        let harness = harness(Probe::new(records(len)));
        let body = harness.state().layout().body.expect("body laid out");
        assert_eq!(body.sizing, sizing, "{len} records");
        assert_eq!(body.rows, len as usize, "{len} records");
    }
}

#[test]
fn loading_hides_data() {
    let harness = harness(Probe::new(records(3)).loading());

    assert_eq!(harness.query_all_by_label("Loading...").count(), 1);
    assert!(harness.query_by_label("user-1").is_none());
    assert!(harness.state().rendered.is_empty());

    let body = harness.state().layout().body.expect("body laid out");
    assert_eq!(body.state, BodyState::Loading);
    assert_eq!(body.sizing, BodySizing::Fill);
}

#[test]
fn loading_placeholder_is_configurable() {
    let mut probe = Probe::new(Vec::new()).loading();
    probe.placeholder = Some("Fetching users");
    let harness = harness(probe);

    assert!(harness.query_by_label("Fetching users").is_some());
    assert!(harness.query_by_label("Loading...").is_none());
    assert!(harness.query_by_label("No Data Found").is_none());
}

#[test]
fn scrolling_body_pads_header_by_gutter() {
    let harness = harness(Probe::new(records(50)));

    let layout = harness.state().layout();
    let surface = layout
        .body
        .and_then(|body| body.surface)
        .expect("scrolling body measured");
    let gutter = surface.scroll_gutter();
    assert!(gutter > 0.0, "scroll bar takes space");

    let header = layout.header.expect("header laid out");
    assert_eq!(
        header.placement,
        HeaderPlacement::Aligned {
            right_padding: gutter
        }
    );
    assert_eq!(layout.scroll_gutter, gutter);
}

#[test]
fn short_body_has_no_gutter() {
    let harness = harness(Probe::new(records(3)));

    let header = harness.state().layout().header.expect("header laid out");
    assert_eq!(header.placement.right_padding(), 0.0);
}

#[test]
fn header_and_rows_share_column_widths() {
    let harness = harness(Probe::new(records(12)));

    let probe = harness.state();
    assert_eq!(probe.header_widths.len(), 2);
    assert_eq!(probe.header_widths[0], 60.0);
    assert_eq!(probe.row_widths.len(), 12);
    for widths in &probe.row_widths {
        assert_eq!(widths, &probe.header_widths);
    }
    assert_eq!(probe.layout().columns, probe.header_widths);
}

#[test]
fn page_scroll_makes_header_sticky_without_padding() {
    let harness = harness(Probe::new(records(50)).page_scroll(0.0));

    let layout = harness.state().layout();
    let header = layout.header.expect("header laid out");
    assert!(header.placement.is_sticky());
    assert_eq!(header.placement.right_padding(), 0.0);
    assert_eq!(layout.scroll_gutter, 0.0);
    assert!(layout.body.and_then(|body| body.surface).is_none());
}

#[test]
fn sticky_header_follows_page_scroll() {
    let harness = harness(Probe::new(records(50)).page_scroll(300.0));

    let probe = harness.state();
    let header = probe.layout().header.expect("header laid out");
    let HeaderPlacement::Sticky { top } = header.placement else {
        panic!("expected a sticky header, got {:?}", header.placement);
    };
    assert!((top - probe.visible_top).abs() < 0.5, "{top} vs {}", probe.visible_top);
    assert!((header.rect.top() - top).abs() < 0.5);

    // The body was not clipped away: all rows were still rendered.
    assert_eq!(probe.rendered.len(), 50);
}

struct ContextSeen {
    is_loading: bool,
    scroll_inside_body: bool,
    template: String,
    placeholder: String,
    columns: Vec<f32>,
    gutter: f32,
    theme: TableTheme,
}

#[derive(Default)]
struct ContextProbe {
    seen: Option<ContextSeen>,
    layout: Option<TableLayout>,
}

#[test]
fn descendants_read_the_builder_configuration() {
    let data = records(3);
    let mut harness = Harness::new_ui_state(
        move |ui, probe: &mut ContextProbe| {
            let response = Table::new(&data)
                .id_salt("context")
                .column_template("repeat(2, 1fr) 90px".parse().expect("valid template"))
                .loading_placeholder("Please wait")
                .row_height(40.0)
                .header_height(32.0)
                .theme(TableTheme::dark())
                .show(ui, |table| {
                    table.header(|row| {
                        row.cell(|ui| {
                            ui.strong("ID");
                        });
                    });
                    table.body(|row, record, _| {
                        row.cell(|ui| {
                            ui.label(record.id.to_string());
                        });
                    });

                    let context = table.context();
                    probe.seen = Some(ContextSeen {
                        is_loading: context.is_loading(),
                        scroll_inside_body: context.scroll_inside_body(),
                        template: context.column_template().to_string(),
                        placeholder: context.loading_placeholder().text().to_owned(),
                        columns: context.columns().to_vec(),
                        gutter: context.measure_scroll_gutter(),
                        theme: *context.theme(),
                    });

                    table.ui().label("Showing 3 records");
                });
            probe.layout = Some(response.layout);
        },
        ContextProbe::default(),
    );
    for _ in 0..10 {
        harness.step();
    }

    assert!(harness.query_by_label("Showing 3 records").is_some());

    let probe = harness.state();
    let seen = probe.seen.as_ref().expect("context was read");
    let layout = probe.layout.as_ref().expect("table was shown");
    assert!(!seen.is_loading);
    assert!(seen.scroll_inside_body);
    assert_eq!(seen.template, "repeat(2, 1fr) 90px");
    assert_eq!(seen.placeholder, "Please wait");
    assert_eq!(seen.columns, layout.columns);
    assert_eq!(seen.columns.len(), 3);
    assert_eq!(seen.columns[2], 90.0);
    assert_eq!(seen.gutter, 0.0);
    assert_eq!(seen.gutter, layout.scroll_gutter);
    assert_eq!(seen.theme, TableTheme::dark());

    let header = layout.header.expect("header laid out");
    assert_eq!(header.rect.height(), 32.0);
    let body = layout.body.expect("body laid out");
    assert_eq!(body.rect.height(), 3.0 * 40.0);
    assert_eq!(body.rect.top(), header.rect.bottom());
}

struct LoadingToggle {
    loading: bool,
    placement: Option<HeaderPlacement>,
}

#[test]
fn loading_clears_gutter_padding() {
    let data = records(50);
    let mut harness = Harness::new_ui_state(
        move |ui, toggle: &mut LoadingToggle| {
            Table::new(&data)
                .id_salt("toggle")
                .loading(toggle.loading)
                .show(ui, |table| {
                    toggle.placement = Some(table.header(|row| {
                        row.cell(|ui| {
                            ui.strong("ID");
                        });
                    }));
                    table.body(|row, record, _| {
                        row.cell(|ui| {
                            ui.label(record.id.to_string());
                        });
                    });
                });
        },
        LoadingToggle {
            loading: false,
            placement: None,
        },
    );
    for _ in 0..30 {
        harness.step();
    }
    let padded = harness.state().placement.expect("header shown");
    assert!(padded.right_padding() > 0.0, "{padded:?}");

    harness.state_mut().loading = true;
    for _ in 0..5 {
        harness.step();
    }

    assert!(harness.query_by_label("Loading...").is_some());
    let placement = harness.state().placement.expect("header shown");
    assert_eq!(placement.right_padding(), 0.0);
    assert!(!placement.is_sticky());
}
