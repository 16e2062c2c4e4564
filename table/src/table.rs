//! Table root: builder, shared context and the handle given to its contents.

use std::hash::Hash;

use egui::{
    Align, Id, Layout, Rect, Response, Sense, StrokeKind, Ui, UiBuilder, Vec2, WidgetText, vec2,
};

use crate::body::{BodyLayout, show_body};
use crate::context::{TableContext, commit_surface, load_surface};
use crate::header::{HeaderLayout, HeaderPlacement, show_header};
use crate::row::Row;
use crate::template::ColumnTemplate;
use crate::theme::TableTheme;

pub const DEFAULT_LOADING_LABEL: &str = "Loading...";
pub const DEFAULT_ROW_HEIGHT: f32 = 30.0;
pub const DEFAULT_HEADER_HEIGHT: f32 = 24.0;

/// A bordered table filling the space it is given.
///
/// ```no_run
/// # egui::__run_test_ui(|ui| {
/// let users = ["ada", "grace"];
/// tabula_table::Table::new(&users)
///     .column_template("40px 1fr".parse().unwrap_or_default())
///     .show(ui, |table| {
///         table.header(|row| {
///             row.cell(|ui| {
///                 ui.strong("#");
///             })
///             .cell(|ui| {
///                 ui.strong("Name");
///             });
///         });
///         table.body(|row, name, index| {
///             row.cell(|ui| {
///                 ui.label(index.to_string());
///             })
///             .cell(|ui| {
///                 ui.label(*name);
///             });
///         });
///     });
/// # });
/// ```
pub struct Table<'a, T> {
    data: &'a [T],
    id_salt: Id,
    is_loading: bool,
    scroll_inside_body: bool,
    column_template: ColumnTemplate,
    loading_placeholder: WidgetText,
    row_height: f32,
    header_height: f32,
    theme: Option<TableTheme>,
}

impl<'a, T> Table<'a, T> {
    pub fn new(data: &'a [T]) -> Self {
        Self {
            data,
            id_salt: Id::new("tabula_table"),
            is_loading: false,
            scroll_inside_body: true,
            column_template: ColumnTemplate::default(),
            loading_placeholder: DEFAULT_LOADING_LABEL.into(),
            row_height: DEFAULT_ROW_HEIGHT,
            header_height: DEFAULT_HEADER_HEIGHT,
            theme: None,
        }
    }

    /// Tells tables in the same parent apart.
    #[inline]
    pub fn id_salt(mut self, id_salt: impl Hash) -> Self {
        self.id_salt = Id::new(id_salt);
        self
    }

    /// Shows the loading placeholder instead of the records.
    #[inline]
    pub fn loading(mut self, is_loading: bool) -> Self {
        self.is_loading = is_loading;
        self
    }

    /// `true` scrolls the body on its own below a fixed header, `false` leaves
    /// scrolling to an ancestor and makes the header sticky.
    #[inline]
    pub fn scroll_inside_body(mut self, scroll_inside_body: bool) -> Self {
        self.scroll_inside_body = scroll_inside_body;
        self
    }

    #[inline]
    pub fn column_template(mut self, column_template: ColumnTemplate) -> Self {
        self.column_template = column_template;
        self
    }

    #[inline]
    pub fn loading_placeholder(mut self, placeholder: impl Into<WidgetText>) -> Self {
        self.loading_placeholder = placeholder.into();
        self
    }

    #[inline]
    pub fn row_height(mut self, row_height: f32) -> Self {
        self.row_height = row_height;
        self
    }

    #[inline]
    pub fn header_height(mut self, header_height: f32) -> Self {
        self.header_height = header_height;
        self
    }

    /// Overrides the palette picked from the current visuals.
    #[inline]
    pub fn theme(mut self, theme: TableTheme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn show<R>(
        self,
        ui: &mut Ui,
        add_contents: impl FnOnce(&mut TableUi<'_, 'a, T>) -> R,
    ) -> TableResponse<R> {
        let id = ui.make_persistent_id(self.id_salt);
        let theme = self
            .theme
            .unwrap_or_else(|| TableTheme::from_visuals(ui.visuals()));
        let stroke = theme.border_stroke();

        let outer = ui.available_rect_before_wrap();
        let inner = outer.shrink(stroke.width);

        let body_surface = if self.scroll_inside_body {
            load_surface(ui.ctx(), id)
        } else {
            None
        };

        let mut context = TableContext {
            id,
            is_loading: self.is_loading,
            scroll_inside_body: self.scroll_inside_body,
            data_len: self.data.len(),
            template: self.column_template,
            columns: Vec::new(),
            loading_placeholder: self.loading_placeholder,
            row_height: self.row_height,
            header_height: self.header_height,
            theme,
            body_surface,
        };
        let scroll_gutter = context.measure_scroll_gutter();
        context.columns = context.template.resolve(inner.width() - scroll_gutter);

        let mut content_ui = ui.new_child(
            UiBuilder::new()
                .id_salt(id.with("content"))
                .max_rect(inner)
                .layout(Layout::top_down(Align::Min)),
        );
        content_ui.spacing_mut().item_spacing = Vec2::ZERO;

        let mut table_ui = TableUi {
            ui: &mut content_ui,
            context: &context,
            data: self.data,
            header: None,
            body: None,
        };
        let inner_response = add_contents(&mut table_ui);
        let (header, body) = (table_ui.header, table_ui.body);

        let content_height = content_ui.min_rect().height() + 2.0 * stroke.width;
        let height = if outer.height().is_finite() {
            outer.height().max(content_height)
        } else {
            content_height
        };
        let rect = Rect::from_min_size(outer.min, vec2(outer.width(), height));

        ui.painter().rect_stroke(rect, 0.0, stroke, StrokeKind::Inside);
        let response = ui.allocate_rect(rect, Sense::hover());

        if let Some(surface) = body.and_then(|body| body.surface) {
            commit_surface(ui.ctx(), id, surface);
        }

        TableResponse {
            inner: inner_response,
            response,
            layout: TableLayout {
                columns: context.columns,
                scroll_gutter,
                header,
                body,
            },
        }
    }
}

/// Handle passed to the contents of [`Table::show`].
pub struct TableUi<'t, 'a, T> {
    ui: &'t mut Ui,
    context: &'t TableContext,
    data: &'a [T],
    header: Option<HeaderLayout>,
    body: Option<BodyLayout>,
}

impl<T> TableUi<'_, '_, T> {
    pub fn context(&self) -> &TableContext {
        self.context
    }

    /// The table's content area, for anything besides the header and body.
    pub fn ui(&mut self) -> &mut Ui {
        self.ui
    }

    /// Adds the header row.
    pub fn header(&mut self, add_cells: impl FnOnce(&mut Row<'_, '_>)) -> HeaderPlacement {
        let layout = show_header(self.ui, self.context, add_cells);
        self.header = Some(layout);
        layout.placement
    }

    /// Adds the body, calling `render` once per record in order.
    pub fn body(&mut self, render: impl FnMut(&mut Row<'_, '_>, &T, usize)) -> BodyLayout {
        let clip_top = self
            .header
            .filter(|header| header.placement.is_sticky())
            .map(|header| header.rect.bottom());
        let layout = show_body(self.ui, self.context, self.data, clip_top, render);
        self.body = Some(layout);
        layout
    }
}

/// Where the parts of a table ended up this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    pub columns: Vec<f32>,
    /// Gutter the header was padded with.
    pub scroll_gutter: f32,
    pub header: Option<HeaderLayout>,
    pub body: Option<BodyLayout>,
}

pub struct TableResponse<R> {
    pub inner: R,
    pub response: Response,
    pub layout: TableLayout,
}
