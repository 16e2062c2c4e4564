use std::fmt;

use tabula_table::{ColumnTemplate, TemplateError};

use crate::config::{Config, MAX_ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "Admin"),
            Self::Editor => write!(f, "Editor"),
            Self::Viewer => write!(f, "Viewer"),
        }
    }
}

/// One generated sample record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub joined: String,
}

const NAMES: [&str; 8] = [
    "ada", "grace", "alan", "edsger", "barbara", "ken", "margaret", "dennis",
];

impl Record {
    pub fn sample(id: u32) -> Self {
        let slot = id as usize;
        let name = NAMES[slot % NAMES.len()];
        let role = match slot % 5 {
            0 => Role::Admin,
            1 | 2 => Role::Editor,
            _ => Role::Viewer,
        };
        Self {
            id,
            name: format!("{name} #{id}"),
            email: format!("{name}.{id}@example.com"),
            role,
            joined: format!("2025-{:02}-{:02}", slot % 12 + 1, slot % 28 + 1),
        }
    }
}

/// Generates `rows` sample records with ids starting at 1.
pub fn sample_records(rows: usize) -> Vec<Record> {
    (1..=rows as u32).map(Record::sample).collect()
}

/// The demo application state.
pub struct State {
    /// Shows the loading placeholder instead of the records.
    pub loading: bool,
    /// Scrolls the table body instead of the page.
    pub scroll_inside_body: bool,
    records: Vec<Record>,
    template: ColumnTemplate,
    template_input: String,
    template_error: Option<TemplateError>,
}

impl Default for State {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl State {
    pub fn new(config: &Config) -> Self {
        Self {
            loading: config.loading(),
            scroll_inside_body: config.scroll_inside_body(),
            records: sample_records(config.rows()),
            template: config.columns().clone(),
            template_input: config.columns().to_string(),
            template_error: None,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn rows(&self) -> usize {
        self.records.len()
    }

    /// Regenerates the sample records when the count changes.
    pub fn set_rows(&mut self, rows: usize) {
        let rows = rows.min(MAX_ROWS);
        if rows != self.records.len() {
            log::debug!("regenerating {rows} sample records");
            self.records = sample_records(rows);
        }
    }

    /// Last template that parsed.
    pub fn template(&self) -> &ColumnTemplate {
        &self.template
    }

    pub fn template_input(&self) -> &str {
        &self.template_input
    }

    pub fn template_error(&self) -> Option<&TemplateError> {
        self.template_error.as_ref()
    }

    /// Takes the edited template text. A template that fails to parse is
    /// reported and the previous one stays in use.
    pub fn set_template_input(&mut self, input: String) {
        match input.parse::<ColumnTemplate>() {
            Ok(template) => {
                self.template = template;
                self.template_error = None;
            }
            Err(err) => {
                log::warn!("keeping column template {}: {err}", self.template);
                self.template_error = Some(err);
            }
        }
        self.template_input = input;
    }
}
