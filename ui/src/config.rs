//! Demo configuration read from `TABULA_*` environment variables.

use anyhow::Context as _;
use serde::Deserialize;
use std::env::vars;
use tabula_table::ColumnTemplate;

/// Prefix shared by every variable the demo reads.
pub const ENV_PREFIX: &str = "TABULA_";

pub const DEFAULT_ROWS: usize = 25;

/// Upper bound for generated records.
pub const MAX_ROWS: usize = 10_000;

/// Five tracks matching the sample record: id, name, email, role, joined.
pub const DEFAULT_COLUMNS: &str = "60px 2fr 3fr 1fr 120px";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    rows: usize,
    columns: ColumnTemplate,
    scroll_inside_body: bool,
    loading: bool,
}

// Every variable is optional; `Config::from_raw` fills in the defaults.
#[derive(Deserialize)]
struct RawConfig {
    rows: Option<usize>,
    columns: Option<String>,
    scroll_inside_body: Option<bool>,
    loading: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: default_columns(),
            scroll_inside_body: true,
            loading: false,
        }
    }
}

impl Config {
    pub fn init() -> anyhow::Result<Self> {
        log::info!("Loading configuration from {ENV_PREFIX}* environment variables");
        Self::from_vars(vars())
    }

    /// Builds the configuration from `(name, value)` pairs, ignoring names
    /// without the `TABULA_` prefix.
    pub fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> anyhow::Result<Self> {
        let raw: RawConfig = serde_env::from_iter(vars.into_iter().filter_map(|(name, value)| {
            name.strip_prefix(ENV_PREFIX).map(|name| (name.to_owned(), value))
        }))
        .context("Failed to read TABULA_* environment variables")?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> anyhow::Result<Self> {
        let RawConfig {
            rows,
            columns,
            scroll_inside_body,
            loading,
        } = raw;

        let rows = rows.unwrap_or(DEFAULT_ROWS);
        if rows > MAX_ROWS {
            anyhow::bail!("TABULA_ROWS must be at most {MAX_ROWS}, got {rows}");
        }

        let columns = match columns {
            Some(columns) => columns.parse().with_context(|| {
                format!("TABULA_COLUMNS is not a valid column template: {columns:?}")
            })?,
            None => default_columns(),
        };

        Ok(Self {
            rows,
            columns,
            scroll_inside_body: scroll_inside_body.unwrap_or(true),
            loading: loading.unwrap_or(false),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> &ColumnTemplate {
        &self.columns
    }

    pub fn scroll_inside_body(&self) -> bool {
        self.scroll_inside_body
    }

    pub fn loading(&self) -> bool {
        self.loading
    }
}

fn default_columns() -> ColumnTemplate {
    DEFAULT_COLUMNS.parse().unwrap_or_default()
}
