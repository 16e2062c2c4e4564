#![warn(clippy::all, rust_2018_idioms)]
//! Demo application for `tabula-table`.

pub mod app;
pub mod config;
pub mod state;

pub use app::TabulaApp;
