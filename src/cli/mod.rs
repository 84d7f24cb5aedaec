//! CLI command handlers

pub mod commands;

pub use commands::{check, extract, render_report, template, OutputFormat};
