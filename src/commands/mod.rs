//! Command handlers for the CLI
//!
//! This module provides the handlers invoked by the CLI entrypoint.
//! They are intentionally small: each one calls the typed API services
//! and renders the result as a table (or raw JSON with `--json`).

pub mod auth;
pub mod categories;
pub mod items;
pub mod usages;

use chrono::{DateTime, Utc};

/// Formats an optional timestamp for table output.
pub(crate) fn format_time(time: Option<&DateTime<Utc>>) -> String {
    match time {
        Some(t) => t.format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}

/// Colors an item status for table output.
pub(crate) fn colored_status(status: &str) -> colored::ColoredString {
    use colored::Colorize;
    match status {
        "available" => status.green(),
        "in_use" => status.yellow(),
        "damaged" | "lost" | "prohibited" => status.red(),
        _ => status.normal(),
    }
}
