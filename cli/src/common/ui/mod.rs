//! # boxctl Terminal Output Helpers (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! Plain-text rendering shared by the listing commands: aligned tables and
//! JSON output for `--json`.
//!
use crate::core::error::Result;
use anyhow::Context;
use serde::Serialize;

/// Renders rows as a left-aligned table with a header and two-space gutters.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let format_row = |cells: &mut dyn Iterator<Item = &str>| {
        let line = cells
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ");
        line.trim_end().to_string()
    };

    let mut out = format_row(&mut headers.iter().copied());
    out.push('\n');
    for row in rows {
        out.push_str(&format_row(&mut row.iter().map(String::as_str)));
        out.push('\n');
    }
    out
}

/// Pretty-printed JSON for `--json` output.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output as JSON")
}
