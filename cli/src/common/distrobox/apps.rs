//! # Application Inventory
//!
//! File: cli/src/common/distrobox/apps.rs
//!
//! ## Overview
//!
//! An application in a box is either *exported* (a launcher file for it exists
//! on the host) or *available* (its launcher exists only inside the box). That
//! membership is never stored; it is recomputed from two independent sources
//! each time it is asked for:
//!
//! - **Exported set**: host launcher files named `{box}-{app}.desktop` in the
//!   user's application directory. Pure filesystem read.
//! - **Installed set**: `find <dir> -name '*.desktop'` run inside the box through
//!   the container tool.
//!
//! The "can still be exported" view is `installed - exported`.
//!
//! ## Consistency
//!
//! The two reads are not atomic. If an export or unexport finishes between
//! them, the difference reflects a state that never existed. Callers that show
//! the result should refresh after every mutation instead of patching it.
//!
use crate::core::error::Result;
use anyhow::Context;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, instrument};

/// File suffix of launcher files, on the host and in containers.
pub const LAUNCHER_SUFFIX: &str = ".desktop";

/// Reads the apps of `box_name` that have a launcher in `applications_dir`.
///
/// A missing directory means nothing is exported. Results are sorted.
#[instrument(skip(applications_dir), fields(dir = %applications_dir.display()))]
pub fn exported_from_dir(applications_dir: &Path, box_name: &str) -> Result<Vec<String>> {
    let entries = match fs::read_dir(applications_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("Launcher directory does not exist, nothing exported");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(e).with_context(|| {
                format!(
                    "Failed to read launcher directory: {}",
                    applications_dir.display()
                )
            })
        }
    };

    let prefix = format!("{}-", box_name);
    let mut apps = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| {
            format!(
                "Failed to read entry in launcher directory: {}",
                applications_dir.display()
            )
        })?;
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        if let Some(app) = launcher_app_name(file_name, &prefix) {
            apps.push(app.to_string());
        }
    }
    apps.sort();
    debug!("Found {} exported app(s)", apps.len());
    Ok(apps)
}

// `{prefix}{app}.desktop` -> `app`; anything else -> None.
fn launcher_app_name<'a>(file_name: &'a str, prefix: &str) -> Option<&'a str> {
    file_name
        .strip_prefix(prefix)?
        .strip_suffix(LAUNCHER_SUFFIX)
        .filter(|app| !app.is_empty())
}

/// Parses the output of the in-container `find`: one launcher path per line.
pub fn parse_find_output(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let base = line.rsplit('/').next().unwrap_or(line);
            base.strip_suffix(LAUNCHER_SUFFIX).unwrap_or(base).to_string()
        })
        .filter(|app| !app.is_empty())
        .collect()
}

/// `available - exported`, keeping the order of `available` and dropping duplicates.
pub fn not_exported(available: &[String], exported: &[String]) -> Vec<String> {
    let exported: HashSet<&str> = exported.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();
    available
        .iter()
        .filter(|app| !exported.contains(app.as_str()))
        .filter(|app| seen.insert(*app))
        .cloned()
        .collect()
}
