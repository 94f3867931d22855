//! # boxctl Image Command Group
//!
//! File: cli/src/commands/images/mod.rs
//!
//! ## Overview
//!
//! Entry point for `boxctl image`. Both subcommands read the image catalog the
//! tool knows about; `search` narrows it to entries whose name, reference or
//! distribution contains a query (case-insensitive).
//!
//! ```bash
//! boxctl image list
//! boxctl image search fedora --json
//! ```
//!
use crate::common::distrobox::{distro, Backend, ImageCatalogEntry};
use crate::common::ui;
use crate::core::error::Result;
use clap::{Parser, Subcommand};
use tracing::info;

/// Arguments for the `boxctl image` group.
#[derive(Parser, Debug)]
pub struct ImageArgs {
    #[command(subcommand)]
    command: ImageCommand,
}

#[derive(Subcommand, Debug)]
enum ImageCommand {
    /// List images boxes can be created from.
    #[command(alias = "ls")]
    List {
        /// Print the catalog as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Search the image catalog.
    Search {
        /// Case-insensitive text to look for.
        query: String,

        /// Print the matches as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Dispatches `boxctl image <subcommand>`.
pub async fn handle_image<B: Backend>(args: ImageArgs, backend: &B) -> Result<()> {
    let (entries, json) = match args.command {
        ImageCommand::List { json } => (backend.list_images().await?, json),
        ImageCommand::Search { query, json } => {
            info!("Searching image catalog for '{}'", query);
            (backend.search_images(&query).await?, json)
        }
    };

    if json {
        println!("{}", ui::to_json(&entries)?);
    } else if entries.is_empty() {
        println!("No images found.");
    } else {
        print!("{}", render(&entries));
    }
    Ok(())
}

fn render(entries: &[ImageCatalogEntry]) -> String {
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|e| {
            vec![
                e.name.clone(),
                distro::classify(&e.url).to_string(),
                e.url.clone(),
            ]
        })
        .collect();
    ui::render_table(&["NAME", "DISTRO", "REFERENCE"], &rows)
}
