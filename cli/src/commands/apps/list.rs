//! # boxctl App Listing Handler
//!
//! File: cli/src/commands/apps/list.rs
//!
//! Prints one of the three application sets of a box, one name per line or as
//! a JSON array. The box must appear in the current listing; an unknown name
//! is an error rather than an empty list.
//!
use crate::common::distrobox::Backend;
use crate::common::ui;
use crate::core::error::Result;
use clap::Parser;
use tracing::debug;

#[derive(Parser, Debug)]
pub struct AppListArgs {
    /// Name of the box.
    name: String,

    /// Print the names as a JSON array.
    #[arg(long)]
    json: bool,
}

/// Which application set to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppSet {
    Exported,
    Installed,
    Exportable,
}

pub async fn handle_list<B: Backend>(args: AppListArgs, set: AppSet, backend: &B) -> Result<()> {
    backend.find_container(&args.name).await?;
    let apps = match set {
        AppSet::Exported => backend.exported_apps(&args.name).await?,
        AppSet::Installed => backend.container_apps(&args.name).await?,
        AppSet::Exportable => backend.exportable_apps(&args.name).await?,
    };
    debug!("{:?} apps of '{}': {:?}", set, args.name, apps);

    if args.json {
        println!("{}", ui::to_json(&apps)?);
    } else if apps.is_empty() {
        println!("No apps found.");
    } else {
        for app in &apps {
            println!("{}", app);
        }
    }
    Ok(())
}
