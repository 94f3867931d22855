//! # boxctl App Command Group
//!
//! File: cli/src/commands/apps/mod.rs
//!
//! ## Overview
//!
//! Entry point and router for `boxctl app`. These commands inspect and change
//! which applications of a box have a launcher on the host.
//!
//! - `exported BOX`: apps with a host launcher
//! - `installed BOX`: apps with a launcher inside the box
//! - `exportable BOX`: installed but not yet exported
//! - `export BOX APP...` / `unexport BOX APP...`
//!
//! ```bash
//! boxctl app exportable devbox
//! boxctl app export devbox htop nano
//! ```
//!
use crate::common::distrobox::Backend;
use crate::core::error::Result;
use clap::{Parser, Subcommand};

mod export;
mod list;

/// Arguments for the `boxctl app` group.
#[derive(Parser, Debug)]
pub struct AppArgs {
    #[command(subcommand)]
    command: AppCommand,
}

#[derive(Subcommand, Debug)]
enum AppCommand {
    /// List apps of a box exported to the host.
    Exported(list::AppListArgs),
    /// List apps installed in a box.
    Installed(list::AppListArgs),
    /// List apps installed in a box but not exported.
    Exportable(list::AppListArgs),
    /// Export apps of a box to the host.
    Export(export::ExportArgs),
    /// Remove exported apps of a box from the host.
    Unexport(export::ExportArgs),
}

/// Dispatches `boxctl app <subcommand>`.
pub async fn handle_app<B: Backend>(args: AppArgs, backend: &B) -> Result<()> {
    match args.command {
        AppCommand::Exported(args) => {
            list::handle_list(args, list::AppSet::Exported, backend).await
        }
        AppCommand::Installed(args) => {
            list::handle_list(args, list::AppSet::Installed, backend).await
        }
        AppCommand::Exportable(args) => {
            list::handle_list(args, list::AppSet::Exportable, backend).await
        }
        AppCommand::Export(args) => export::handle_export(args, backend).await,
        AppCommand::Unexport(args) => export::handle_unexport(args, backend).await,
    }
}
