//! # boxctl Box Command Group
//!
//! File: cli/src/commands/boxes/mod.rs
//!
//! ## Overview
//!
//! Entry point and router for `boxctl box`. It defines the subcommands that
//! inspect, create, remove and open sessions in boxes, and delegates each one
//! to its handler module.
//!
//! ## Architecture
//!
//! - `BoxArgs`: top-level arguments for the group.
//! - `BoxCommand`: one variant per subcommand, holding that subcommand's args.
//! - `handle_box`: matches the subcommand and calls the handler with the backend.
//!
//! ## Examples
//!
//! ```bash
//! boxctl box list --running
//! boxctl box create devbox --image docker.io/library/alpine:latest --init
//! boxctl box enter devbox
//! boxctl box install ubu ./app.deb
//! boxctl box rm old1 old2
//! ```
//!
use crate::common::distrobox::Backend;
use crate::core::error::Result;
use clap::{Parser, Subcommand};

mod assemble;
mod create;
mod info;
mod install;
mod list;
mod rm;
mod session;

/// Arguments for the `boxctl box` group.
#[derive(Parser, Debug)]
pub struct BoxArgs {
    #[command(subcommand)]
    command: BoxCommand,
}

#[derive(Subcommand, Debug)]
enum BoxCommand {
    /// List all boxes.
    #[command(alias = "ls")]
    List(list::ListArgs),
    /// Show one box.
    Info(info::InfoArgs),
    /// Print the distribution of a box.
    Distro(info::DistroArgs),
    /// Create a box from an image.
    Create(create::CreateArgs),
    /// Create boxes from an assemble file.
    Assemble(assemble::AssembleArgs),
    /// Remove one or more boxes.
    Rm(rm::RmArgs),
    /// Open a terminal inside a box.
    Enter(session::EnterArgs),
    /// Open a terminal upgrading a box, or every box.
    Upgrade(session::UpgradeArgs),
    /// Start a command inside a box without a terminal.
    Run(session::RunArgs),
    /// Open a terminal installing a .deb, .rpm or Arch package file.
    Install(install::InstallArgs),
}

/// Dispatches `boxctl box <subcommand>`.
pub async fn handle_box<B: Backend>(args: BoxArgs, backend: &B) -> Result<()> {
    match args.command {
        BoxCommand::List(args) => list::handle_list(args, backend).await,
        BoxCommand::Info(args) => info::handle_info(args, backend).await,
        BoxCommand::Distro(args) => info::handle_distro(args, backend).await,
        BoxCommand::Create(args) => create::handle_create(args, backend).await,
        BoxCommand::Assemble(args) => assemble::handle_assemble(args, backend).await,
        BoxCommand::Rm(args) => rm::handle_rm(args, backend).await,
        BoxCommand::Enter(args) => session::handle_enter(args, backend).await,
        BoxCommand::Upgrade(args) => session::handle_upgrade(args, backend).await,
        BoxCommand::Run(args) => session::handle_run(args, backend).await,
        BoxCommand::Install(args) => install::handle_install(args, backend).await,
    }
}
