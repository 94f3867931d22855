//! # boxctl Package Install Handler
//!
//! File: cli/src/commands/boxes/install.rs
//!
//! Implements `boxctl box install BOX FILE`. The package format is chosen from
//! the box's image (deb, rpm or Arch); boxes whose image gives no hint are
//! rejected before any terminal is opened.
//!
use crate::common::distrobox::Backend;
use crate::core::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Install a local package file inside a box")]
pub struct InstallArgs {
    /// Name of the box.
    name: String,

    /// Package file (.deb, .rpm or .pkg.tar.zst).
    package: PathBuf,
}

pub async fn handle_install<B: Backend>(args: InstallArgs, backend: &B) -> Result<()> {
    let package = std::path::absolute(&args.package).unwrap_or(args.package);
    let receipt = backend.install_package(&args.name, &package).await?;
    println!(
        "Installing {} in '{}' with {}",
        package.display(),
        args.name,
        receipt.program
    );
    Ok(())
}
