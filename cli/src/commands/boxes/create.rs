//! # boxctl Box Creation Handler
//!
//! File: cli/src/commands/boxes/create.rs
//!
//! ## Overview
//!
//! Implements `boxctl box create`. The arguments are collected into
//! [`CreateOptions`] and handed to the backend; whatever text the tool (or the
//! mock) produced is printed as-is. A failed creation is reported through that
//! text, not through the exit status.
//!
//! ```bash
//! boxctl box create devbox --image docker.io/library/alpine:latest
//! boxctl box create sysbox -i quay.io/toolbx/arch-toolbox --init \
//!     --home ~/boxes/sysbox --volume /data:/data
//! ```
//!
use crate::common::distrobox::{Backend, CreateOptions};
use crate::core::error::Result;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Create a box from an image")]
pub struct CreateArgs {
    /// Name of the new box.
    name: String,

    /// Image reference to create the box from.
    #[arg(long, short)]
    image: String,

    /// Custom home directory for the box.
    #[arg(long)]
    home: Option<String>,

    /// Run a full init system inside the box.
    #[arg(long)]
    init: bool,

    /// Extra mount, `host:container[:opts]`. Repeatable.
    #[arg(long = "volume", value_name = "VOLUME")]
    volumes: Vec<String>,
}

impl From<CreateArgs> for CreateOptions {
    fn from(args: CreateArgs) -> Self {
        Self {
            name: args.name,
            image: args.image,
            home: args.home.map(|h| shellexpand::tilde(&h).into_owned()),
            init: args.init,
            volumes: args.volumes,
        }
    }
}

pub async fn handle_create<B: Backend>(args: CreateArgs, backend: &B) -> Result<()> {
    let options = CreateOptions::from(args);
    info!("Creating box '{}' from '{}'", options.name, options.image);
    println!("{}", backend.create(&options).await);
    Ok(())
}
