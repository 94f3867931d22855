//! # boxctl Box Removal Handler
//!
//! File: cli/src/commands/boxes/rm.rs
//!
//! ## Overview
//!
//! Implements `boxctl box rm`, which force-removes one or more boxes.
//!
//! ## Architecture
//!
//! 1. One `Backend::delete` future is created per name.
//! 2. The futures are driven concurrently with `futures_util::future::join_all`.
//! 3. Each result text is printed under the name it belongs to, in argument order.
//!
//! Removal failures come back as text from the tool, so the command itself
//! only fails on bad arguments.
//!
//! ```bash
//! boxctl box rm scratch
//! boxctl box rm old1 old2 old3
//! ```
//!
use crate::common::distrobox::Backend;
use crate::core::error::Result;
use clap::Parser;
use futures_util::future::join_all;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Remove one or more boxes")]
pub struct RmArgs {
    /// Names of the boxes to remove.
    #[arg(required = true, num_args = 1..)]
    names: Vec<String>,
}

pub async fn handle_rm<B: Backend>(args: RmArgs, backend: &B) -> Result<()> {
    info!("Handling box rm command (names: {:?})", args.names);
    let outputs = join_all(args.names.iter().map(|name| backend.delete(name))).await;

    let single = args.names.len() == 1;
    for (name, output) in args.names.iter().zip(outputs) {
        if single {
            println!("{}", output);
        } else {
            println!("{}: {}", name, output);
        }
    }
    Ok(())
}
