//! # boxctl Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point of the boxctl CLI. It:
//! - parses command-line arguments with Clap
//! - sets up logging from the verbosity flags (or `RUST_LOG`)
//! - constructs the selected backend once
//! - routes the command to its handler
//!
//! ## Architecture
//!
//! - Each command group (`box`, `app`, `image`) is a variant of `Commands`.
//! - Handlers are generic over `Backend`; `--backend` decides whether they see
//!   `LiveBackend` (the real tool, configured from `--config`/`--tool`/`--timeout`)
//!   or `MockBackend` (an in-memory store seeded with two sample boxes).
//! - Errors propagate up to `main`, which prints them and exits with status 1.
//!
//! ```bash
//! boxctl box list
//! boxctl -vv --timeout 30 app exportable devbox
//! boxctl --backend mock image search fedora
//! ```
//!
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod common;
mod core;

use crate::common::distrobox::{live::LiveBackend, mock::MockBackend, Backend, BackendKind};
use crate::core::config::{self, ConfigOverrides};
use crate::core::error::Result;

#[derive(Parser, Debug)]
#[command(
    name = "boxctl",
    about = "Manage distrobox containers, exported apps and base images",
    long_about = "Lists and creates distrobox containers, exports their applications to the host,\n\
                  browses the image catalog and opens terminal sessions inside boxes.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Backend to use.
    #[arg(long, value_enum, default_value_t = BackendKind::Live, global = true)]
    backend: BackendKind,

    /// Configuration file (defaults to the user config, if present).
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Container tool executable.
    #[arg(long, env = "BOXCTL_TOOL", global = true, value_name = "PROGRAM")]
    tool: Option<String>,

    /// Seconds to wait for each tool command.
    #[arg(long, env = "BOXCTL_TIMEOUT", global = true, value_name = "SECS")]
    timeout: Option<u64>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Inspect, create, remove and enter boxes.
    #[command(name = "box", alias = "b")]
    Boxes(commands::boxes::BoxArgs),
    /// Exported and installed applications of a box.
    #[command(name = "app", alias = "a")]
    Apps(commands::apps::AppArgs),
    /// The image catalog.
    #[command(name = "image", alias = "i")]
    Images(commands::images::ImageArgs),
}

async fn dispatch<B: Backend>(command: Commands, backend: &B) -> Result<()> {
    match command {
        Commands::Boxes(args) => commands::boxes::handle_box(args, backend).await,
        Commands::Apps(args) => commands::apps::handle_app(args, backend).await,
        Commands::Images(args) => commands::images::handle_image(args, backend).await,
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.backend {
        BackendKind::Live => {
            let overrides = ConfigOverrides {
                program: cli.tool,
                timeout_secs: cli.timeout,
            };
            let cfg = config::load_config(cli.config.as_deref(), &overrides)?;
            dispatch(cli.command, &LiveBackend::new(&cfg)).await
        }
        BackendKind::Mock => dispatch(cli.command, &MockBackend::sample()).await,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    if let Err(e) = run(cli).await {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_cmd::Command;
    use predicates::prelude::*;

    fn boxctl_cmd() -> Command {
        Command::cargo_bin("boxctl").expect("Failed to find boxctl binary for testing")
    }

    #[test]
    fn test_main_help_flag() {
        boxctl_cmd().arg("--help").assert().success();
    }

    #[test]
    fn test_main_version_flag() {
        boxctl_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "boxctl", "box", "list", "--backend", "mock", "--timeout", "5", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.backend, BackendKind::Mock);
        assert_eq!(cli.timeout, Some(5));
        assert_eq!(cli.verbose, 2);
    }
}
