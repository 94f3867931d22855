//! # boxctl Session Handlers
//!
//! File: cli/src/commands/boxes/session.rs
//!
//! ## Overview
//!
//! Implements `boxctl box enter`, `boxctl box upgrade` and `boxctl box run`.
//! Each one starts a process and returns at once with a [`DetachedLaunch`]
//! receipt. boxctl never waits for the session and never learns how it ended.
//!
//! ```bash
//! boxctl box enter devbox
//! boxctl box upgrade --all
//! boxctl box run devbox -- code --new-window
//! ```
//!
use crate::common::distrobox::{Backend, DetachedLaunch};
use crate::core::error::Result;
use anyhow::bail;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "Open a terminal inside a box")]
pub struct EnterArgs {
    /// Name of the box.
    name: String,
}

#[derive(Parser, Debug)]
#[command(about = "Open a terminal upgrading a box, or every box")]
pub struct UpgradeArgs {
    /// Name of the box to upgrade.
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    name: Option<String>,

    /// Upgrade every box.
    #[arg(long, short)]
    all: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Start a command inside a box without a terminal")]
pub struct RunArgs {
    /// Name of the box.
    name: String,

    /// Command and arguments to run, after `--`.
    #[arg(last = true, required = true, num_args = 1..)]
    command: Vec<String>,
}

fn report(receipt: &DetachedLaunch, what: &str) {
    match receipt.pid {
        Some(pid) => println!("Started {} with {} (pid {})", what, receipt.program, pid),
        None => println!("Started {} with {}", what, receipt.program),
    }
}

pub async fn handle_enter<B: Backend>(args: EnterArgs, backend: &B) -> Result<()> {
    let receipt = backend.enter(&args.name).await?;
    report(&receipt, &format!("session in '{}'", args.name));
    Ok(())
}

pub async fn handle_upgrade<B: Backend>(args: UpgradeArgs, backend: &B) -> Result<()> {
    let receipt = match (&args.name, args.all) {
        (_, true) => backend.upgrade_all().await?,
        (Some(name), false) => backend.upgrade(name).await?,
        (None, false) => bail!("Either a box name or --all is required"),
    };
    let target = args
        .name
        .map(|name| format!("upgrade of '{}'", name))
        .unwrap_or_else(|| "upgrade of all boxes".to_string());
    report(&receipt, &target);
    Ok(())
}

pub async fn handle_run<B: Backend>(args: RunArgs, backend: &B) -> Result<()> {
    let receipt = backend.run_in_box(&args.name, &args.command).await?;
    report(&receipt, &format!("'{}' in '{}'", args.command.join(" "), args.name));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::distrobox::mock::MockBackend;

    #[test]
    fn test_upgrade_args() {
        let args = UpgradeArgs::try_parse_from(["upgrade", "--all"]).unwrap();
        assert!(args.all);
        assert!(args.name.is_none());

        let args = UpgradeArgs::try_parse_from(["upgrade", "devbox"]).unwrap();
        assert_eq!(args.name.as_deref(), Some("devbox"));

        assert!(UpgradeArgs::try_parse_from(["upgrade"]).is_err());
        assert!(UpgradeArgs::try_parse_from(["upgrade", "devbox", "--all"]).is_err());
    }

    #[test]
    fn test_run_args_trailing_command() {
        let args =
            RunArgs::try_parse_from(["run", "devbox", "--", "code", "--new-window"]).unwrap();
        assert_eq!(args.name, "devbox");
        assert_eq!(args.command, vec!["code", "--new-window"]);

        assert!(RunArgs::try_parse_from(["run", "devbox"]).is_err());
    }

    #[tokio::test]
    async fn test_sessions_with_mock() {
        let backend = MockBackend::sample();
        let enter = EnterArgs::try_parse_from(["enter", "devbox"]).unwrap();
        assert!(handle_enter(enter, &backend).await.is_ok());

        let missing = EnterArgs::try_parse_from(["enter", "ghost"]).unwrap();
        assert!(handle_enter(missing, &backend).await.is_err());

        let all = UpgradeArgs::try_parse_from(["upgrade", "--all"]).unwrap();
        assert!(handle_upgrade(all, &backend).await.is_ok());
    }
}
