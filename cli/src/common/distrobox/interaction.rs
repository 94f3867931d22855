//! # Interactive Sessions
//!
//! File: cli/src/common/distrobox/interaction.rs
//!
//! ## Overview
//!
//! Entering a box, upgrading it or installing a package needs a human at a
//! terminal. These operations open a terminal emulator running the right tool
//! command and return immediately. The terminal is never waited on; its exit
//! status is never collected.
//!
//! `run_in_box` is the one exception that needs no terminal: it starts a
//! command inside the box directly, equally unsupervised.
//!
//! ## Architecture
//!
//! - Command builders (`enter_command`, `upgrade_command`, ...) produce the tool
//!   invocation as an argument vector.
//! - `TerminalLauncher` picks a terminal (`common::system::terminal`), wraps the
//!   invocation for it and hands it to `CommandRunner::spawn_detached`.
//!
use super::{distro::PackageKind, DetachedLaunch};
use crate::common::process::CommandRunner;
use crate::common::system::terminal;
use crate::core::error::Result;
use std::path::Path;
use tracing::info;

pub fn enter_command(program: &str, box_name: &str) -> Vec<String> {
    vec![program.to_string(), "enter".to_string(), box_name.to_string()]
}

pub fn upgrade_command(program: &str, box_name: &str) -> Vec<String> {
    vec![program.to_string(), "upgrade".to_string(), box_name.to_string()]
}

pub fn upgrade_all_command(program: &str) -> Vec<String> {
    vec![program.to_string(), "upgrade".to_string(), "--all".to_string()]
}

/// `<program> enter <box> -- <command...>`
pub fn run_command(program: &str, box_name: &str, command: &[String]) -> Vec<String> {
    let mut argv = vec![
        program.to_string(),
        "enter".to_string(),
        box_name.to_string(),
        "--".to_string(),
    ];
    argv.extend(command.iter().cloned());
    argv
}

pub fn install_command(program: &str, box_name: &str, kind: PackageKind, package: &Path) -> Vec<String> {
    run_command(
        program,
        box_name,
        &kind.install_command(&package.to_string_lossy()),
    )
}

/// Opens terminal windows running a command, without supervising them.
#[derive(Debug, Clone)]
pub struct TerminalLauncher {
    runner: CommandRunner,
    preferred: Option<String>,
}

impl TerminalLauncher {
    pub fn new(runner: CommandRunner, preferred: Option<String>) -> Self {
        Self { runner, preferred }
    }

    /// Opens a terminal running `command`.
    pub async fn launch(&self, command: &[String]) -> Result<DetachedLaunch> {
        let mut candidates: Vec<&str> = self.preferred.iter().map(String::as_str).collect();
        candidates.extend(terminal::KNOWN_TERMINALS.iter().map(|(name, _)| *name));
        let present = terminal::installed(&self.runner, &candidates).await;
        let term = terminal::select(self.preferred.as_deref(), |name| present.contains(name));
        let pid = self.runner.spawn_detached(&term.wrap(command))?;
        info!("Opened {} (pid {}) running {:?}", term.program, pid, command);
        Ok(DetachedLaunch {
            program: term.program,
            pid: Some(pid),
        })
    }

    /// Starts `command` directly, without a terminal.
    pub fn launch_headless(&self, command: &[String]) -> Result<DetachedLaunch> {
        let pid = self.runner.spawn_detached(command)?;
        info!("Started {:?} (pid {})", command, pid);
        Ok(DetachedLaunch {
            program: command.first().cloned().unwrap_or_default(),
            pid: Some(pid),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_session_commands() {
        assert_eq!(enter_command("distrobox", "devbox"), vec!["distrobox", "enter", "devbox"]);
        assert_eq!(upgrade_command("distrobox", "devbox"), vec!["distrobox", "upgrade", "devbox"]);
        assert_eq!(upgrade_all_command("distrobox"), vec!["distrobox", "upgrade", "--all"]);
    }

    #[test]
    fn test_run_command() {
        let command = vec!["code".to_string(), "--new-window".to_string()];
        assert_eq!(
            run_command("distrobox", "devbox", &command),
            vec!["distrobox", "enter", "devbox", "--", "code", "--new-window"]
        );
    }

    #[test]
    fn test_install_command() {
        assert_eq!(
            install_command("distrobox", "ubu", PackageKind::Deb, Path::new("/tmp/app.deb")),
            vec![
                "distrobox", "enter", "ubu", "--", "sudo", "apt", "install", "-y", "/tmp/app.deb"
            ]
        );
    }

    #[test]
    fn test_launch_headless_returns_receipt() {
        let launcher = TerminalLauncher::new(CommandRunner::new(Duration::from_secs(1), false), None);
        let receipt = launcher.launch_headless(&["true".to_string()]).unwrap();
        assert_eq!(receipt.program, "true");
        assert!(receipt.pid.is_some());
    }
}
