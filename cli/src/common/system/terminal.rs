//! # boxctl Terminal Emulator Selection
//!
//! File: cli/src/common/system/terminal.rs
//!
//! Interactive operations (entering a box, upgrading it, installing a package)
//! run inside a terminal window that boxctl starts and then forgets about. This
//! module decides *which* terminal and *how* to hand it a command, since every
//! emulator spells "run this" differently.
//!
//! Selection order: the configured terminal (if present on the host), then the
//! fixed priority list in [`KNOWN_TERMINALS`], then [`FALLBACK_TERMINAL`]
//! without probing. Presence is checked once for all candidates by
//! [`installed`], then [`select`] picks from the result.
//!
use crate::common::process::CommandRunner;
use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::Path;
use tracing::{debug, warn};

/// Used when no candidate is found on the host.
pub const FALLBACK_TERMINAL: &str = "xterm";

/// How a terminal takes the command it should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecStyle {
    /// `<flag>` followed by the program and its arguments as separate words.
    Trailing(&'static str),
    /// `<flag>` followed by one string holding the whole command line.
    Joined(&'static str),
}

/// Priority-ordered candidates probed on the host.
pub const KNOWN_TERMINALS: &[(&str, ExecStyle)] = &[
    ("gnome-terminal", ExecStyle::Trailing("--")),
    ("konsole", ExecStyle::Trailing("-e")),
    ("xfce4-terminal", ExecStyle::Trailing("-x")),
    ("lxterminal", ExecStyle::Joined("-e")),
    ("mate-terminal", ExecStyle::Trailing("-x")),
    ("tilix", ExecStyle::Joined("-e")),
    ("alacritty", ExecStyle::Trailing("-e")),
    ("kitty", ExecStyle::Trailing("--")),
    ("xterm", ExecStyle::Trailing("-e")),
];

/// A chosen terminal emulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terminal {
    pub program: String,
    pub style: ExecStyle,
}

impl Terminal {
    /// Looks up `program` in the known list; unknown terminals are assumed to take `-e`.
    pub fn named(program: &str) -> Self {
        let style = KNOWN_TERMINALS
            .iter()
            .find(|(name, _)| *name == program)
            .map(|(_, style)| *style)
            .unwrap_or(ExecStyle::Trailing("-e"));
        Self {
            program: program.to_string(),
            style,
        }
    }

    /// Full argument vector that opens this terminal running `command`.
    pub fn wrap(&self, command: &[String]) -> Vec<String> {
        let mut argv = vec![self.program.clone()];
        match self.style {
            ExecStyle::Trailing(flag) => {
                argv.push(flag.to_string());
                argv.extend(command.iter().cloned());
            }
            ExecStyle::Joined(flag) => {
                argv.push(flag.to_string());
                argv.push(join_command(command));
            }
        }
        argv
    }
}

/// Picks a terminal: `preferred` first, then the priority list, then the fallback.
///
/// `is_present` decides whether a candidate exists on the host.
pub fn select<F>(preferred: Option<&str>, is_present: F) -> Terminal
where
    F: Fn(&str) -> bool,
{
    if let Some(name) = preferred {
        if is_present(name) {
            debug!("Using configured terminal '{}'", name);
            return Terminal::named(name);
        }
        warn!("Configured terminal '{}' not found, probing others", name);
    }
    for (name, _) in KNOWN_TERMINALS {
        if is_present(name) {
            debug!("Detected terminal '{}'", name);
            return Terminal::named(name);
        }
    }
    warn!(
        "No known terminal found, falling back to '{}'",
        FALLBACK_TERMINAL
    );
    Terminal::named(FALLBACK_TERMINAL)
}

/// The subset of `candidates` that can be run on the host.
///
/// Inside a flatpak sandbox the sandbox PATH is irrelevant, so the host answers
/// a single `which` call covering every candidate (the runner adds the
/// `flatpak-spawn --host` prefix).
pub async fn installed(runner: &CommandRunner, candidates: &[&str]) -> HashSet<String> {
    if !runner.host_spawn() {
        return candidates
            .iter()
            .filter(|name| which::which(name).is_ok())
            .map(|name| name.to_string())
            .collect();
    }

    let mut argv = vec!["which"];
    argv.extend_from_slice(candidates);
    let output = runner.run(&argv).await;
    if output.timed_out() {
        warn!("Probing host terminals timed out");
    }
    found_in_which_output(&output.stdout, candidates)
}

// `which` prints one path per program it found and exits non-zero if any is missing.
fn found_in_which_output(stdout: &str, candidates: &[&str]) -> HashSet<String> {
    let paths: Vec<&Path> = stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Path::new)
        .collect();
    candidates
        .iter()
        .copied()
        .filter(|name| {
            paths
                .iter()
                .any(|path| *path == Path::new(name) || path.file_name() == Some(OsStr::new(name)))
        })
        .map(str::to_string)
        .collect()
}

fn join_command(command: &[String]) -> String {
    command
        .iter()
        .map(|word| quote_word(word))
        .collect::<Vec<_>>()
        .join(" ")
}

// POSIX single-quote escaping; plain words pass through unchanged.
fn quote_word(word: &str) -> String {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@+,".contains(c));
    if plain {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_select_prefers_configured_terminal() {
        let term = select(Some("konsole"), |_| true);
        assert_eq!(term.program, "konsole");
    }

    #[test]
    fn test_select_follows_priority_order() {
        let term = select(None, |name| name == "alacritty" || name == "xterm");
        assert_eq!(term.program, "alacritty");
    }

    #[test]
    fn test_select_skips_missing_preferred() {
        let term = select(Some("wezterm"), |name| name == "tilix");
        assert_eq!(term.program, "tilix");
        assert_eq!(term.style, ExecStyle::Joined("-e"));
    }

    #[test]
    fn test_select_falls_back_to_xterm() {
        let term = select(None, |_| false);
        assert_eq!(term.program, FALLBACK_TERMINAL);
        assert_eq!(term.style, ExecStyle::Trailing("-e"));
    }

    #[test]
    fn test_wrap_trailing_styles() {
        let command = cmd(&["distrobox", "enter", "devbox"]);
        assert_eq!(
            Terminal::named("gnome-terminal").wrap(&command),
            cmd(&["gnome-terminal", "--", "distrobox", "enter", "devbox"])
        );
        assert_eq!(
            Terminal::named("xfce4-terminal").wrap(&command),
            cmd(&["xfce4-terminal", "-x", "distrobox", "enter", "devbox"])
        );
    }

    #[test]
    fn test_wrap_joined_style_quotes() {
        let command = cmd(&["distrobox", "enter", "dev box", "--", "echo", "it's"]);
        assert_eq!(
            Terminal::named("lxterminal").wrap(&command),
            cmd(&[
                "lxterminal",
                "-e",
                r"distrobox enter 'dev box' -- echo 'it'\''s'"
            ])
        );
    }

    #[test]
    fn test_unknown_terminal_uses_dash_e() {
        let term = Terminal::named("foot");
        assert_eq!(term.wrap(&cmd(&["true"])), cmd(&["foot", "-e", "true"]));
    }

    #[tokio::test]
    async fn test_installed_checks_path() {
        let runner = CommandRunner::new(std::time::Duration::from_secs(5), false);
        let found = installed(&runner, &["sh", "boxctl-test-no-such-terminal-12345"]).await;
        assert!(found.contains("sh"));
        assert!(!found.contains("boxctl-test-no-such-terminal-12345"));
    }

    #[test]
    fn test_found_in_which_output() {
        let stdout = "/usr/bin/konsole\n/usr/bin/xterm\n/opt/term/bin/myterm\n";
        let found = found_in_which_output(
            stdout,
            &["gnome-terminal", "konsole", "xterm", "/opt/term/bin/myterm"],
        );
        assert_eq!(found.len(), 3);
        assert!(found.contains("konsole"));
        assert!(found.contains("xterm"));
        assert!(found.contains("/opt/term/bin/myterm"));
        assert!(!found.contains("gnome-terminal"));
    }
}
