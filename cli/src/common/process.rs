//! # boxctl Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//!
//! ## Overview
//!
//! Every piece of container state boxctl knows about comes from the text output
//! of an external tool. This module is the only place that starts processes:
//!
//! - **`CommandRunner::run`**: runs an argument vector (no shell), captures
//!   stdout/stderr and the exit status, and enforces a wall-clock deadline.
//! - **`CommandRunner::spawn_detached`**: starts a process that boxctl never waits
//!   on (terminal sessions). Only the pid comes back.
//!
//! ## Architecture
//!
//! `run` never fails. Whatever happens (non-zero exit, timeout, the program not
//! existing) is recorded in `CommandOutput::status`, and `CommandOutput::text()`
//! folds it into the single string a user is shown:
//!
//! | Outcome      | `text()`                                               |
//! |--------------|--------------------------------------------------------|
//! | success      | trimmed stdout                                         |
//! | non-zero     | trimmed stdout, or an `Error: ...` descriptor if empty |
//! | timeout      | [`TIMEOUT_SENTINEL`]                                   |
//! | spawn failed | `Error: failed to start ...`                           |
//!
//! Readers that must tell a timeout apart from empty output inspect `status`
//! instead of the text.
//!
//! The deadline bounds the whole call: the child's exit *and* both output pipes
//! reaching EOF. A captured command runs in its own process group. If the child
//! exits but a descendant keeps the pipes open past the deadline, the child's
//! real status is kept along with whatever output was read, and the group is
//! killed. If the child itself is still running, the group is killed, the
//! child is reaped and the status is `TimedOut`.
//!
//! Detached processes are reaped by a background thread when they exit.
//!
//! When boxctl itself runs inside a flatpak sandbox, both entry points prefix
//! the argument vector with `flatpak-spawn --host`.
//!
use crate::core::error::{BoxError, Result};
use std::fmt;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::time::Instant;
use tracing::{debug, instrument, warn};

/// Text returned in place of output when a command exceeds its deadline.
pub const TIMEOUT_SENTINEL: &str = "Error: Command timed out";

const HOST_SPAWN_PREFIX: [&str; 2] = ["flatpak-spawn", "--host"];

/// How a captured command ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitState {
    Success,
    /// Exited non-zero. `None` when terminated by a signal.
    Failed(Option<i32>),
    TimedOut,
    /// The process could not be started at all.
    SpawnFailed(String),
}

/// Everything captured from one run of an external command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// The argument vector as executed, host-spawn prefix included.
    pub argv: Vec<String>,
    pub stdout: String,
    pub stderr: String,
    pub status: ExitState,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == ExitState::Success
    }

    pub fn timed_out(&self) -> bool {
        self.status == ExitState::TimedOut
    }

    /// Best-effort text for display.
    pub fn text(&self) -> String {
        let stdout = self.stdout.trim();
        match &self.status {
            ExitState::Success => stdout.to_string(),
            ExitState::TimedOut => TIMEOUT_SENTINEL.to_string(),
            ExitState::SpawnFailed(reason) => {
                format!("Error: failed to start '{}': {}", self.command_line(), reason)
            }
            ExitState::Failed(_) if !stdout.is_empty() => stdout.to_string(),
            ExitState::Failed(code) => {
                let code = code.map_or_else(|| "signal".to_string(), |c| c.to_string());
                let stderr = self.stderr.trim();
                if stderr.is_empty() {
                    format!(
                        "Error: '{}' returned non-zero exit status {}",
                        self.command_line(),
                        code
                    )
                } else {
                    format!(
                        "Error: '{}' returned non-zero exit status {}: {}",
                        self.command_line(),
                        code,
                        stderr
                    )
                }
            }
        }
    }

    pub fn command_line(&self) -> String {
        self.argv.join(" ")
    }
}

impl fmt::Display for CommandOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Runs external commands with a deadline, optionally through `flatpak-spawn --host`.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    timeout: Duration,
    host_spawn: bool,
}

impl CommandRunner {
    pub fn new(timeout: Duration, host_spawn: bool) -> Self {
        Self {
            timeout,
            host_spawn,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn host_spawn(&self) -> bool {
        self.host_spawn
    }

    /// The argument vector that will actually be executed.
    pub fn host_argv<S: AsRef<str>>(&self, argv: &[S]) -> Vec<String> {
        let mut full = Vec::with_capacity(argv.len() + 2);
        if self.host_spawn {
            full.extend(HOST_SPAWN_PREFIX.iter().map(|s| s.to_string()));
        }
        full.extend(argv.iter().map(|a| a.as_ref().to_string()));
        full
    }

    /// Runs `argv` to completion or until the deadline, capturing its output.
    #[instrument(skip_all)]
    pub async fn run<S: AsRef<str>>(&self, argv: &[S]) -> CommandOutput {
        let argv = self.host_argv(argv);
        debug!("Running command: {:?}", argv);

        let mut output = CommandOutput {
            argv,
            stdout: String::new(),
            stderr: String::new(),
            status: ExitState::Success,
        };
        let Some((program, args)) = output.argv.split_first() else {
            output.status = ExitState::SpawnFailed("empty command".to_string());
            return output;
        };

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        #[cfg(unix)]
        command.process_group(0);

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!("Failed to start '{}': {}", program, e);
                output.status = ExitState::SpawnFailed(e.to_string());
                return output;
            }
        };
        let group = child.id();

        let mut stdout_pipe = child.stdout.take();
        let mut stderr_pipe = child.stderr.take();
        let mut stdout_buf = Vec::new();
        let mut stderr_buf = Vec::new();
        let mut exit = None;

        // One deadline covers the exit and both pipes reaching EOF.
        let deadline = Instant::now() + self.timeout;
        let finished = tokio::time::timeout_at(deadline, async {
            tokio::join!(
                async { exit = Some(child.wait().await) },
                drain(stdout_pipe.as_mut(), &mut stdout_buf),
                drain(stderr_pipe.as_mut(), &mut stderr_buf),
            )
        })
        .await
        .is_ok();
        drop(stdout_pipe);
        drop(stderr_pipe);
        output.stdout = String::from_utf8_lossy(&stdout_buf).into_owned();
        output.stderr = String::from_utf8_lossy(&stderr_buf).into_owned();

        match exit {
            Some(Ok(status)) => {
                if !finished {
                    warn!(
                        "'{}' exited but its output was still open after {:?}; keeping what was read",
                        output.command_line(),
                        self.timeout
                    );
                    kill_process_group(group);
                }
                output.status = if status.success() {
                    ExitState::Success
                } else {
                    ExitState::Failed(status.code())
                };
                debug!("Command finished with {:?}", output.status);
            }
            Some(Err(e)) => {
                warn!("Failed to wait for '{}': {}", program, e);
                kill_process_group(group);
                output.status = ExitState::SpawnFailed(e.to_string());
            }
            None => {
                warn!(
                    "Command '{}' timed out after {:?}; killing it",
                    output.command_line(),
                    self.timeout
                );
                kill_process_group(group);
                // kill() also waits, which reaps the child.
                if let Err(e) = child.kill().await {
                    warn!("Failed to kill timed out command: {}", e);
                }
                output.status = ExitState::TimedOut;
            }
        }
        output
    }

    /// Starts `argv` without waiting for it and without capturing anything.
    ///
    /// The process gets its own process group so it outlives boxctl and does not
    /// receive signals aimed at boxctl's terminal.
    #[instrument(skip_all)]
    pub fn spawn_detached<S: AsRef<str>>(&self, argv: &[S]) -> Result<u32> {
        let argv = self.host_argv(argv);
        let (program, args) = argv.split_first().ok_or_else(|| BoxError::Launch {
            program: String::new(),
            reason: "empty command".to_string(),
        })?;
        debug!("Launching detached: {:?}", argv);

        let mut command = std::process::Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        let mut child = command.spawn().map_err(|e| BoxError::Launch {
            program: program.clone(),
            reason: e.to_string(),
        })?;
        let pid = child.id();

        // Collects the exit status whenever the process ends, so it never lingers as a zombie.
        std::thread::spawn(move || {
            if let Err(e) = child.wait() {
                debug!("Failed to reap detached process {}: {}", pid, e);
            }
        });
        Ok(pid)
    }
}

/// Kills every process in the group led by `pgid`, descendants included.
#[cfg(unix)]
fn kill_process_group(pgid: Option<u32>) {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let Some(pgid) = pgid.and_then(|p| i32::try_from(p).ok()) else {
        return;
    };
    if let Err(e) = killpg(Pid::from_raw(pgid), Signal::SIGKILL) {
        debug!("Could not kill process group {}: {}", pgid, e);
    }
}

#[cfg(not(unix))]
fn kill_process_group(_pgid: Option<u32>) {}

/// Appends everything readable from `pipe` to `buf` until EOF.
///
/// Reads in chunks so that bytes already read stay in `buf` if the future is
/// dropped at the deadline.
async fn drain<R: AsyncRead + Unpin>(pipe: Option<R>, buf: &mut Vec<u8>) {
    let Some(mut pipe) = pipe else {
        return;
    };
    let mut chunk = [0u8; 8192];
    loop {
        match pipe.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
            Err(e) => {
                debug!("Error reading command output: {}", e);
                break;
            }
        }
    }
}
