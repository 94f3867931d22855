//! # boxctl CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration test crates in `cli/tests/`:
//! - `boxctl_cmd()` points `assert_cmd` at the compiled binary.
//! - `FakeTool` writes an executable shell script that answers like the
//!   container tool, plus a config file pointing boxctl at a private
//!   launcher directory, so live-backend tests never touch the real system.
//!

// Different test crates use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Command for the `boxctl` binary with logging quiet and tool env vars cleared.
pub fn boxctl_cmd() -> Command {
    let mut cmd = Command::cargo_bin("boxctl").expect("Failed to find boxctl binary for testing");
    cmd.env_remove("BOXCTL_TOOL")
        .env_remove("BOXCTL_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

/// Answers `list`, `enter BOX -- find`, `create -C`, `create`, `rm` and
/// `assemble` the way the container tool would. With `FAKE_SLOW` set every
/// invocation hangs instead.
const FAKE_TOOL_SCRIPT: &str = r#"#!/bin/sh
if [ -n "$FAKE_SLOW" ]; then
  exec sleep 10
fi
case "$1" in
  list)
    echo "ID           | NAME    | STATUS                 | IMAGE"
    echo "1a2b3c4d5e6f | devbox  | Up 2 hours             | docker.io/library/alpine:latest"
    echo "6f5e4d3c2b1a | ubu     | Exited (0) 3 days ago  | quay.io/toolbx/ubuntu-toolbox:22.04"
    ;;
  enter)
    if [ "$2" = "devbox" ]; then
      echo "/usr/share/applications/htop.desktop"
      echo "/usr/share/applications/vim.desktop"
      echo "/usr/share/applications/nano.desktop"
    else
      echo "Error: container $2 is not running" >&2
      exit 1
    fi
    ;;
  create)
    if [ "$2" = "-C" ]; then
      echo "Images:"
      echo "  docker.io/library/alpine:latest"
      echo "  quay.io/toolbx/ubuntu-toolbox:22.04"
      echo "  registry.fedoraproject.org/fedora-toolbox:40"
    else
      echo "Creating $3 from $5"
    fi
    ;;
  rm)
    echo "Error: no such container $2" >&2
    exit 1
    ;;
  assemble)
    echo "Assembled from $4"
    ;;
esac
"#;

/// A fake container tool and launcher directory in a temporary directory.
pub struct FakeTool {
    pub dir: TempDir,
}

impl FakeTool {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let tool = dir.path().join("fake-distrobox");
        fs::write(&tool, FAKE_TOOL_SCRIPT).expect("Failed to write fake tool");
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake tool executable");
        fs::create_dir(dir.path().join("applications")).expect("Failed to create launcher dir");

        let config = format!(
            "[tool]\nprogram = \"{}\"\nhost_spawn = false\n\n[desktop]\napplications_dir = \"{}\"\n",
            tool.display(),
            dir.path().join("applications").display()
        );
        fs::write(dir.path().join("config.toml"), config).expect("Failed to write config");
        Self { dir }
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    pub fn applications_dir(&self) -> PathBuf {
        self.dir.path().join("applications")
    }

    /// Creates a host launcher file for `app` exported from `box_name`.
    pub fn export_launcher(&self, box_name: &str, app: &str) {
        let path = self
            .applications_dir()
            .join(format!("{}-{}.desktop", box_name, app));
        fs::write(path, "[Desktop Entry]\n").expect("Failed to write launcher");
    }

    /// `boxctl --config <fake config> <args...>`
    pub fn cmd(&self, args: &[&str]) -> Command {
        let mut cmd = boxctl_cmd();
        cmd.arg("--config").arg(self.config_path()).args(args);
        cmd
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
