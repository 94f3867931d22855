//! # boxctl CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//!
//! Top-level behavior of the `boxctl` binary: standard flags, help output,
//! argument errors and configuration errors.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_version_flag() {
    boxctl_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_lists_command_groups() {
    boxctl_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("box"))
        .stdout(predicate::str::contains("app"))
        .stdout(predicate::str::contains("image"));
}

#[test]
fn test_help_subcommand() {
    boxctl_cmd()
        .args(["help", "box"])
        .assert()
        .success()
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("upgrade"));
}

#[test]
fn test_missing_subcommand_fails() {
    boxctl_cmd().assert().failure();
}

#[test]
fn test_unknown_backend_rejected() {
    boxctl_cmd()
        .args(["--backend", "podman", "box", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("podman"));
}

#[test]
fn test_missing_config_file_is_error() {
    boxctl_cmd()
        .args(["--config", "/nonexistent/boxctl.toml", "box", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read configuration file"));
}

#[test]
fn test_unknown_config_key_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[tool]\nprogramme = \"distrobox\"\n").unwrap();
    boxctl_cmd()
        .arg("--config")
        .arg(&config)
        .args(["box", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse TOML"));
}

#[test]
fn test_zero_timeout_is_rejected() {
    let fake = FakeTool::new();
    fake.cmd(&["--timeout", "0", "box", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration validation failed"));
}
