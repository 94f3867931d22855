//! # boxctl System Utilities (`common::system`)
//!
//! File: cli/src/common/system/mod.rs
//!
//! ## Overview
//!
//! Host environment inspection:
//!
//! - **Sandbox detection**: boxctl may itself run inside a flatpak sandbox, in
//!   which case the container tool lives on the host and must be reached through
//!   `flatpak-spawn --host`.
//! - **`terminal`**: picking a terminal emulator and building the argument
//!   vector that makes it run a given command.
//!
use std::path::Path;
use tracing::debug;

pub mod terminal;

/// Marker file present in every flatpak sandbox.
const FLATPAK_INFO: &str = "/.flatpak-info";

/// Returns `true` when running inside a flatpak sandbox.
pub fn is_flatpak_sandbox() -> bool {
    let sandboxed = Path::new(FLATPAK_INFO).exists();
    debug!("Flatpak sandbox detected: {}", sandboxed);
    sandboxed
}
