//! # boxctl Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared building blocks used by the command handlers in `commands::`:
//!
//! - **`distrobox`**: the container reconciliation layer. The `Backend`
//!   interface, its live and mock implementations, and the parsers they share.
//! - **`process`**: running external commands under a deadline, and starting
//!   detached ones.
//! - **`system`**: host inspection (Flatpak sandbox, terminal emulators).
//! - **`ui`**: table and JSON rendering for command output.
//!

/// Container state, application inventory, images and sessions.
pub mod distrobox;
/// External command execution with timeouts.
pub mod process;
/// Host system inspection.
pub mod system;
/// Terminal output helpers.
pub mod ui;
