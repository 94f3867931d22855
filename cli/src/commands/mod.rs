//! # boxctl Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the top-level command groups of the boxctl CLI.
//! Every handler is generic over [`Backend`](crate::common::distrobox::Backend),
//! so the same code drives the real tool or the in-memory mock.
//!
//! ## Command Groups
//!
//! - `boxes`: box lifecycle and sessions (`list`, `create`, `rm`, `enter`, ...)
//! - `apps`: application inventory and export state of one box
//! - `images`: the image catalog
//!
//! Each group defines its own arguments structure and a `handle_*` function.
//! Subcommands are declared in the group's own `mod.rs`.
//!

/// Application inventory and export commands.
pub mod apps;
/// Box lifecycle, inspection and session commands.
pub mod boxes;
/// Image catalog commands.
pub mod images;
