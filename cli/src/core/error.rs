//! # boxctl Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout boxctl. Most failures of
//! the external container tool are *not* errors here: a mutating command that
//! exits non-zero or times out hands its output text back to the caller, and
//! that text is what the user sees. `BoxError` covers the cases that must stay
//! distinguishable from a successful result:
//!
//! - Structural listing failures (a required column is missing, a row is short)
//! - Timeouts of read queries, so they are never confused with "nothing found"
//! - Lookups of containers that are not in the current listing
//! - Configuration problems
//! - Detached launches that could not be started
//!
//! ## Architecture
//!
//! - `BoxError`: a `thiserror` enum with one variant per failure kind
//! - `Result<T>`: an alias for `anyhow::Result<T>` so context can be attached freely
//!
//! Callers that need to branch on a specific variant downcast:
//!
//! ```rust
//! match backend.list_containers().await {
//!     Err(e) if e.downcast_ref::<BoxError>().is_some_and(|be| matches!(be, BoxError::CommandTimedOut { .. })) => {
//!         eprintln!("distrobox did not answer in time");
//!     }
//!     other => { /* ... */ }
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for boxctl.
#[derive(Error, Debug)]
pub enum BoxError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Listing output is missing the required '{column}' column (header: '{header}')")]
    MissingColumn { column: String, header: String },

    #[error("Listing row {row} has {found} columns, expected at least {expected}: '{line}'")]
    MalformedRow {
        row: usize,
        found: usize,
        expected: usize,
        line: String,
    },

    #[error("Command '{cmd}' timed out after {secs}s")]
    CommandTimedOut { cmd: String, secs: u64 },

    #[error("Container '{name}' not found.")]
    ContainerNotFound { name: String },

    #[error("Cannot determine a package format for container '{name}' (image '{image}')")]
    UnsupportedPackage { name: String, image: String },

    #[error("Failed to launch '{program}': {reason}")]
    Launch { program: String, reason: String },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let missing = BoxError::MissingColumn {
            column: "STATUS".into(),
            header: "NAME | IMAGE | ID".into(),
        };
        assert_eq!(
            missing.to_string(),
            "Listing output is missing the required 'STATUS' column (header: 'NAME | IMAGE | ID')"
        );

        let timed_out = BoxError::CommandTimedOut {
            cmd: "distrobox list --no-color".into(),
            secs: 60,
        };
        assert_eq!(
            timed_out.to_string(),
            "Command 'distrobox list --no-color' timed out after 60s"
        );

        let not_found = BoxError::ContainerNotFound {
            name: "devbox".into(),
        };
        assert_eq!(not_found.to_string(), "Container 'devbox' not found.");
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = BoxError::ContainerNotFound {
            name: "ghost".into(),
        }
        .into();
        let err = err.context("Failed to look up container");
        assert!(err
            .downcast_ref::<BoxError>()
            .is_some_and(|be| matches!(be, BoxError::ContainerNotFound { .. })));
    }
}
