//! # boxctl Assemble Handler
//!
//! File: cli/src/commands/boxes/assemble.rs
//!
//! Implements `boxctl box assemble FILE`: creates every box described in a
//! declarative assemble file and prints the tool's output.
//!
use crate::common::distrobox::Backend;
use crate::core::error::Result;
use anyhow::bail;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Create boxes from an assemble file")]
pub struct AssembleArgs {
    /// Path to the assemble (.ini) file.
    file: PathBuf,
}

pub async fn handle_assemble<B: Backend>(args: AssembleArgs, backend: &B) -> Result<()> {
    if !args.file.is_file() {
        bail!("Assemble file not found: {}", args.file.display());
    }
    println!("{}", backend.assemble(&args.file).await);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::distrobox::mock::MockBackend;
    use std::ffi::OsStr;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_handle_assemble_missing_file() {
        let args = AssembleArgs::try_parse_from(["assemble", "/nonexistent/boxes.ini"]).unwrap();
        let err = handle_assemble(args, &MockBackend::sample()).await.unwrap_err();
        assert!(err.to_string().contains("Assemble file not found"));
    }

    #[tokio::test]
    async fn test_handle_assemble_existing_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("boxes.ini");
        fs::write(&file, "[devbox]\nimage=alpine\n").unwrap();
        let args = AssembleArgs::try_parse_from([OsStr::new("assemble"), file.as_os_str()]).unwrap();
        assert!(handle_assemble(args, &MockBackend::sample()).await.is_ok());
    }
}
