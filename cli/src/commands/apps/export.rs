//! # boxctl App Export Handlers
//!
//! File: cli/src/commands/apps/export.rs
//!
//! Implements `boxctl app export` and `boxctl app unexport`. Apps are handled
//! one after another, since each call changes the same launcher directory.
//! The text returned for each app is printed; the command does not decide
//! whether that text means success.
//!
use crate::common::distrobox::Backend;
use crate::core::error::Result;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Name of the box.
    name: String,

    /// Apps to (un)export.
    #[arg(required = true, num_args = 1..)]
    apps: Vec<String>,
}

pub async fn handle_export<B: Backend>(args: ExportArgs, backend: &B) -> Result<()> {
    for app in &args.apps {
        info!("Exporting '{}' from '{}'", app, args.name);
        println!("{}", backend.export_app(app, &args.name).await);
    }
    Ok(())
}

pub async fn handle_unexport<B: Backend>(args: ExportArgs, backend: &B) -> Result<()> {
    for app in &args.apps {
        info!("Unexporting '{}' from '{}'", app, args.name);
        println!("{}", backend.unexport_app(app, &args.name).await);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::distrobox::mock::MockBackend;

    #[test]
    fn test_export_args_require_app() {
        assert!(ExportArgs::try_parse_from(["export", "devbox"]).is_err());
        let args = ExportArgs::try_parse_from(["export", "devbox", "nano", "bash"]).unwrap();
        assert_eq!(args.apps, vec!["nano", "bash"]);
    }

    #[tokio::test]
    async fn test_export_then_unexport_changes_store() {
        let backend = MockBackend::sample();
        let args = ExportArgs::try_parse_from(["export", "devbox", "nano"]).unwrap();
        handle_export(args, &backend).await.unwrap();
        assert!(backend
            .exportable_apps("devbox")
            .await
            .unwrap()
            .iter()
            .all(|a| a != "nano"));

        let args = ExportArgs::try_parse_from(["unexport", "devbox", "nano", "htop"]).unwrap();
        handle_unexport(args, &backend).await.unwrap();
        assert_eq!(backend.exported_apps("devbox").await.unwrap(), vec!["vim"]);
    }
}
