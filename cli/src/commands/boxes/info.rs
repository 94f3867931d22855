//! # boxctl Box Inspection Handlers
//!
//! File: cli/src/commands/boxes/info.rs
//!
//! Implements `boxctl box info` and `boxctl box distro`. Both look the box up
//! in a fresh listing and fail with "not found" when it is absent.
//!
use crate::common::distrobox::Backend;
use crate::common::ui;
use crate::core::error::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "Show one box")]
pub struct InfoArgs {
    /// Name of the box.
    name: String,

    /// Print the record as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Print the distribution of a box")]
pub struct DistroArgs {
    /// Name of the box.
    name: String,
}

pub async fn handle_info<B: Backend>(args: InfoArgs, backend: &B) -> Result<()> {
    let record = backend.find_container(&args.name).await?;
    if args.json {
        println!("{}", ui::to_json(&record)?);
        return Ok(());
    }
    let running = if record.is_running { "yes" } else { "no" };
    let rows = vec![
        vec!["Name".to_string(), record.name],
        vec!["Distro".to_string(), record.distro],
        vec!["Image".to_string(), record.image_url],
        vec!["ID".to_string(), record.container_id],
        vec!["Status".to_string(), record.status],
        vec!["Running".to_string(), running.to_string()],
    ];
    print!("{}", ui::render_table(&["FIELD", "VALUE"], &rows));
    Ok(())
}

pub async fn handle_distro<B: Backend>(args: DistroArgs, backend: &B) -> Result<()> {
    println!("{}", backend.container_distro(&args.name).await?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::distrobox::mock::MockBackend;
    use crate::core::error::BoxError;

    #[test]
    fn test_info_args_requires_name() {
        assert!(InfoArgs::try_parse_from(["info"]).is_err());
        let args = InfoArgs::try_parse_from(["info", "devbox", "--json"]).unwrap();
        assert_eq!(args.name, "devbox");
        assert!(args.json);
    }

    #[tokio::test]
    async fn test_handle_info_unknown_box() {
        let args = InfoArgs::try_parse_from(["info", "ghost"]).unwrap();
        let err = handle_info(args, &MockBackend::sample()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BoxError>(),
            Some(BoxError::ContainerNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_handle_distro() {
        let args = DistroArgs::try_parse_from(["distro", "testbox"]).unwrap();
        assert!(handle_distro(args, &MockBackend::sample()).await.is_ok());
    }
}
