//! # boxctl Box Listing Handler
//!
//! File: cli/src/commands/boxes/list.rs
//!
//! ## Overview
//!
//! Implements `boxctl box list`. It takes a fresh snapshot from the backend
//! and prints it as a table, or as JSON with `--json`. `--running` keeps only
//! boxes whose status says they are up.
//!
//! ```bash
//! boxctl box list
//! boxctl box list --running --json
//! ```
//!
use crate::common::distrobox::{Backend, ContainerRecord};
use crate::common::ui;
use crate::core::error::Result;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "List all boxes")]
pub struct ListArgs {
    /// Only show running boxes.
    #[arg(long, short)]
    running: bool,

    /// Print the listing as JSON.
    #[arg(long)]
    json: bool,
}

pub async fn handle_list<B: Backend>(args: ListArgs, backend: &B) -> Result<()> {
    info!("Handling box list command (running: {})", args.running);
    let mut records = backend.list_containers().await?;
    if args.running {
        records.retain(|record| record.is_running);
    }

    if args.json {
        println!("{}", ui::to_json(&records)?);
    } else if records.is_empty() {
        println!("No boxes found.");
    } else {
        print!("{}", render(&records));
    }
    Ok(())
}

fn render(records: &[ContainerRecord]) -> String {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            vec![
                r.name.clone(),
                r.distro.clone(),
                r.status.clone(),
                r.image_url.clone(),
            ]
        })
        .collect();
    ui::render_table(&["NAME", "DISTRO", "STATUS", "IMAGE"], &rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::distrobox::mock::MockBackend;

    #[test]
    fn test_list_args_parsing() {
        let args = ListArgs::try_parse_from(["list", "--running", "--json"]).unwrap();
        assert!(args.running);
        assert!(args.json);

        let args = ListArgs::try_parse_from(["list"]).unwrap();
        assert!(!args.running);
        assert!(!args.json);
    }

    #[tokio::test]
    async fn test_render_sample() {
        let records = MockBackend::sample().list_containers().await.unwrap();
        let table = render(&records);
        let mut lines = table.lines();
        assert!(lines.next().unwrap().starts_with("NAME"));
        assert!(lines.next().unwrap().starts_with("devbox   alpine"));
        assert!(lines.next().unwrap().starts_with("testbox  debian"));
    }

    #[tokio::test]
    async fn test_handle_list_with_mock() {
        let args = ListArgs::try_parse_from(["list", "--running"]).unwrap();
        assert!(handle_list(args, &MockBackend::sample()).await.is_ok());
    }
}
