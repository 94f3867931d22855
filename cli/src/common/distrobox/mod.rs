//! # boxctl Container Reconciliation Layer (`common::distrobox`)
//!
//! File: cli/src/common/distrobox/mod.rs
//!
//! ## Overview
//!
//! This module is the whole contract between boxctl and the container tool.
//! It queries live state, normalizes it into the data model below, and issues
//! mutating commands whose output text is handed back unchanged.
//!
//! ## Architecture
//!
//! - **`Backend`**: the capability interface. Every command handler is written
//!   against it and never knows which implementation it got.
//! - **`live::LiveBackend`**: runs the real tool through `common::process`.
//! - **`mock::MockBackend`**: an in-memory store with the same observable
//!   behavior, for demos and tests.
//!
//! The caller picks the implementation once, at construction time, through
//! [`BackendKind`].
//!
//! Helper submodules hold the pure parts, which both backends share:
//!
//! - **`distro`**: image reference -> distribution token, package format
//! - **`state`**: listing table -> `ContainerRecord`s
//! - **`apps`**: exported/installed application sets
//! - **`images`**: image catalog parsing and search
//! - **`lifecycle`**: argument vectors for create/remove/assemble/export
//! - **`interaction`**: terminal-hosted sessions (enter, upgrade, install)
//!
//! ## Result conventions
//!
//! - Reads return `Result`. Structural parse failures and timeouts are errors;
//!   "nothing there" is an empty vector.
//! - Mutations return the tool's text. A failure *is* its text.
//! - Terminal sessions return a [`DetachedLaunch`] receipt and nothing to wait on.
//!
use crate::core::error::{BoxError, Result};
use clap::ValueEnum;
use serde::Serialize;
use std::path::Path;

pub mod apps;
pub mod distro;
pub mod images;
pub mod interaction;
pub mod lifecycle;
pub mod live;
pub mod mock;
pub mod state;

/// One row of a container listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerRecord {
    /// Unique within one listing.
    pub name: String,
    /// Inferred from `image_url`; see [`distro::classify`].
    pub distro: String,
    pub image_url: String,
    pub container_id: String,
    /// Raw status text, e.g. `Up 2 hours`, `Exited (0)`, `Created`.
    pub status: String,
    pub is_running: bool,
}

/// One image the tool can create boxes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageCatalogEntry {
    /// Final path segment of `url`.
    pub name: String,
    /// Full reference, passed verbatim to `create`.
    pub url: String,
}

impl ImageCatalogEntry {
    pub fn from_reference(reference: &str) -> Self {
        Self {
            name: reference.rsplit('/').next().unwrap_or(reference).to_string(),
            url: reference.to_string(),
        }
    }
}

/// Parameters for creating a box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateOptions {
    pub name: String,
    pub image: String,
    /// Custom home directory for the box.
    pub home: Option<String>,
    /// Run a full init system (pulls in systemd).
    pub init: bool,
    /// Extra `host:container[:opts]` mounts.
    pub volumes: Vec<String>,
}

/// Receipt for a process started without supervision.
///
/// There is no handle to wait on: success or failure of the session is never reported back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetachedLaunch {
    pub program: String,
    pub pid: Option<u32>,
}

/// Which `Backend` implementation to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BackendKind {
    /// Drive the real container tool.
    #[default]
    Live,
    /// Use an in-memory simulation with two sample boxes.
    Mock,
}

/// The capability interface of the reconciliation layer.
// Handlers are generic over the backend and never spawn these futures, so no Send bound is needed.
#[allow(async_fn_in_trait)]
pub trait Backend {
    /// Fresh snapshot of all containers.
    async fn list_containers(&self) -> Result<Vec<ContainerRecord>>;

    /// Apps of `box_name` with a launcher on the host.
    async fn exported_apps(&self, box_name: &str) -> Result<Vec<String>>;

    /// Apps with a launcher inside `box_name`. Empty if the box cannot be queried.
    async fn container_apps(&self, box_name: &str) -> Result<Vec<String>>;

    async fn create(&self, options: &CreateOptions) -> String;
    async fn delete(&self, box_name: &str) -> String;
    async fn export_app(&self, app_name: &str, box_name: &str) -> String;
    async fn unexport_app(&self, app_name: &str, box_name: &str) -> String;

    /// Creates boxes from a declarative assemble file.
    async fn assemble(&self, file: &Path) -> String;

    async fn list_images(&self) -> Result<Vec<ImageCatalogEntry>>;

    async fn enter(&self, box_name: &str) -> Result<DetachedLaunch>;
    async fn upgrade(&self, box_name: &str) -> Result<DetachedLaunch>;
    async fn upgrade_all(&self) -> Result<DetachedLaunch>;
    /// Runs `command` inside the box without a terminal.
    async fn run_in_box(&self, box_name: &str, command: &[String]) -> Result<DetachedLaunch>;

    /// Opens a terminal installing the package file at `package` inside the box.
    async fn install_package(&self, box_name: &str, package: &Path) -> Result<DetachedLaunch>;

    /// Looks a box up in a fresh listing.
    async fn find_container(&self, box_name: &str) -> Result<ContainerRecord> {
        self.list_containers()
            .await?
            .into_iter()
            .find(|record| record.name == box_name)
            .ok_or_else(|| {
                BoxError::ContainerNotFound {
                    name: box_name.to_string(),
                }
                .into()
            })
    }

    /// Distribution token of a box, from a fresh listing.
    async fn container_distro(&self, box_name: &str) -> Result<String> {
        Ok(self.find_container(box_name).await?.distro)
    }

    /// Apps installed in the box that are not exported yet.
    ///
    /// The exported set is read first, then the box is queried. The two reads
    /// are not one snapshot; see the `apps` module docs.
    async fn exportable_apps(&self, box_name: &str) -> Result<Vec<String>> {
        let exported = self.exported_apps(box_name).await?;
        let installed = self.container_apps(box_name).await?;
        Ok(apps::not_exported(&installed, &exported))
    }

    async fn search_images(&self, query: &str) -> Result<Vec<ImageCatalogEntry>> {
        Ok(images::search(self.list_images().await?, query))
    }
}
