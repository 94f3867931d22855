//! # Mock Backend
//!
//! File: cli/src/common/distrobox/mock.rs
//!
//! ## Overview
//!
//! An in-memory stand-in for the container tool, selected with
//! `--backend mock`. It keeps a [`MockStore`] of boxes, each with an installed
//! and an exported application list, and answers every [`Backend`] operation
//! from it. Mutations really change the store, so a sequence like
//! create -> export -> delete -> list behaves like it would against the tool.
//!
//! The store is owned by the `MockBackend` that was constructed with it; two
//! backends never share state.
//!
//! Unlike the tool, the mock validates export requests: exporting an app that
//! is already exported, or that is not installed in the box, returns an
//! `Error: ...` text and leaves the store unchanged.
//!
use super::{
    distro, state, Backend, ContainerRecord, CreateOptions, DetachedLaunch,
    ImageCatalogEntry,
};
use crate::core::error::{BoxError, Result};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::info;

/// Programs named in launch receipts from the mock.
const MOCK_PROGRAM: &str = "mock";

/// Apps every newly created mock box starts with.
const DEFAULT_APPS: [&str; 3] = ["bash", "ls", "cat"];

const MOCK_IMAGES: [&str; 5] = [
    "docker.io/library/alpine:latest",
    "docker.io/library/debian:stable",
    "docker.io/library/ubuntu:latest",
    "docker.io/library/archlinux:latest",
    "docker.io/library/fedora:latest",
];

/// One simulated box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockContainer {
    pub name: String,
    pub image_url: String,
    pub status: String,
    pub exported_apps: Vec<String>,
    pub available_apps: Vec<String>,
}

impl MockContainer {
    pub fn new(name: &str, image_url: &str, status: &str) -> Self {
        Self {
            name: name.to_string(),
            image_url: image_url.to_string(),
            status: status.to_string(),
            exported_apps: Vec::new(),
            available_apps: Vec::new(),
        }
    }

    pub fn with_apps(mut self, available: &[&str], exported: &[&str]) -> Self {
        self.available_apps = available.iter().map(|a| a.to_string()).collect();
        self.exported_apps = exported.iter().map(|a| a.to_string()).collect();
        self
    }

    fn record(&self) -> ContainerRecord {
        ContainerRecord {
            name: self.name.clone(),
            distro: distro::classify(&self.image_url).to_string(),
            image_url: self.image_url.clone(),
            container_id: format!("mock_{}", self.name),
            status: self.status.clone(),
            is_running: state::status_is_running(&self.status),
        }
    }
}

/// Insertion-ordered collection of mock boxes, unique by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockStore {
    containers: Vec<MockContainer>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Two boxes: a running alpine box with some exported apps, and a stopped debian box.
    pub fn sample() -> Self {
        let mut store = Self::new();
        store.insert(
            MockContainer::new("devbox", "docker.io/library/alpine:latest", "Up 2 hours")
                .with_apps(&["htop", "vim", "python3", "bash", "nano"], &["htop", "vim"]),
        );
        store.insert(
            MockContainer::new("testbox", "docker.io/library/debian:stable", "Exited (0) 3 days ago")
                .with_apps(&["bash", "apt", "dpkg"], &[]),
        );
        store
    }

    /// Adds a box, replacing any box with the same name.
    pub fn insert(&mut self, container: MockContainer) {
        match self.get_mut(&container.name) {
            Some(existing) => *existing = container,
            None => self.containers.push(container),
        }
    }

    pub fn get(&self, name: &str) -> Option<&MockContainer> {
        self.containers.iter().find(|c| c.name == name)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut MockContainer> {
        self.containers.iter_mut().find(|c| c.name == name)
    }

    pub fn remove(&mut self, name: &str) -> Option<MockContainer> {
        let index = self.containers.iter().position(|c| c.name == name)?;
        Some(self.containers.remove(index))
    }

    pub fn containers(&self) -> &[MockContainer] {
        &self.containers
    }
}

/// Backend answering from an in-memory [`MockStore`].
#[derive(Debug, Default)]
pub struct MockBackend {
    store: Mutex<MockStore>,
}

impl MockBackend {
    pub fn new(store: MockStore) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    /// A backend seeded with [`MockStore::sample`].
    pub fn sample() -> Self {
        Self::new(MockStore::sample())
    }

    /// Copy of the current store contents.
    #[cfg(test)]
    pub fn snapshot(&self) -> MockStore {
        self.store().clone()
    }

    fn store(&self) -> MutexGuard<'_, MockStore> {
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn require(&self, box_name: &str) -> Result<()> {
        if self.store().get(box_name).is_some() {
            Ok(())
        } else {
            Err(BoxError::ContainerNotFound {
                name: box_name.to_string(),
            }
            .into())
        }
    }

    fn receipt(&self, action: &str) -> DetachedLaunch {
        info!("Mock: {}", action);
        DetachedLaunch {
            program: MOCK_PROGRAM.to_string(),
            pid: None,
        }
    }
}

impl Backend for MockBackend {
    async fn list_containers(&self) -> Result<Vec<ContainerRecord>> {
        Ok(self
            .store()
            .containers()
            .iter()
            .map(MockContainer::record)
            .collect())
    }

    async fn exported_apps(&self, box_name: &str) -> Result<Vec<String>> {
        Ok(self
            .store()
            .get(box_name)
            .map(|c| c.exported_apps.clone())
            .unwrap_or_default())
    }

    async fn container_apps(&self, box_name: &str) -> Result<Vec<String>> {
        Ok(self
            .store()
            .get(box_name)
            .map(|c| c.available_apps.clone())
            .unwrap_or_default())
    }

    async fn create(&self, options: &CreateOptions) -> String {
        if options.name.trim().is_empty() || options.image.trim().is_empty() {
            return "Error: Box name and image are required".to_string();
        }
        let mut store = self.store();
        if store.get(&options.name).is_some() {
            return format!("Error: Container {} already exists", options.name);
        }
        store.insert(
            MockContainer::new(&options.name, &options.image, "Created").with_apps(&DEFAULT_APPS, &[]),
        );
        info!("Mock: created container {}", options.name);

        let volumes = if options.volumes.is_empty() {
            "none".to_string()
        } else {
            options.volumes.join(", ")
        };
        format!(
            "Created new container:\n- Name: {}\n- Image: {}\n- Home: {}\n- Init: {}\n- Volumes: {}",
            options.name,
            options.image,
            options.home.as_deref().filter(|h| !h.is_empty()).unwrap_or("default"),
            if options.init { "enabled" } else { "disabled" },
            volumes
        )
    }

    async fn delete(&self, box_name: &str) -> String {
        match self.store().remove(box_name) {
            Some(_) => format!("Successfully deleted {}", box_name),
            None => format!("Error: Container {} not found", box_name),
        }
    }

    async fn export_app(&self, app_name: &str, box_name: &str) -> String {
        let mut store = self.store();
        let Some(container) = store.get_mut(box_name) else {
            return format!("Error: Container {} not found", box_name);
        };
        if container.exported_apps.iter().any(|a| a == app_name) {
            return format!("Error: {} already exported", app_name);
        }
        if !container.available_apps.iter().any(|a| a == app_name) {
            return format!("Error: {} not found in container", app_name);
        }
        container.exported_apps.push(app_name.to_string());
        format!("Successfully exported {} from {}", app_name, box_name)
    }

    async fn unexport_app(&self, app_name: &str, box_name: &str) -> String {
        let mut store = self.store();
        let Some(container) = store.get_mut(box_name) else {
            return format!("Error: Container {} not found", box_name);
        };
        let Some(index) = container.exported_apps.iter().position(|a| a == app_name) else {
            return format!("Error: {} not found in exported apps", app_name);
        };
        container.exported_apps.remove(index);
        format!("Successfully removed {} from {}", app_name, box_name)
    }

    async fn assemble(&self, file: &Path) -> String {
        format!("Mock: Assembled containers from {}", file.display())
    }

    async fn list_images(&self) -> Result<Vec<ImageCatalogEntry>> {
        Ok(MOCK_IMAGES
            .iter()
            .map(|url| ImageCatalogEntry::from_reference(url))
            .collect())
    }

    async fn enter(&self, box_name: &str) -> Result<DetachedLaunch> {
        self.require(box_name)?;
        Ok(self.receipt(&format!("entering container {}", box_name)))
    }

    async fn upgrade(&self, box_name: &str) -> Result<DetachedLaunch> {
        self.require(box_name)?;
        Ok(self.receipt(&format!("upgrading container {}", box_name)))
    }

    async fn upgrade_all(&self) -> Result<DetachedLaunch> {
        Ok(self.receipt("upgrading all containers"))
    }

    async fn run_in_box(&self, box_name: &str, command: &[String]) -> Result<DetachedLaunch> {
        self.require(box_name)?;
        Ok(self.receipt(&format!("running {:?} in {}", command, box_name)))
    }

    async fn install_package(&self, box_name: &str, package: &Path) -> Result<DetachedLaunch> {
        let record = self.find_container(box_name).await?;
        let kind = distro::PackageKind::from_image(&record.image_url).ok_or_else(|| {
            BoxError::UnsupportedPackage {
                name: record.name.clone(),
                image: record.image_url.clone(),
            }
        })?;
        Ok(self.receipt(&format!(
            "installing {} package {} into {}",
            kind,
            package.display(),
            box_name
        )))
    }
}
