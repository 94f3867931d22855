//! # Live Backend
//!
//! File: cli/src/common/distrobox/live.rs
//!
//! ## Overview
//!
//! `LiveBackend` implements [`Backend`] by running the real container tool.
//! It holds no state between calls: every listing, inventory or catalog query
//! runs the tool again and parses its output from scratch.
//!
//! ## Failure handling
//!
//! - **Reads** (`list_containers`, `container_apps`, `list_images`): a timeout
//!   becomes [`BoxError::CommandTimedOut`]. Otherwise whatever stdout was
//!   produced is parsed, even after a non-zero exit. No output means an empty
//!   result. For `container_apps`, a non-zero exit (box not running, directory
//!   missing) is an empty result as well.
//! - **Mutations**: the runner's text, always. Timeouts show up as the
//!   `Error: Command timed out` sentinel.
//! - **Sessions**: a terminal that cannot be started is an error; anything that
//!   happens after it started is not observed.
//!
use super::{
    apps, images, interaction, interaction::TerminalLauncher, lifecycle, state,
    distro::PackageKind, Backend, ContainerRecord, CreateOptions, DetachedLaunch,
    ImageCatalogEntry,
};
use crate::common::process::{CommandOutput, CommandRunner};
use crate::core::config::Config;
use crate::core::error::{BoxError, Result};
use anyhow::anyhow;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Backend driving the real container tool.
#[derive(Debug, Clone)]
pub struct LiveBackend {
    runner: CommandRunner,
    launcher: TerminalLauncher,
    program: String,
    export_helper: String,
    applications_dir: PathBuf,
    container_applications_dir: String,
    registries: Vec<String>,
}

impl LiveBackend {
    pub fn new(config: &Config) -> Self {
        let runner = CommandRunner::new(config.timeout(), config.host_spawn());
        Self {
            launcher: TerminalLauncher::new(runner.clone(), config.desktop.terminal.clone()),
            runner,
            program: config.tool.program.clone(),
            export_helper: config.tool.export_helper.clone(),
            applications_dir: config.applications_dir(),
            container_applications_dir: config.desktop.container_applications_dir.clone(),
            registries: config.images.registries.clone(),
        }
    }

    /// Runs a read query; a timeout is an error rather than an empty answer.
    async fn query(&self, argv: &[String]) -> Result<CommandOutput> {
        let output = self.runner.run(argv).await;
        if output.timed_out() {
            return Err(anyhow!(BoxError::CommandTimedOut {
                cmd: output.command_line(),
                secs: self.runner.timeout().as_secs(),
            }));
        }
        if !output.success() {
            warn!("Query '{}' did not succeed: {}", output.command_line(), output.text());
        }
        Ok(output)
    }

    async fn mutate(&self, argv: &[String]) -> String {
        let output = self.runner.run(argv).await;
        info!(
            "'{}' finished with {:?}",
            output.command_line(),
            output.status
        );
        output.text()
    }
}

impl Backend for LiveBackend {
    #[instrument(skip(self))]
    async fn list_containers(&self) -> Result<Vec<ContainerRecord>> {
        let output = self.query(&lifecycle::list_args(&self.program)).await?;
        state::parse_listing(&output.stdout)
    }

    #[instrument(skip(self))]
    async fn exported_apps(&self, box_name: &str) -> Result<Vec<String>> {
        apps::exported_from_dir(&self.applications_dir, box_name)
    }

    #[instrument(skip(self))]
    async fn container_apps(&self, box_name: &str) -> Result<Vec<String>> {
        let argv = lifecycle::find_launchers_args(
            &self.program,
            box_name,
            &self.container_applications_dir,
        );
        let output = self.query(&argv).await?;
        if !output.success() {
            debug!("Could not enumerate apps in '{}', treating as none", box_name);
            return Ok(Vec::new());
        }
        Ok(apps::parse_find_output(&output.stdout))
    }

    #[instrument(skip(self, options), fields(name = %options.name, image = %options.image))]
    async fn create(&self, options: &CreateOptions) -> String {
        self.mutate(&lifecycle::create_args(&self.program, options))
            .await
    }

    #[instrument(skip(self))]
    async fn delete(&self, box_name: &str) -> String {
        self.mutate(&lifecycle::remove_args(&self.program, box_name))
            .await
    }

    #[instrument(skip(self))]
    async fn export_app(&self, app_name: &str, box_name: &str) -> String {
        let argv = lifecycle::export_args(
            &self.program,
            &self.export_helper,
            box_name,
            app_name,
            false,
        );
        self.mutate(&argv).await
    }

    #[instrument(skip(self))]
    async fn unexport_app(&self, app_name: &str, box_name: &str) -> String {
        let argv = lifecycle::export_args(
            &self.program,
            &self.export_helper,
            box_name,
            app_name,
            true,
        );
        self.mutate(&argv).await
    }

    #[instrument(skip(self))]
    async fn assemble(&self, file: &Path) -> String {
        self.mutate(&lifecycle::assemble_args(&self.program, file))
            .await
    }

    #[instrument(skip(self))]
    async fn list_images(&self) -> Result<Vec<ImageCatalogEntry>> {
        let output = self.query(&lifecycle::catalog_args(&self.program)).await?;
        let entries = images::parse_catalog(&output.stdout, &self.registries);
        debug!("Found {} image(s) in catalog", entries.len());
        Ok(entries)
    }

    async fn enter(&self, box_name: &str) -> Result<DetachedLaunch> {
        self.launcher
            .launch(&interaction::enter_command(&self.program, box_name))
            .await
    }

    async fn upgrade(&self, box_name: &str) -> Result<DetachedLaunch> {
        self.launcher
            .launch(&interaction::upgrade_command(&self.program, box_name))
            .await
    }

    async fn upgrade_all(&self) -> Result<DetachedLaunch> {
        self.launcher
            .launch(&interaction::upgrade_all_command(&self.program))
            .await
    }

    async fn run_in_box(&self, box_name: &str, command: &[String]) -> Result<DetachedLaunch> {
        self.launcher
            .launch_headless(&interaction::run_command(&self.program, box_name, command))
    }

    #[instrument(skip(self, package), fields(package = %package.display()))]
    async fn install_package(&self, box_name: &str, package: &Path) -> Result<DetachedLaunch> {
        if !package.is_file() {
            anyhow::bail!("Package file not found: {}", package.display());
        }
        let record = self.find_container(box_name).await?;
        let kind = PackageKind::from_image(&record.image_url).ok_or_else(|| {
            BoxError::UnsupportedPackage {
                name: record.name.clone(),
                image: record.image_url.clone(),
            }
        })?;
        info!("Installing {} package into '{}'", kind, box_name);
        self.launcher.launch(&interaction::install_command(
            &self.program,
            box_name,
            kind,
            package,
        ))
        .await
    }
}
