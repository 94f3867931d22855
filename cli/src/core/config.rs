//! # boxctl Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, expands and validates the boxctl configuration. It tells
//! the rest of the application which container tool to run, how long to wait
//! for it, where exported launchers live on the host, which terminal to prefer
//! and which registry hosts mark a line of the image catalog as a real image
//! reference.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line flags (`--tool`, `--timeout`, also read from `BOXCTL_TOOL` / `BOXCTL_TIMEOUT`)
//! 2. An explicit `--config <path>` file, or the user file `~/.config/boxctl/config.toml`
//! 3. Default values defined in the code
//!
//! Paths are `~`-expanded and the merged result is validated before use.
//!
//! ## Examples
//!
//! ```toml
//! [tool]
//! program = "distrobox"
//! timeout_secs = 90
//!
//! [desktop]
//! terminal = "konsole"
//!
//! [images]
//! registries = ["quay.io", "ghcr.io"]
//! ```
//!
//! ```rust
//! let cfg = config::load_config(None, &ConfigOverrides::default())?;
//! let runner = CommandRunner::new(cfg.timeout(), cfg.host_spawn());
//! ```
//!
use crate::common::system;
use crate::core::error::{BoxError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::{debug, info};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub tool: ToolConfig,
    #[serde(default)]
    pub desktop: DesktopConfig,
    #[serde(default)]
    pub images: ImagesConfig,
}

/// How the external container tool is invoked.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ToolConfig {
    /// Executable name or path of the container tool.
    #[serde(default = "default_program")]
    pub program: String,
    /// Helper run inside a container to export or unexport an application.
    #[serde(default = "default_export_helper")]
    pub export_helper: String,
    /// Wall-clock deadline for every captured command.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Prefix commands with `flatpak-spawn --host`. Auto-detected when unset.
    #[serde(default)]
    pub host_spawn: Option<bool>,
}

/// Host desktop integration settings.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct DesktopConfig {
    /// Directory holding exported launcher files. Defaults to `$XDG_DATA_HOME/applications`.
    #[serde(default)]
    pub applications_dir: Option<String>,
    /// Directory scanned inside a container for installed launchers.
    #[serde(default = "default_container_applications_dir")]
    pub container_applications_dir: String,
    /// Terminal emulator to try before the built-in priority list.
    #[serde(default)]
    pub terminal: Option<String>,
}

/// Image catalog settings.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ImagesConfig {
    /// Registry-host substrings; catalog lines without one are dropped.
    #[serde(default = "default_registries")]
    pub registries: Vec<String>,
}

/// Values supplied on the command line that win over the config file.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub program: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            export_helper: default_export_helper(),
            timeout_secs: default_timeout_secs(),
            host_spawn: None,
        }
    }
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            applications_dir: None,
            container_applications_dir: default_container_applications_dir(),
            terminal: None,
        }
    }
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            registries: default_registries(),
        }
    }
}

fn default_program() -> String {
    "distrobox".to_string()
}
fn default_export_helper() -> String {
    "distrobox-export".to_string()
}
fn default_timeout_secs() -> u64 {
    60
}
fn default_container_applications_dir() -> String {
    "/usr/share/applications".to_string()
}
fn default_registries() -> Vec<String> {
    [
        "docker.io",
        "ghcr.io",
        "quay.io",
        "registry.fedoraproject.org",
        "registry.opensuse.org",
        "registry.access.redhat.com",
        "public.ecr.aws",
        "cgr.dev",
        "gcr.io",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Config {
    /// Deadline applied to every captured command.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.tool.timeout_secs)
    }

    /// Whether commands must be routed through `flatpak-spawn --host`.
    pub fn host_spawn(&self) -> bool {
        self.tool.host_spawn.unwrap_or_else(system::is_flatpak_sandbox)
    }

    /// Host directory holding exported launcher files.
    pub fn applications_dir(&self) -> PathBuf {
        match &self.desktop.applications_dir {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_dir()
                .or_else(|| dirs::home_dir().map(|h| h.join(".local/share")))
                .unwrap_or_else(|| PathBuf::from(".local/share"))
                .join("applications"),
        }
    }
}

const CONFIG_FILENAME: &str = "config.toml";

/// Loads the configuration, applies command-line overrides, expands and validates it.
///
/// An explicit `path` must exist. Without one the user config is used if present,
/// otherwise the built-in defaults.
pub fn load_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Config> {
    let mut config = match path {
        Some(p) => {
            info!("Loading configuration from: {}", p.display());
            load_config_from_path(p)?
        }
        None => load_user_config()?.unwrap_or_default(),
    };
    apply_overrides(&mut config, overrides);
    expand_config_paths(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<Config>> {
    let Some(proj_dirs) = ProjectDirs::from("com", "BoxCtl", "boxctl") else {
        debug!("Could not determine user config directory.");
        return Ok(None);
    };
    let config_path = proj_dirs.config_dir().join(CONFIG_FILENAME);
    if config_path.exists() {
        info!("Loading user configuration from: {}", config_path.display());
        load_config_from_path(&config_path).map(Some)
    } else {
        debug!(
            "User configuration file not found at {}",
            config_path.display()
        );
        Ok(None)
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn apply_overrides(config: &mut Config, overrides: &ConfigOverrides) {
    if let Some(program) = &overrides.program {
        debug!("Overriding tool program with '{}'", program);
        config.tool.program = program.clone();
    }
    if let Some(secs) = overrides.timeout_secs {
        debug!("Overriding timeout with {}s", secs);
        config.tool.timeout_secs = secs;
    }
}

fn expand_config_paths(config: &mut Config) {
    config.tool.program = shellexpand::tilde(&config.tool.program).into_owned();
    if let Some(dir) = &config.desktop.applications_dir {
        config.desktop.applications_dir = Some(shellexpand::tilde(dir).into_owned());
    }
}

fn validate_config(config: &Config) -> Result<()> {
    if config.tool.program.trim().is_empty() {
        return Err(anyhow!(BoxError::Config(
            "tool.program cannot be empty.".to_string()
        )));
    }
    if config.tool.export_helper.trim().is_empty() {
        return Err(anyhow!(BoxError::Config(
            "tool.export_helper cannot be empty.".to_string()
        )));
    }
    if config.tool.timeout_secs == 0 {
        return Err(anyhow!(BoxError::Config(
            "tool.timeout_secs must be greater than zero.".to_string()
        )));
    }
    if config.images.registries.iter().all(|r| r.trim().is_empty()) {
        return Err(anyhow!(BoxError::Config(
            "images.registries must name at least one registry host.".to_string()
        )));
    }
    if let Some(terminal) = &config.desktop.terminal {
        if terminal.trim().is_empty() {
            return Err(anyhow!(BoxError::Config(
                "desktop.terminal cannot be empty when set.".to_string()
            )));
        }
    }
    Ok(())
}
