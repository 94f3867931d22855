//! # Distribution Classification
//!
//! File: cli/src/common/distrobox/distro.rs
//!
//! Infers a short distribution identifier (`"fedora"`, `"alpine"`, ...) from an
//! image reference. The result is a display hint derived from the reference,
//! never authoritative.
//!
//! Classification is first-match-wins over [`DISTRO_CATALOG`], in two passes:
//! 1. against the final path segment only (`docker.io/library/ubuntu:22.04` -> `ubuntu:22.04`)
//! 2. against the whole lower-cased reference, for registries that put the
//!    family earlier in the path (`quay.io/toolbx-images/alpine-toolbox` style paths,
//!    `registry.fedoraproject.org/fedora-toolbox`)
//!
//! Ties are broken by catalog order, not by the length or specificity of the
//! match, so `"arch"` wins over anything listed after it.
//!
use serde::Serialize;
use std::fmt;

/// Known distribution-family tokens, in match priority order.
pub const DISTRO_CATALOG: &[&str] = &[
    "alma",
    "alpine",
    "amazon",
    "bazzite",
    "arch",
    "centos",
    "clearlinux",
    "crystal",
    "debian",
    "deepin",
    "fedora",
    "gentoo",
    "kali",
    "mageia",
    "mint",
    "neon",
    "opensuse",
    "oracle",
    "redhat",
    "rhel",
    "rocky",
    "slackware",
    "steamos",
    "ubuntu",
    "ublue",
    "vanilla",
    "void",
];

/// Returned when no catalog token matches.
pub const UNKNOWN_DISTRO: &str = "unknown";

/// Classifies an image reference into a distribution token.
pub fn classify(reference: &str) -> &'static str {
    let lowered = reference.to_lowercase();
    let last_segment = lowered.rsplit('/').next().unwrap_or(&lowered);

    DISTRO_CATALOG
        .iter()
        .find(|token| last_segment.contains(*token))
        .or_else(|| DISTRO_CATALOG.iter().find(|token| lowered.contains(*token)))
        .copied()
        .unwrap_or(UNKNOWN_DISTRO)
}

/// Package format used inside a container, for installing local package files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageKind {
    Deb,
    Rpm,
    Arch,
}

// Checked in this order; the first family with a matching hint decides.
const PACKAGE_HINTS: &[(PackageKind, &[&str])] = &[
    (
        PackageKind::Arch,
        &["arch", "blackarch", "crystal", "bazzite-arch"],
    ),
    (
        PackageKind::Deb,
        &["debian", "ubuntu", "mint", "vso", "popos", "kali", "neon", "neurodebian"],
    ),
    (
        PackageKind::Rpm,
        &[
            "fedora", "rhel", "centos", "opensuse", "suse", "rocky", "ubi", "alma", "mageia",
            "amazon", "oracle",
        ],
    ),
];

impl PackageKind {
    /// Infers the package format from an image reference, if it is one boxctl can install.
    pub fn from_image(reference: &str) -> Option<Self> {
        let lowered = reference.to_lowercase();
        PACKAGE_HINTS
            .iter()
            .find(|(_, hints)| hints.iter().any(|hint| lowered.contains(hint)))
            .map(|(kind, _)| *kind)
    }

    /// Command (run inside the container) that installs the package file at `path`.
    pub fn install_command(self, path: &str) -> Vec<String> {
        let words: &[&str] = match self {
            PackageKind::Deb => &["sudo", "apt", "install", "-y"],
            PackageKind::Rpm => &["sudo", "dnf", "install", "-y"],
            PackageKind::Arch => &["sudo", "pacman", "-U", "--noconfirm"],
        };
        words
            .iter()
            .map(|w| w.to_string())
            .chain(std::iter::once(path.to_string()))
            .collect()
    }
}

impl fmt::Display for PackageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PackageKind::Deb => "deb",
            PackageKind::Rpm => "rpm",
            PackageKind::Arch => "arch",
        };
        f.write_str(name)
    }
}
