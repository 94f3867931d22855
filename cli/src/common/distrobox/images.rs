//! # Image Catalog
//!
//! File: cli/src/common/distrobox/images.rs
//!
//! `distrobox create -C` prints the images it knows how to create boxes from,
//! mixed with headers and prompts. Only lines mentioning a known registry host
//! are kept; the last whitespace-separated word of such a line is the full
//! image reference, and its final path segment is the short name.
//!
use super::{distro, ImageCatalogEntry};

/// Parses catalog output, keeping lines that mention one of `registries`.
pub fn parse_catalog<S: AsRef<str>>(output: &str, registries: &[S]) -> Vec<ImageCatalogEntry> {
    output
        .lines()
        .filter(|line| {
            registries.iter().any(|registry| {
                let registry = registry.as_ref();
                !registry.is_empty() && line.contains(registry)
            })
        })
        .filter_map(|line| line.split_whitespace().last())
        .map(ImageCatalogEntry::from_reference)
        .collect()
}

/// Case-insensitive match of `query` against name, url or classified distro.
pub fn search(entries: Vec<ImageCatalogEntry>, query: &str) -> Vec<ImageCatalogEntry> {
    let query = query.to_lowercase();
    entries
        .into_iter()
        .filter(|entry| {
            entry.name.to_lowercase().contains(&query)
                || entry.url.to_lowercase().contains(&query)
                || distro::classify(&entry.url).contains(query.as_str())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGISTRIES: [&str; 3] = ["docker.io", "ghcr.io", "quay.io"];

    const CATALOG: &str = "\
Images

  docker.io/library/alpine:latest
  quay.io/toolbx/ubuntu-toolbox:22.04
Choose an image:
  ghcr.io/ublue-os/bazzite-arch:latest
  registry.fedoraproject.org/fedora-toolbox:40
";

    #[test]
    fn test_parse_catalog_filters_to_references() {
        let entries = parse_catalog(CATALOG, &REGISTRIES);
        let urls: Vec<_> = entries.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "docker.io/library/alpine:latest",
                "quay.io/toolbx/ubuntu-toolbox:22.04",
                "ghcr.io/ublue-os/bazzite-arch:latest",
            ]
        );
        assert_eq!(entries[0].name, "alpine:latest");
        assert_eq!(entries[1].name, "ubuntu-toolbox:22.04");
    }

    #[test]
    fn test_parse_catalog_takes_last_word() {
        let entries = parse_catalog("  * Fedora  registry.fedoraproject.org/fedora:40 ", &["fedoraproject.org"]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].url, "registry.fedoraproject.org/fedora:40");
        assert_eq!(entries[0].name, "fedora:40");
    }

    #[test]
    fn test_parse_catalog_empty() {
        assert!(parse_catalog("", &REGISTRIES).is_empty());
        assert!(parse_catalog("no images here\n", &REGISTRIES).is_empty());
    }

    #[test]
    fn test_search_by_name_url_and_distro() {
        let entries = parse_catalog(CATALOG, &REGISTRIES);

        let by_name = search(entries.clone(), "ALPINE");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "alpine:latest");

        let by_url = search(entries.clone(), "quay.io");
        assert_eq!(by_url.len(), 1);

        let by_distro = search(entries.clone(), "bazzite");
        assert_eq!(by_distro[0].url, "ghcr.io/ublue-os/bazzite-arch:latest");

        assert!(search(entries, "gentoo").is_empty());
    }
}
