//! # Container State Listing
//!
//! File: cli/src/common/distrobox/state.rs
//!
//! ## Overview
//!
//! Turns the output of `distrobox list --no-color` into [`ContainerRecord`]s.
//! The tool prints a pipe-delimited table:
//!
//! ```text
//! ID           | NAME    | STATUS                 | IMAGE
//! 1a2b3c4d5e6f | devbox  | Up 2 hours             | docker.io/library/alpine:latest
//! 6f5e4d3c2b1a | testbox | Exited (0) 3 days ago  | docker.io/library/debian:stable
//! ```
//!
//! ## Parsing rules
//!
//! - The first line is the header. Each cell is trimmed and the positions of
//!   `NAME`, `IMAGE`, `ID` and `STATUS` are recorded. A missing column is a
//!   [`BoxError::MissingColumn`]; guessing would corrupt every record.
//! - Each following non-blank line is split and trimmed the same way, and cells
//!   are picked by the header positions, so column order does not matter.
//!   A row too short to reach a required column is a [`BoxError::MalformedRow`].
//! - No lines at all means no containers.
//! - `is_running` is derived from the status text; see [`status_is_running`].
//!
//! Each listing is a fresh snapshot. Nothing is cached or diffed here.
//!
use super::{distro, ContainerRecord};
use crate::core::error::{BoxError, Result};
use tracing::{debug, instrument};

/// Columns that must be present in the listing header.
pub const REQUIRED_COLUMNS: [&str; 4] = ["NAME", "IMAGE", "ID", "STATUS"];

/// Status substrings that mark a container as not running.
const STOPPED_MARKERS: [&str; 2] = ["Exited", "Created"];

/// `false` iff the status text contains a stopped-like marker.
pub fn status_is_running(status: &str) -> bool {
    !STOPPED_MARKERS.iter().any(|m| status.contains(m))
}

#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    name: usize,
    image: usize,
    id: usize,
    status: usize,
}

impl ColumnIndex {
    fn from_header(header: &str) -> Result<Self> {
        let cells = split_row(header);
        let position = |column: &str| {
            cells
                .iter()
                .position(|cell| *cell == column)
                .ok_or_else(|| BoxError::MissingColumn {
                    column: column.to_string(),
                    header: header.trim().to_string(),
                })
        };
        Ok(Self {
            name: position("NAME")?,
            image: position("IMAGE")?,
            id: position("ID")?,
            status: position("STATUS")?,
        })
    }

    fn widest(&self) -> usize {
        self.name.max(self.image).max(self.id).max(self.status) + 1
    }
}

fn split_row(line: &str) -> Vec<&str> {
    line.split('|').map(str::trim).collect()
}

/// Parses the full text of a container listing.
#[instrument(skip_all)]
pub fn parse_listing(output: &str) -> Result<Vec<ContainerRecord>> {
    let mut lines = output.lines().skip_while(|line| line.trim().is_empty());
    let Some(header) = lines.next() else {
        debug!("Empty listing output, no containers");
        return Ok(Vec::new());
    };
    let columns = ColumnIndex::from_header(header)?;
    let expected = columns.widest();

    let mut records = Vec::new();
    for (offset, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let cells = split_row(line);
        if cells.len() < expected {
            return Err(BoxError::MalformedRow {
                row: offset + 1,
                found: cells.len(),
                expected,
                line: line.to_string(),
            }
            .into());
        }
        let image_url = cells[columns.image].to_string();
        let status = cells[columns.status].to_string();
        records.push(ContainerRecord {
            name: cells[columns.name].to_string(),
            distro: distro::classify(&image_url).to_string(),
            container_id: cells[columns.id].to_string(),
            is_running: status_is_running(&status),
            image_url,
            status,
        });
    }
    debug!("Parsed {} container record(s)", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "\
ID           | NAME    | STATUS                | IMAGE
1a2b3c4d5e6f | devbox  | Up 2 hours            | docker.io/library/alpine:latest
6f5e4d3c2b1a | testbox | Exited (0) 3 days ago | docker.io/library/debian:stable
aabbccddeeff | newbox  | Created               | registry.fedoraproject.org/fedora-toolbox:40
";

    #[test]
    fn test_parse_listing_rows_in_order() {
        let records = parse_listing(LISTING).unwrap();
        assert_eq!(records.len(), 3);

        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["devbox", "testbox", "newbox"]);

        assert_eq!(records[0].container_id, "1a2b3c4d5e6f");
        assert_eq!(records[0].image_url, "docker.io/library/alpine:latest");
        assert_eq!(records[0].distro, "alpine");
        assert_eq!(records[0].status, "Up 2 hours");
        assert!(records[0].is_running);

        assert_eq!(records[1].distro, "debian");
        assert!(!records[1].is_running);

        assert_eq!(records[2].distro, "fedora");
        assert!(!records[2].is_running);
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let reordered = "\
STATUS | IMAGE | NAME | ID
Up 5 minutes | quay.io/toolbx/ubuntu-toolbox:22.04 | work | 0123
";
        let records = parse_listing(reordered).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "work");
        assert_eq!(records[0].container_id, "0123");
        assert_eq!(records[0].status, "Up 5 minutes");
        assert_eq!(records[0].distro, "ubuntu");
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let wide = "\
ID | NAME | STATUS | IMAGE | PORTS
42 | db | Up 1 second | docker.io/library/alpine:3 | 5432
";
        let records = parse_listing(wide).unwrap();
        assert_eq!(records[0].name, "db");
    }

    #[test]
    fn test_blank_lines_skipped() {
        let with_blanks = "NAME|IMAGE|ID|STATUS\n\n   \nbox|img|1|Up\n\n";
        let records = parse_listing(with_blanks).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_empty_output_is_empty_listing() {
        assert!(parse_listing("").unwrap().is_empty());
    }

    #[test]
    fn test_whitespace_only_output_is_empty_listing() {
        assert!(parse_listing("\n").unwrap().is_empty());
        assert!(parse_listing("  \n\n").unwrap().is_empty());
    }

    #[test]
    fn test_leading_blank_lines_before_header() {
        let records = parse_listing("\nNAME|IMAGE|ID|STATUS\nb|img|1|Up\n").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "b");
        assert_eq!(records[0].container_id, "1");
        assert!(records[0].is_running);
    }

    #[test]
    fn test_header_only_is_empty_listing() {
        assert!(parse_listing("ID | NAME | STATUS | IMAGE\n").unwrap().is_empty());
    }

    #[test]
    fn test_missing_column_is_structural_error() {
        for missing in REQUIRED_COLUMNS {
            let header: Vec<_> = REQUIRED_COLUMNS
                .iter()
                .filter(|c| **c != missing)
                .copied()
                .collect();
            let output = format!("{}\nx | y | z\n", header.join(" | "));
            let err = parse_listing(&output).unwrap_err();
            match err.downcast_ref::<BoxError>() {
                Some(BoxError::MissingColumn { column, .. }) => assert_eq!(column, missing),
                other => panic!("expected MissingColumn for {}, got {:?}", missing, other),
            }
        }
    }

    #[test]
    fn test_non_table_output_is_structural_error() {
        let err = parse_listing("Error: 'distrobox list' returned non-zero exit status 1").unwrap_err();
        assert!(err
            .downcast_ref::<BoxError>()
            .is_some_and(|be| matches!(be, BoxError::MissingColumn { .. })));
    }

    #[test]
    fn test_short_row_is_structural_error() {
        let err = parse_listing("ID | NAME | STATUS | IMAGE\nabc | onlyname\n").unwrap_err();
        assert!(err
            .downcast_ref::<BoxError>()
            .is_some_and(|be| matches!(be, BoxError::MalformedRow { row: 1, found: 2, expected: 4, .. })));
    }

    #[test]
    fn test_status_is_running() {
        assert!(status_is_running("Up 2 hours"));
        assert!(status_is_running("running"));
        assert!(!status_is_running("Exited (137) 5 minutes ago"));
        assert!(!status_is_running("Created"));
    }
}
