//! Locate the previous release marker in a changelog.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex_lite::Regex;
use semver::Version;
use tracing::{debug, info, warn};

use super::format::{INITIAL_RELEASE_LABEL, is_header_line, parse_timestamp};
use crate::error::ChangelogError;
use crate::version::parse_version_tag;

/// `## v1.2.3 - (2024-01-01)`; the ` - ` separator is optional and the
/// timestamp may carry a `THH:MM:SS` time.
static RELEASE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^##\s+(v\d+\.\d+\.\d+)\s+(?:-\s*)?\((\d{4}-\d{2}-\d{2}(?:T\d{2}:\d{2}:\d{2})?)\)\s*$",
    )
    .expect("release header pattern is valid")
});

static TRAILING_TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\((\d{4}-\d{2}-\d{2}(?:T\d{2}:\d{2}:\d{2})?)\)\s*$")
        .expect("trailing timestamp pattern is valid")
});

/// Where a marker came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// A versioned release header.
    Release,
    /// An `initial release` header; the version is reported as `v0.0.0`.
    Initial,
}

/// The most recent release recorded in a changelog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseMarker {
    pub version: Version,
    pub timestamp: NaiveDateTime,
    pub kind: MarkerKind,
}

/// Parse a single release header line.
///
/// `Ok(None)` if the line is not a release header. A line that has the
/// header shape but an unusable version or timestamp is an error.
pub fn parse_release_line(line: &str) -> Result<Option<(Version, NaiveDateTime)>, ChangelogError> {
    let Some(caps) = RELEASE_HEADER.captures(line) else {
        return Ok(None);
    };

    let (Some(version), Some(timestamp)) = (caps.get(1), caps.get(2)) else {
        return Ok(None);
    };

    let version = parse_version_tag(version.as_str())?;
    let timestamp = parse_timestamp(timestamp.as_str())?;

    Ok(Some((version, timestamp)))
}

/// Find the previous release marker.
///
/// The first matching release header from the top wins. Without one, the
/// first header containing `initial release` (any case) with a trailing
/// parenthesized timestamp is used as version `v0.0.0`.
pub fn find_release_marker(changelog: &str) -> Result<Option<ReleaseMarker>, ChangelogError> {
    let mut header_lines = Vec::new();

    for line in changelog.lines().filter(|line| is_header_line(line)) {
        if let Some((version, timestamp)) = parse_release_line(line)? {
            info!(%version, %timestamp, "Found existing release");
            return Ok(Some(ReleaseMarker {
                version,
                timestamp,
                kind: MarkerKind::Release,
            }));
        }
        header_lines.push(line);
    }

    debug!("No versioned release header found, checking for initial release");

    let initial = header_lines
        .into_iter()
        .filter(|line| line.to_lowercase().contains(INITIAL_RELEASE_LABEL))
        .find_map(|line| {
            let caps = TRAILING_TIMESTAMP.captures(line)?;
            match parse_timestamp(caps.get(1)?.as_str()) {
                Ok(timestamp) => Some(timestamp),
                Err(e) => {
                    warn!(line = %line, "Ignoring initial release header: {}", e);
                    None
                }
            }
        })
        .map(|timestamp| {
            info!(%timestamp, "Found initial release");
            ReleaseMarker {
                version: Version::new(0, 0, 0),
                timestamp,
                kind: MarkerKind::Initial,
            }
        });

    Ok(initial)
}
