//! Changelog header grammar and timestamp formats.
//!
//! Release headers look like `## v1.2.3 - (2024-01-01T09:30:00)`. The
//! bootstrap header is `## [initial release] - (2024-01-01T09:30:00)`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use semver::Version;

use crate::error::ChangelogError;
use crate::version::format_version_tag;

/// Prefix that marks a release-section header line.
pub const HEADER_PREFIX: &str = "##";

/// Label of the bootstrap header.
pub const INITIAL_RELEASE_LABEL: &str = "initial release";

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Keep a Changelog preamble for new files.
pub const CHANGELOG_HEADER: &str = r#"# Changelog

All notable changes to this project will be documented in this file.

The format is based on [Keep a Changelog](https://keepachangelog.com/en/1.0.0/), and this project adheres to [Semantic Versioning](https://semver.org/spec/v2.0.0.html).

"#;

/// How timestamps are written into headers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimestampFormat {
    /// `YYYY-MM-DD`
    Date,
    /// `YYYY-MM-DDTHH:MM:SS`
    #[default]
    DateTime,
}

impl TimestampFormat {
    pub fn format(&self, timestamp: &NaiveDateTime) -> String {
        match self {
            Self::Date => timestamp.format(DATE_FORMAT).to_string(),
            Self::DateTime => timestamp.format(DATE_TIME_FORMAT).to_string(),
        }
    }
}

/// Parse a header timestamp. Date-only values are midnight.
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime, ChangelogError> {
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(text, DATE_TIME_FORMAT) {
        return Ok(timestamp);
    }

    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| ChangelogError::InvalidTimestamp(text.to_string()))
}

/// Format a release header line.
pub fn format_release_header(
    version: &Version,
    timestamp: &NaiveDateTime,
    timestamp_format: TimestampFormat,
) -> String {
    format!(
        "{} {} - ({})",
        HEADER_PREFIX,
        format_version_tag(version),
        timestamp_format.format(timestamp)
    )
}

/// Format the bootstrap header line.
pub fn format_initial_header(
    timestamp: &NaiveDateTime,
    timestamp_format: TimestampFormat,
) -> String {
    format!(
        "{} [{}] - ({})",
        HEADER_PREFIX,
        INITIAL_RELEASE_LABEL,
        timestamp_format.format(timestamp)
    )
}

/// Full text of a freshly created changelog.
pub fn initial_document(timestamp: &NaiveDateTime, timestamp_format: TimestampFormat) -> String {
    format!(
        "{}{}\n",
        CHANGELOG_HEADER,
        format_initial_header(timestamp, timestamp_format)
    )
}

/// Whether a line starts a release section.
pub fn is_header_line(line: &str) -> bool {
    line.starts_with(HEADER_PREFIX)
}
