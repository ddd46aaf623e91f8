//! semlog - generate changelog entries and semver releases from merged PRs and commits.
//!
//! # Overview
//!
//! semlog reads the changelog from a GitHub repository, finds the most recent
//! release header, collects commits and merged pull requests since then,
//! infers the next semantic version from signal words in their text, and
//! merges a new entry back into the changelog. Optionally it tags a release.

pub mod change;
pub mod changelog;
pub mod error;
pub mod github;
pub mod release;
pub mod version;

// Re-export commonly used types
pub use change::{BumpCategory, ChangeItem, CommitChange, PullRequestChange};
pub use changelog::{EntryPosition, ReleaseMarker, RenderOptions, RenderedEntry};
pub use error::{ChangelogError, GitHubError, ReleaseError, VersionError};
pub use release::{RunConfig, RunOutcome, SourceHost, run_release};
