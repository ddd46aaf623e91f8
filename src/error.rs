//! Error types for semlog modules using thiserror.

use thiserror::Error;

/// Errors from GitHub API operations.
#[derive(Error, Debug)]
pub enum GitHubError {
    #[error(
        "GitHub authentication failed: no valid auth found. Run 'gh auth login' or set GITHUB_TOKEN environment variable"
    )]
    AuthenticationFailed,

    #[error("GitHub API request failed: {0}")]
    Api(#[source] Box<octocrab::Error>),

    #[error("Rate limited by GitHub API. Resets at: {reset_time}")]
    RateLimited { reset_time: String },

    #[error("Repository not found: {owner}/{repo}")]
    RepositoryNotFound { owner: String, repo: String },

    #[error("Failed to parse repository URL")]
    InvalidRepositoryUrl,

    #[error("GitHub returned unreadable content for {path}: {reason}")]
    InvalidContent { path: String, reason: String },

    #[error("Failed to detect repository from git remote: {0}")]
    RemoteDetection(#[source] git2::Error),
}

/// Errors from changelog operations.
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error(
        "Unknown entry position '{0}'. Expected one of: top, bottom, above-previous, below-previous"
    )]
    UnknownEntryPosition(String),

    #[error("Invalid timestamp '{0}'. Expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS")]
    InvalidTimestamp(String),

    #[error(transparent)]
    Version(#[from] VersionError),
}

/// Errors from version operations.
#[derive(Error, Debug)]
pub enum VersionError {
    #[error("Invalid version '{0}'. Expected vMAJOR.MINOR.PATCH")]
    InvalidFormat(String),
}

/// Errors from a changelog release run.
///
/// Every variant is fatal for the run; the orchestrator stops at the first one.
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error(
        "No release header found in {path}. Add a '## vX.Y.Z - (YYYY-MM-DD)' or '## [initial release] - (YYYY-MM-DD)' line"
    )]
    NoMarkerFound { path: String },

    #[error("No changes found since {since}. Nothing to release.")]
    NoChangesFound { since: String },

    #[error(transparent)]
    Version(#[from] VersionError),

    #[error(transparent)]
    Changelog(#[from] ChangelogError),

    #[error("Failed to fetch changelog: {0}")]
    FetchFailed(#[source] GitHubError),

    #[error("Failed to collect changes: {0}")]
    CollectFailed(#[source] GitHubError),

    #[error("Failed to publish changelog: {0}")]
    PublishFailed(#[source] GitHubError),

    #[error("Failed to create release {version}: {source}")]
    ReleaseCreationFailed {
        version: String,
        #[source]
        source: GitHubError,
    },
}
