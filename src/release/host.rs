//! Source-control host interface used by the release run.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::change::{CommitChange, PullRequestChange};
use crate::error::GitHubError;

/// A changelog file as stored on the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteDocument {
    pub text: String,
    /// Blob revision required to update the file.
    pub revision: String,
}

/// Identity used as author and committer of the changelog commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitAuthor {
    pub name: String,
    pub email: String,
}

impl Default for CommitAuthor {
    fn default() -> Self {
        Self {
            name: "GitHub Actions".to_string(),
            email: "github-actions[bot]@users.noreply.github.com".to_string(),
        }
    }
}

/// Request to write the changelog back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    pub path: String,
    pub text: String,
    /// `None` creates the file.
    pub revision: Option<String>,
    pub git_ref: String,
    pub commit_message: String,
    pub author: CommitAuthor,
}

/// Request to create a tagged release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRequest {
    /// Tag and release name, e.g. `v1.2.0`.
    pub tag: String,
    pub git_ref: String,
    pub body: String,
    pub draft: bool,
    pub prerelease: bool,
}

/// Time window and ref changes are collected from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionWindow {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
    pub git_ref: String,
}

impl CollectionWindow {
    /// Whether `at` lies within `[since, until]`.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.since && at <= self.until
    }
}

/// Pull request state to query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PullRequestState {
    Open,
    #[default]
    Closed,
    All,
}

/// Operations the release run needs from the source-control host.
///
/// This abstraction allows mocking the host in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SourceHost: Send + Sync {
    /// Fetch the changelog at `path` on `git_ref`. `Ok(None)` if absent.
    async fn fetch_changelog_document(
        &self,
        path: &str,
        git_ref: &str,
    ) -> Result<Option<RemoteDocument>, GitHubError>;

    /// Create or update the changelog file.
    async fn publish_changelog_document(&self, request: &PublishRequest)
    -> Result<(), GitHubError>;

    /// Commits on the window's ref, in host order.
    async fn collect_commits(
        &self,
        window: &CollectionWindow,
    ) -> Result<Vec<CommitChange>, GitHubError>;

    /// Pull requests into the window's ref merged within the window.
    async fn collect_pull_requests(
        &self,
        window: &CollectionWindow,
        state: PullRequestState,
    ) -> Result<Vec<PullRequestChange>, GitHubError>;

    async fn create_release(&self, request: &ReleaseRequest) -> Result<(), GitHubError>;
}
