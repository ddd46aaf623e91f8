//! GitHub-backed [`SourceHost`].

use async_trait::async_trait;
use octocrab::Octocrab;

use super::auth::GitHubConfig;
use super::{commits, contents, prs, releases};
use crate::change::{CommitChange, PullRequestChange};
use crate::error::GitHubError;
use crate::release::host::{
    CollectionWindow, PublishRequest, PullRequestState, ReleaseRequest, RemoteDocument,
    SourceHost,
};

/// Maximum number of pages fetched from any paginated endpoint.
pub(crate) const MAX_PAGES: u32 = 50;

/// Page size for paginated endpoints.
pub(crate) const PER_PAGE: u8 = 100;

/// A repository on GitHub, accessed through octocrab.
pub struct GitHubClient {
    octocrab: Octocrab,
    owner: String,
    repo: String,
}

impl GitHubClient {
    /// Build a client from explicit configuration.
    pub fn new(config: &GitHubConfig) -> Result<Self, GitHubError> {
        let mut builder = Octocrab::builder().personal_token(config.token.clone());

        if let Some(ref base) = config.api_base {
            builder = builder
                .base_uri(base.as_str())
                .map_err(|e| GitHubError::Api(Box::new(e)))?;
        }

        let octocrab = builder.build().map_err(|e| GitHubError::Api(Box::new(e)))?;

        Ok(Self::with_octocrab(octocrab, &config.owner, &config.repo))
    }

    /// Use a pre-configured octocrab client.
    ///
    /// This allows dependency injection for testing with mock servers.
    pub fn with_octocrab(octocrab: Octocrab, owner: &str, repo: &str) -> Self {
        Self {
            octocrab,
            owner: owner.to_string(),
            repo: repo.to_string(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }
}

#[async_trait]
impl SourceHost for GitHubClient {
    async fn fetch_changelog_document(
        &self,
        path: &str,
        git_ref: &str,
    ) -> Result<Option<RemoteDocument>, GitHubError> {
        contents::fetch_file(&self.octocrab, &self.owner, &self.repo, path, git_ref).await
    }

    async fn publish_changelog_document(
        &self,
        request: &PublishRequest,
    ) -> Result<(), GitHubError> {
        contents::put_file(&self.octocrab, &self.owner, &self.repo, request).await
    }

    async fn collect_commits(
        &self,
        window: &CollectionWindow,
    ) -> Result<Vec<CommitChange>, GitHubError> {
        commits::fetch_commits(&self.octocrab, &self.owner, &self.repo, window).await
    }

    async fn collect_pull_requests(
        &self,
        window: &CollectionWindow,
        state: PullRequestState,
    ) -> Result<Vec<PullRequestChange>, GitHubError> {
        prs::fetch_merged_prs(&self.octocrab, &self.owner, &self.repo, window, state).await
    }

    async fn create_release(&self, request: &ReleaseRequest) -> Result<(), GitHubError> {
        releases::create_release(&self.octocrab, &self.owner, &self.repo, request).await
    }
}

/// Whether an octocrab error is a 404.
pub(crate) fn is_not_found(e: &octocrab::Error) -> bool {
    let err_display = e.to_string();
    let err_debug = format!("{:?}", e);
    err_display.contains("Not Found") || err_debug.contains("Not Found")
}

/// Map an octocrab error to a [`GitHubError`].
///
/// Checks error content using both Display and Debug output to handle
/// different octocrab error formats.
pub(crate) fn map_api_error(e: octocrab::Error, owner: &str, repo: &str) -> GitHubError {
    let err_lower = e.to_string().to_lowercase();
    let debug_lower = format!("{:?}", e).to_lowercase();

    // GitHub returns 403 with a rate limit message
    if err_lower.contains("rate limit") || debug_lower.contains("rate limit") {
        return GitHubError::RateLimited {
            reset_time: "unknown".to_string(),
        };
    }

    if is_not_found(&e) {
        return GitHubError::RepositoryNotFound {
            owner: owner.to_string(),
            repo: repo.to_string(),
        };
    }

    GitHubError::Api(Box::new(e))
}
