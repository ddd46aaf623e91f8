//! Resolve `owner/repo` from flags or the local git remote.

use std::path::Path;

use git2::Repository;
use tracing::debug;

use crate::error::GitHubError;

/// Extract owner and repo from a git remote URL.
pub fn parse_github_remote(url: &str) -> Result<(String, String), GitHubError> {
    // Handle SSH format: git@github.com:owner/repo.git
    if let Some(path) = url.strip_prefix("git@github.com:") {
        return parse_owner_repo_path(path);
    }

    // Handle HTTPS format: https://github.com/owner/repo.git
    if url.contains("github.com/") {
        let path = url
            .split("github.com/")
            .nth(1)
            .ok_or(GitHubError::InvalidRepositoryUrl)?;
        return parse_owner_repo_path(path);
    }

    Err(GitHubError::InvalidRepositoryUrl)
}

/// Parse an `owner/repo` slug as given on the command line or in
/// `GITHUB_REPOSITORY`.
pub fn parse_repository_slug(slug: &str) -> Result<(String, String), GitHubError> {
    match slug.trim().split('/').collect::<Vec<_>>().as_slice() {
        [owner, repo] if !owner.is_empty() && !repo.is_empty() => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(GitHubError::InvalidRepositoryUrl),
    }
}

/// Find `owner/repo` from the `origin` remote of the repository containing
/// `path`.
pub fn detect_repository(path: &Path) -> Result<(String, String), GitHubError> {
    let repo = Repository::discover(path).map_err(GitHubError::RemoteDetection)?;
    let remote = repo
        .find_remote("origin")
        .map_err(GitHubError::RemoteDetection)?;
    let url = remote.url().ok_or(GitHubError::InvalidRepositoryUrl)?;

    debug!(url = %url, "Detected origin remote");
    parse_github_remote(url)
}

fn parse_owner_repo_path(path: &str) -> Result<(String, String), GitHubError> {
    let path = path.strip_suffix(".git").unwrap_or(path);
    let parts: Vec<&str> = path.split('/').collect();

    if parts.len() >= 2 && !parts[0].is_empty() && !parts[1].is_empty() {
        Ok((parts[0].to_string(), parts[1].to_string()))
    } else {
        Err(GitHubError::InvalidRepositoryUrl)
    }
}
