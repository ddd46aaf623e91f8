//! GitHub authentication detection.
//!
//! Auth order:
//! 1. Check `gh auth status` (gh CLI)
//! 2. Fall back to GITHUB_TOKEN env var
//! 3. Fall back to GH_TOKEN env var

use std::env;
use std::process::Command;

use tracing::debug;

use crate::error::GitHubError;

/// Environment variable overriding the API base URL (GitHub Enterprise).
pub const API_URL_ENV_VAR: &str = "GITHUB_API_URL";

const PUBLIC_API_URL: &str = "https://api.github.com";

/// Connection settings for a single repository.
///
/// Built once at startup and handed to [`GitHubClient`](super::GitHubClient).
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub token: String,
    pub owner: String,
    pub repo: String,
    /// Custom API base URL; `None` uses api.github.com.
    pub api_base: Option<String>,
}

impl GitHubConfig {
    /// Build a config for `owner/repo` using the detected token and the
    /// `GITHUB_API_URL` override, if any.
    pub fn from_env(owner: &str, repo: &str) -> Result<Self, GitHubError> {
        Ok(Self {
            token: get_github_token()?,
            owner: owner.to_string(),
            repo: repo.to_string(),
            api_base: api_base_from_env(),
        })
    }
}

/// Custom API base URL, ignoring the public default.
fn api_base_from_env() -> Option<String> {
    env::var(API_URL_ENV_VAR)
        .ok()
        .map(|url| url.trim_end_matches('/').to_string())
        .filter(|url| !url.is_empty() && url != PUBLIC_API_URL)
}

/// Get a GitHub token using the configured auth strategy.
///
/// Checks in order:
/// 1. gh CLI auth (via `gh auth token`)
/// 2. GITHUB_TOKEN environment variable
/// 3. GH_TOKEN environment variable
pub fn get_github_token() -> Result<String, GitHubError> {
    if let Some(token) = get_token_from_gh_cli() {
        debug!("Using GitHub token from gh CLI");
        return Ok(token);
    }

    get_token_from_env().ok_or(GitHubError::AuthenticationFailed)
}

/// GITHUB_TOKEN, then GH_TOKEN; empty values are skipped.
fn get_token_from_env() -> Option<String> {
    ["GITHUB_TOKEN", "GH_TOKEN"]
        .into_iter()
        .filter_map(|name| env::var(name).ok())
        .find(|token| !token.is_empty())
}

/// Try to get a token from the gh CLI.
fn get_token_from_gh_cli() -> Option<String> {
    let status = Command::new("gh")
        .args(["auth", "status"])
        .output()
        .ok()?;

    if !status.status.success() {
        return None;
    }

    let output = Command::new("gh").args(["auth", "token"]).output().ok()?;

    if output.status.success() {
        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !token.is_empty() {
            return Some(token);
        }
    }

    None
}
