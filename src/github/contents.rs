//! Changelog file access through the repository contents API.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::client::{is_not_found, map_api_error};
use crate::error::GitHubError;
use crate::release::host::{CommitAuthor, PublishRequest, RemoteDocument};

#[derive(Debug, Deserialize)]
struct ContentResponse {
    sha: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    encoding: Option<String>,
}

#[derive(Serialize)]
struct RefQuery<'a> {
    #[serde(rename = "ref")]
    git_ref: &'a str,
}

#[derive(Serialize)]
struct PutFileBody<'a> {
    message: &'a str,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
    branch: &'a str,
    author: &'a CommitAuthor,
    committer: &'a CommitAuthor,
}

fn contents_route(owner: &str, repo: &str, path: &str) -> String {
    format!(
        "/repos/{}/{}/contents/{}",
        owner,
        repo,
        path.trim_start_matches('/')
    )
}

/// Fetch a text file. Returns `Ok(None)` if it does not exist on `git_ref`.
pub async fn fetch_file(
    octocrab: &Octocrab,
    owner: &str,
    repo: &str,
    path: &str,
    git_ref: &str,
) -> Result<Option<RemoteDocument>, GitHubError> {
    let result: Result<ContentResponse, octocrab::Error> = octocrab
        .get(
            contents_route(owner, repo, path),
            Some(&RefQuery { git_ref }),
        )
        .await;

    let response = match result {
        Ok(response) => response,
        Err(e) if is_not_found(&e) => {
            // The contents API also answers 404 for unknown or inaccessible
            // repositories.
            ensure_repository_readable(octocrab, owner, repo).await?;
            debug!(path = %path, git_ref = %git_ref, "File not found");
            return Ok(None);
        }
        Err(e) => return Err(map_api_error(e, owner, repo)),
    };

    let text = decode_content(path, &response)?;

    Ok(Some(RemoteDocument {
        text,
        revision: response.sha,
    }))
}

/// Fails with [`GitHubError::RepositoryNotFound`] if `owner/repo` cannot be
/// read with the current token.
async fn ensure_repository_readable(
    octocrab: &Octocrab,
    owner: &str,
    repo: &str,
) -> Result<(), GitHubError> {
    let _: serde_json::Value = octocrab
        .get(format!("/repos/{}/{}", owner, repo), None::<&()>)
        .await
        .map_err(|e| map_api_error(e, owner, repo))?;
    Ok(())
}

/// Create (`revision: None`) or update a text file with a single commit.
pub async fn put_file(
    octocrab: &Octocrab,
    owner: &str,
    repo: &str,
    request: &PublishRequest,
) -> Result<(), GitHubError> {
    let body = PutFileBody {
        message: &request.commit_message,
        content: BASE64.encode(request.text.as_bytes()),
        sha: request.revision.as_deref(),
        branch: &request.git_ref,
        author: &request.author,
        committer: &request.author,
    };

    let _: serde_json::Value = octocrab
        .put(contents_route(owner, repo, &request.path), Some(&body))
        .await
        .map_err(|e| map_api_error(e, owner, repo))?;

    Ok(())
}

fn decode_content(path: &str, response: &ContentResponse) -> Result<String, GitHubError> {
    let invalid = |reason: String| GitHubError::InvalidContent {
        path: path.to_string(),
        reason,
    };

    if let Some(encoding) = response.encoding.as_deref()
        && encoding != "base64"
    {
        return Err(invalid(format!("unsupported encoding '{}'", encoding)));
    }

    let raw = response.content.as_deref().unwrap_or("");
    // GitHub wraps the base64 payload at 60 columns.
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    let bytes = BASE64
        .decode(compact.as_bytes())
        .map_err(|e| invalid(e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| invalid(e.to_string()))
}
