//! Release creation.

use octocrab::Octocrab;
use serde::Serialize;
use tracing::debug;

use super::client::map_api_error;
use crate::error::GitHubError;
use crate::release::host::ReleaseRequest;

#[derive(Serialize)]
struct CreateReleaseBody<'a> {
    tag_name: &'a str,
    target_commitish: &'a str,
    name: &'a str,
    body: &'a str,
    draft: bool,
    prerelease: bool,
}

/// Create a tagged release; the tag is created on `git_ref` if missing.
pub async fn create_release(
    octocrab: &Octocrab,
    owner: &str,
    repo: &str,
    request: &ReleaseRequest,
) -> Result<(), GitHubError> {
    let body = CreateReleaseBody {
        tag_name: &request.tag,
        target_commitish: &request.git_ref,
        name: &request.tag,
        body: &request.body,
        draft: request.draft,
        prerelease: request.prerelease,
    };

    let response: serde_json::Value = octocrab
        .post(format!("/repos/{}/{}/releases", owner, repo), Some(&body))
        .await
        .map_err(|e| map_api_error(e, owner, repo))?;

    debug!(id = %response["id"], tag = %request.tag, "Created release");
    Ok(())
}
