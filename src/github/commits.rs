//! Commit listing via the repository commits API.

use chrono::SecondsFormat;
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::client::{MAX_PAGES, PER_PAGE, map_api_error};
use crate::change::CommitChange;
use crate::error::GitHubError;
use crate::release::host::CollectionWindow;

/// Length of the abbreviated commit id.
pub const SHORT_ID_LENGTH: usize = 7;

#[derive(Debug, Deserialize)]
struct CommitResponse {
    sha: String,
    commit: CommitDetails,
}

#[derive(Debug, Deserialize)]
struct CommitDetails {
    message: String,
}

#[derive(Serialize)]
struct CommitQuery<'a> {
    sha: &'a str,
    since: String,
    until: String,
    per_page: u8,
    page: u32,
}

/// Fetch commits on the window's ref committed within the window.
///
/// Commits are returned in the order GitHub lists them (newest first).
pub async fn fetch_commits(
    octocrab: &Octocrab,
    owner: &str,
    repo: &str,
    window: &CollectionWindow,
) -> Result<Vec<CommitChange>, GitHubError> {
    let route = format!("/repos/{}/{}/commits", owner, repo);
    let mut all_commits = Vec::new();
    let mut page = 1u32;

    loop {
        let query = CommitQuery {
            sha: &window.git_ref,
            since: window.since.to_rfc3339_opts(SecondsFormat::Secs, true),
            until: window.until.to_rfc3339_opts(SecondsFormat::Secs, true),
            per_page: PER_PAGE,
            page,
        };

        let items: Vec<CommitResponse> = octocrab
            .get(&route, Some(&query))
            .await
            .map_err(|e| map_api_error(e, owner, repo))?;

        let count = items.len();
        debug!(page, count, "Fetched commit page");

        all_commits.extend(items.into_iter().map(|item| CommitChange {
            short_id: short_id(&item.sha),
            message: item.commit.message,
        }));

        if count < PER_PAGE as usize {
            break;
        }

        page += 1;

        // Safety limit to prevent infinite loops
        if page > MAX_PAGES {
            warn!(
                "Reached {}-page safety limit while fetching commits for {}/{}",
                MAX_PAGES, owner, repo
            );
            break;
        }
    }

    Ok(all_commits)
}

fn short_id(sha: &str) -> String {
    sha.chars().take(SHORT_ID_LENGTH).collect()
}
