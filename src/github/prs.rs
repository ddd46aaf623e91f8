//! PR fetching via octocrab.

use octocrab::Octocrab;
use octocrab::params::{self, pulls::Sort};
use tracing::{debug, warn};

use super::client::{MAX_PAGES, PER_PAGE, map_api_error};
use crate::change::PullRequestChange;
use crate::error::GitHubError;
use crate::release::host::{CollectionWindow, PullRequestState};

/// Maximum PR body length kept for classification (10KB).
pub const MAX_BODY_LENGTH: usize = 10 * 1024;

/// Fetch PRs targeting the window's ref that were merged within the window.
///
/// PRs are listed most recently updated first, so paging stops once a PR
/// was last updated before the window opened.
pub async fn fetch_merged_prs(
    octocrab: &Octocrab,
    owner: &str,
    repo: &str,
    window: &CollectionWindow,
    state: PullRequestState,
) -> Result<Vec<PullRequestChange>, GitHubError> {
    let mut all_prs = Vec::new();
    let mut page = 1u32;

    'pages: loop {
        let prs_page = octocrab
            .pulls(owner, repo)
            .list()
            .state(list_state(state))
            .base(window.git_ref.as_str())
            .sort(Sort::Updated)
            .direction(params::Direction::Descending)
            .per_page(PER_PAGE)
            .page(page)
            .send()
            .await
            .map_err(|e| map_api_error(e, owner, repo))?;

        let items = prs_page.items;
        debug!(page, count = items.len(), "Fetched pull request page");
        if items.is_empty() {
            break;
        }

        for pr in items {
            if let Some(updated_at) = pr.updated_at
                && updated_at < window.since
            {
                break 'pages;
            }

            // Only include merged PRs
            let Some(merged_at) = pr.merged_at else {
                continue;
            };

            if !window.contains(merged_at) {
                continue;
            }

            all_prs.push(PullRequestChange {
                number: pr.number,
                title: pr.title.unwrap_or_default(),
                body: pr.body.map(truncate_body),
                merged_at: Some(merged_at),
            });
        }

        // Check if there are more pages
        if prs_page.next.is_none() {
            break;
        }

        page += 1;

        // Safety limit to prevent infinite loops
        if page > MAX_PAGES {
            warn!(
                "Reached {}-page safety limit while fetching PRs for {}/{}",
                MAX_PAGES, owner, repo
            );
            break;
        }
    }

    Ok(all_prs)
}

fn list_state(state: PullRequestState) -> params::State {
    match state {
        PullRequestState::Open => params::State::Open,
        PullRequestState::Closed => params::State::Closed,
        PullRequestState::All => params::State::All,
    }
}

/// Cut an oversized body on a char boundary.
fn truncate_body(body: String) -> String {
    if body.len() <= MAX_BODY_LENGTH {
        return body;
    }

    let mut cut = MAX_BODY_LENGTH;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}... [truncated]", &body[..cut])
}
