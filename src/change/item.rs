//! Change items collected from commits and pull requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A commit collected from the source host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitChange {
    /// Full commit message, including the body.
    pub message: String,
    /// Abbreviated commit hash.
    pub short_id: String,
}

/// A merged pull request collected from the source host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestChange {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub merged_at: Option<DateTime<Utc>>,
}

/// A single change that goes into a changelog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChangeItem {
    Commit(CommitChange),
    PullRequest(PullRequestChange),
}

impl ChangeItem {
    /// Summary line: a commit's first message line, or a PR title.
    pub fn summary(&self) -> &str {
        match self {
            Self::Commit(commit) => commit.message.lines().next().unwrap_or(""),
            Self::PullRequest(pr) => &pr.title,
        }
    }

    /// Lower-cased text scanned for signal words.
    ///
    /// Commits contribute their whole message; pull requests their title and
    /// body separated by a newline.
    pub fn classification_text(&self) -> String {
        match self {
            Self::Commit(commit) => commit.message.to_lowercase(),
            Self::PullRequest(pr) => {
                let body = pr.body.as_deref().unwrap_or("");
                format!("{}\n{}", pr.title, body).to_lowercase()
            }
        }
    }
}

impl From<CommitChange> for ChangeItem {
    fn from(commit: CommitChange) -> Self {
        Self::Commit(commit)
    }
}

impl From<PullRequestChange> for ChangeItem {
    fn from(pr: PullRequestChange) -> Self {
        Self::PullRequest(pr)
    }
}
