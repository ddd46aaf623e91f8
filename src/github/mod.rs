//! GitHub API operations using octocrab.

pub mod auth;
pub mod client;
pub mod commits;
pub mod contents;
pub mod prs;
pub mod releases;
pub mod remote;

pub use auth::{GitHubConfig, get_github_token};
pub use client::GitHubClient;
pub use remote::{detect_repository, parse_github_remote, parse_repository_slug};
