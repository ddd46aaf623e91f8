//! Change items and their semver classification.

pub mod classify;
pub mod item;

pub use classify::{BumpCategory, classify, has_signal};
pub use item::{ChangeItem, CommitChange, PullRequestChange};
