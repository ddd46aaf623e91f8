//! Signal-word classification of change items.

use serde::{Deserialize, Serialize};

use super::item::ChangeItem;

/// Semantic-versioning bump category of a change.
///
/// Ordered by precedence: `None < Fix < Feature < Breaking`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpCategory {
    None,
    Fix,
    Feature,
    Breaking,
}

impl BumpCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Fix => "fix",
            Self::Feature => "feature",
            Self::Breaking => "breaking",
        }
    }
}

/// Signal words per category, checked top to bottom. The first category
/// with a matching keyword wins.
pub const CATEGORY_KEYWORDS: &[(BumpCategory, &[&str])] = &[
    (BumpCategory::Breaking, &["breaking change"]),
    (BumpCategory::Feature, &["feature", "feat"]),
    (BumpCategory::Fix, &["fix"]),
];

/// Classify lower-cased text by substring containment.
pub fn classify_text(text: &str) -> BumpCategory {
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| text.contains(kw)))
        .map(|(category, _)| *category)
        .unwrap_or(BumpCategory::None)
}

/// Classify a single change item.
pub fn classify(item: &ChangeItem) -> BumpCategory {
    classify_text(&item.classification_text())
}

/// Whether the item qualifies for collection: a commit's full message or a
/// PR's title carries a signal word. PR bodies are not consulted here.
pub fn has_signal(item: &ChangeItem) -> bool {
    let text = match item {
        ChangeItem::Commit(commit) => commit.message.to_lowercase(),
        ChangeItem::PullRequest(pr) => pr.title.to_lowercase(),
    };
    classify_text(&text) != BumpCategory::None
}
