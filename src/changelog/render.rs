//! Render a new changelog section.

use chrono::NaiveDateTime;
use semver::Version;

use super::format::{TimestampFormat, format_release_header};
use crate::change::ChangeItem;

/// Default maximum length of a rendered commit line.
pub const MAX_COMMIT_HEADER_LENGTH: usize = 100;

/// Marker appended to truncated commit lines.
pub const TRUNCATION_MARKER: &str = "...";

/// Options controlling how an entry is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Truncate commit lines longer than this many characters.
    pub max_commit_length: Option<usize>,
    /// Append the short commit id, e.g. `- fix: typo (abc1234)`.
    pub commit_ids: bool,
    /// Append the PR number, e.g. `- Add cache (#12)`.
    pub pr_numbers: bool,
    pub timestamp_format: TimestampFormat,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_commit_length: Some(MAX_COMMIT_HEADER_LENGTH),
            commit_ids: false,
            pr_numbers: false,
            timestamp_format: TimestampFormat::default(),
        }
    }
}

/// A rendered changelog section: a header line followed by list items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEntry {
    pub header: String,
    pub items: Vec<String>,
}

impl RenderedEntry {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.header.as_str()).chain(self.items.iter().map(String::as_str))
    }

    pub fn line_count(&self) -> usize {
        1 + self.items.len()
    }
}

impl std::fmt::Display for RenderedEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text: Vec<&str> = self.lines().collect();
        f.write_str(&text.join("\n"))
    }
}

/// Render an entry for `version` with one list item per change, in order.
pub fn render_entry(
    version: &Version,
    timestamp: &NaiveDateTime,
    items: &[ChangeItem],
    options: &RenderOptions,
) -> RenderedEntry {
    RenderedEntry {
        header: format_release_header(version, timestamp, options.timestamp_format),
        items: items
            .iter()
            .map(|item| format!("- {}", render_item(item, options)))
            .collect(),
    }
}

fn render_item(item: &ChangeItem, options: &RenderOptions) -> String {
    match item {
        ChangeItem::Commit(commit) => {
            let mut line = truncate(item.summary(), options.max_commit_length);
            if options.commit_ids && !commit.short_id.is_empty() {
                line.push_str(&format!(" ({})", commit.short_id));
            }
            line
        }
        ChangeItem::PullRequest(pr) => {
            if options.pr_numbers {
                format!("{} (#{})", pr.title, pr.number)
            } else {
                pr.title.clone()
            }
        }
    }
}

fn truncate(text: &str, max_chars: Option<usize>) -> String {
    match max_chars {
        Some(max) if max > 0 && text.chars().count() > max => {
            let kept: String = text.chars().take(max).collect();
            format!("{}{}", kept.trim_end(), TRUNCATION_MARKER)
        }
        _ => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::{CommitChange, PullRequestChange};
    use chrono::NaiveDate;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap()
    }

    fn commit(message: &str) -> ChangeItem {
        ChangeItem::Commit(CommitChange {
            message: message.to_string(),
            short_id: "1a2b3c4".to_string(),
        })
    }

    fn pr(number: u64, title: &str) -> ChangeItem {
        ChangeItem::PullRequest(PullRequestChange {
            number,
            title: title.to_string(),
            body: None,
            merged_at: None,
        })
    }

    #[test]
    fn test_render_header_and_items_in_order() {
        let items = vec![
            commit("fix: b first\n\nbody text"),
            pr(12, "feat: a second"),
            commit("fix: c third"),
        ];
        let entry = render_entry(
            &Version::new(1, 0, 1),
            &timestamp(),
            &items,
            &RenderOptions::default(),
        );

        assert_eq!(
            entry.to_string(),
            "## v1.0.1 - (2024-06-01T12:30:00)\n- fix: b first\n- feat: a second\n- fix: c third"
        );
        assert_eq!(entry.line_count(), 4);
    }

    #[test]
    fn test_render_suffixes() {
        let options = RenderOptions {
            commit_ids: true,
            pr_numbers: true,
            ..RenderOptions::default()
        };
        let entry = render_entry(
            &Version::new(0, 2, 0),
            &timestamp(),
            &[commit("feat: cache"), pr(42, "fix: leak")],
            &options,
        );

        assert_eq!(entry.items, vec!["- feat: cache (1a2b3c4)", "- fix: leak (#42)"]);
    }

    #[test]
    fn test_long_commit_is_truncated() {
        let options = RenderOptions {
            max_commit_length: Some(10),
            ..RenderOptions::default()
        };
        let entry = render_entry(
            &Version::new(0, 2, 0),
            &timestamp(),
            &[commit("fix: a very long commit subject line")],
            &options,
        );

        assert_eq!(entry.items, vec!["- fix: a ver..."]);
    }

    #[test]
    fn test_pull_request_titles_are_not_truncated() {
        let title = "feat: ".to_string() + &"x".repeat(200);
        let entry = render_entry(
            &Version::new(0, 2, 0),
            &timestamp(),
            &[pr(1, &title)],
            &RenderOptions::default(),
        );

        assert_eq!(entry.items[0], format!("- {}", title));
    }

    #[test]
    fn test_truncation_counts_characters() {
        assert_eq!(truncate("héllo wörld", Some(5)), "héllo...");
        assert_eq!(truncate("short", Some(5)), "short");
        assert_eq!(truncate("unbounded", None), "unbounded");
        assert_eq!(truncate("zero disables", Some(0)), "zero disables");
    }

    #[test]
    fn test_empty_items_render_header_only() {
        let entry = render_entry(
            &Version::new(3, 0, 0),
            &timestamp(),
            &[],
            &RenderOptions {
                timestamp_format: TimestampFormat::Date,
                ..RenderOptions::default()
            },
        );
        assert_eq!(entry.to_string(), "## v3.0.0 - (2024-06-01)");
    }
}
