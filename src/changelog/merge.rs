//! Splice a rendered entry into an existing changelog.

use std::fmt;
use std::str::FromStr;

use super::format::is_header_line;
use super::render::RenderedEntry;
use crate::error::ChangelogError;

/// Where a new entry goes in the changelog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EntryPosition {
    /// Before all existing content.
    Top,
    /// After all existing content.
    Bottom,
    /// Right before the first `##` header; `Top` if there is none.
    #[default]
    AbovePrevious,
    /// Right after the first `##` header; `Bottom` if there is none.
    BelowPrevious,
}

impl EntryPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::AbovePrevious => "above-previous",
            Self::BelowPrevious => "below-previous",
        }
    }
}

impl fmt::Display for EntryPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryPosition {
    type Err = ChangelogError;

    /// Accepts both `above-previous` and `above_previous` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "above-previous" => Ok(Self::AbovePrevious),
            "below-previous" => Ok(Self::BelowPrevious),
            _ => Err(ChangelogError::UnknownEntryPosition(s.to_string())),
        }
    }
}

/// Insert `entry` into `document` at `position`.
///
/// Exactly one blank separator line is added between the entry and the
/// existing content next to it, so the result always has
/// `document lines + entry lines + 1` lines. Every existing line is kept
/// byte for byte, terminator included, as is the presence or absence of a
/// trailing newline. New lines use `\r\n` if the document does.
pub fn merge_entry(document: &str, entry: &RenderedEntry, position: EntryPosition) -> String {
    let newline = if document.contains("\r\n") { "\r\n" } else { "\n" };
    let segments: Vec<&str> = document.split_inclusive('\n').collect();
    let first_header = segments
        .iter()
        .position(|segment| is_header_line(line_text(segment)));

    let (index, separator_after) = match (position, first_header) {
        (EntryPosition::Top, _) | (EntryPosition::AbovePrevious, None) => (0, true),
        (EntryPosition::Bottom, _) | (EntryPosition::BelowPrevious, None) => {
            (segments.len(), false)
        }
        (EntryPosition::AbovePrevious, Some(header)) => (header, true),
        (EntryPosition::BelowPrevious, Some(header)) => (header + 1, false),
    };

    let mut block: Vec<&str> = Vec::with_capacity(entry.line_count() + 1);
    if !separator_after {
        block.push("");
    }
    block.extend(entry.lines());
    if separator_after {
        block.push("");
    }

    let mut output = String::with_capacity(document.len() + entry.to_string().len() + 8);
    output.extend(segments[..index].iter().copied());

    let unterminated = !document.is_empty() && !document.ends_with('\n');
    if index == segments.len() && unterminated {
        // Appending after a last line with no terminator
        output.push_str(newline);
        output.push_str(&block.join(newline));
    } else {
        for line in block {
            output.push_str(line);
            output.push_str(newline);
        }
    }

    output.extend(segments[index..].iter().copied());
    output
}

/// A raw segment without its `\n` or `\r\n` terminator.
fn line_text(segment: &str) -> &str {
    match segment.strip_suffix('\n') {
        Some(line) => line.strip_suffix('\r').unwrap_or(line),
        None => segment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> RenderedEntry {
        RenderedEntry {
            header: "## v1.1.0 - (2024-06-01)".to_string(),
            items: vec!["- feat: new".to_string()],
        }
    }

    const DOC: &str = "# Changelog\n\n## v1.0.0 - (2024-01-01)\n- prev\n";

    #[test]
    fn test_position_from_str() {
        assert_eq!("top".parse::<EntryPosition>().unwrap(), EntryPosition::Top);
        assert_eq!(
            "above_previous".parse::<EntryPosition>().unwrap(),
            EntryPosition::AbovePrevious
        );
        assert_eq!(
            "Below-Previous".parse::<EntryPosition>().unwrap(),
            EntryPosition::BelowPrevious
        );
    }

    #[test]
    fn test_unknown_position_is_config_error() {
        let err = "middle".parse::<EntryPosition>().unwrap_err();
        assert!(matches!(err, ChangelogError::UnknownEntryPosition(ref s) if s == "middle"));
    }

    #[test]
    fn test_top() {
        let merged = merge_entry(DOC, &entry(), EntryPosition::Top);
        assert_eq!(
            merged,
            "## v1.1.0 - (2024-06-01)\n- feat: new\n\n# Changelog\n\n## v1.0.0 - (2024-01-01)\n- prev\n"
        );
    }

    #[test]
    fn test_bottom() {
        let merged = merge_entry(DOC, &entry(), EntryPosition::Bottom);
        assert_eq!(
            merged,
            "# Changelog\n\n## v1.0.0 - (2024-01-01)\n- prev\n\n## v1.1.0 - (2024-06-01)\n- feat: new\n"
        );
    }

    #[test]
    fn test_above_previous() {
        let merged = merge_entry(DOC, &entry(), EntryPosition::AbovePrevious);
        assert_eq!(
            merged,
            "# Changelog\n\n## v1.1.0 - (2024-06-01)\n- feat: new\n\n## v1.0.0 - (2024-01-01)\n- prev\n"
        );
    }

    #[test]
    fn test_below_previous() {
        let merged = merge_entry(DOC, &entry(), EntryPosition::BelowPrevious);
        assert_eq!(
            merged,
            "# Changelog\n\n## v1.0.0 - (2024-01-01)\n\n## v1.1.0 - (2024-06-01)\n- feat: new\n- prev\n"
        );
    }

    #[test]
    fn test_without_headers_falls_back() {
        let doc = "# Changelog\n\nNotes.\n";
        assert_eq!(
            merge_entry(doc, &entry(), EntryPosition::AbovePrevious),
            merge_entry(doc, &entry(), EntryPosition::Top)
        );
        assert_eq!(
            merge_entry(doc, &entry(), EntryPosition::BelowPrevious),
            merge_entry(doc, &entry(), EntryPosition::Bottom)
        );
    }

    #[test]
    fn test_line_count_invariant() {
        let docs = [
            DOC,
            "",
            "# Changelog",
            "# Changelog\n\n## [initial release] - (2024-01-01)\n",
            "## v0.1.0 - (2024-01-01)\n- a\n## v0.0.1 - (2023-01-01)\n- b",
            "# Changelog\r\n\r\n## v1.0.0 - (2024-01-01)\r\n- prev\r\n",
            "# Changelog\r\n\r\n## v1.0.0 - (2024-01-01)\r\n- prev",
        ];
        let positions = [
            EntryPosition::Top,
            EntryPosition::Bottom,
            EntryPosition::AbovePrevious,
            EntryPosition::BelowPrevious,
        ];

        for doc in docs {
            for position in positions {
                let merged = merge_entry(doc, &entry(), position);
                assert_eq!(
                    merged.lines().count(),
                    doc.lines().count() + entry().line_count() + 1,
                    "doc {:?} at {}",
                    doc,
                    position
                );
            }
        }
    }

    #[test]
    fn test_trailing_newline_preserved() {
        let merged = merge_entry("# Changelog", &entry(), EntryPosition::Top);
        assert!(!merged.ends_with('\n'));

        let merged = merge_entry("# Changelog\n", &entry(), EntryPosition::Top);
        assert!(merged.ends_with('\n'));
    }

    #[test]
    fn test_crlf_document_kept_verbatim() {
        let doc = "# Changelog\r\n\r\n## v1.0.0 - (2024-01-01)\r\n- prev\r\n";
        let merged = merge_entry(doc, &entry(), EntryPosition::AbovePrevious);
        assert_eq!(
            merged,
            "# Changelog\r\n\r\n## v1.1.0 - (2024-06-01)\r\n- feat: new\r\n\r\n## v1.0.0 - (2024-01-01)\r\n- prev\r\n"
        );

        let merged = merge_entry(doc, &entry(), EntryPosition::Bottom);
        assert!(merged.starts_with(doc));
        assert!(merged.ends_with("\r\n## v1.1.0 - (2024-06-01)\r\n- feat: new\r\n"));
    }

    #[test]
    fn test_mixed_terminators_untouched() {
        let doc = "# Changelog\n\r\n## v1.0.0 - (2024-01-01)\n- prev\r\n";
        for position in [
            EntryPosition::Top,
            EntryPosition::Bottom,
            EntryPosition::AbovePrevious,
            EntryPosition::BelowPrevious,
        ] {
            let merged = merge_entry(doc, &entry(), position);
            let mut rest = merged.as_str();
            for segment in doc.split_inclusive('\n') {
                let at = rest
                    .find(segment)
                    .unwrap_or_else(|| panic!("{:?} missing at {}", segment, position));
                rest = &rest[at + segment.len()..];
            }
        }
    }
}
