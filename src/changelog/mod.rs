//! Changelog parsing, rendering, and merging.

pub mod format;
pub mod marker;
pub mod merge;
pub mod render;

pub use format::{CHANGELOG_HEADER, TimestampFormat, initial_document, parse_timestamp};
pub use marker::{MarkerKind, ReleaseMarker, find_release_marker, parse_release_line};
pub use merge::{EntryPosition, merge_entry};
pub use render::{RenderOptions, RenderedEntry, render_entry};
