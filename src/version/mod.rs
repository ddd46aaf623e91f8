//! Version management and semver bumping.

pub mod bump;
pub mod tag;

pub use bump::{BumpOutcome, bump_version};
pub use tag::{format_version_tag, parse_version_tag};
