//! Semver calculation from classified changes.

use semver::Version;

use crate::change::BumpCategory;

/// Result of folding change categories into a version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpOutcome {
    pub version: Version,
    /// Category that drove the bump, or `None` if the version is unchanged.
    pub applied: Option<BumpCategory>,
}

impl BumpOutcome {
    pub fn bumped(&self) -> bool {
        self.applied.is_some()
    }
}

/// Calculate the next version from the categories of all collected changes.
///
/// Only the highest category present is applied, once:
/// - Breaking = major bump, minor and patch reset
/// - Feature = minor bump, patch reset
/// - Fix = patch bump
///
/// A breaking change plus five fixes is still a single major bump.
pub fn bump_version(base: &Version, categories: &[BumpCategory]) -> BumpOutcome {
    let highest = categories
        .iter()
        .copied()
        .max()
        .filter(|category| *category != BumpCategory::None);

    let version = match highest {
        Some(BumpCategory::Breaking) => Version::new(base.major + 1, 0, 0),
        Some(BumpCategory::Feature) => Version::new(base.major, base.minor + 1, 0),
        Some(BumpCategory::Fix) => Version::new(base.major, base.minor, base.patch + 1),
        Some(BumpCategory::None) | None => base.clone(),
    };

    BumpOutcome {
        version,
        applied: highest,
    }
}
