//! `vMAJOR.MINOR.PATCH` version strings.

use semver::Version;

use crate::error::VersionError;

fn is_numeric_part(part: Option<&str>) -> bool {
    part.is_some_and(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}

/// Parse a release version such as `v1.2.3`.
///
/// The leading `v` is optional. Exactly three dot-separated integers are
/// accepted; pre-release and build suffixes are rejected.
pub fn parse_version_tag(text: &str) -> Result<Version, VersionError> {
    let raw = text.trim();
    let raw = raw.strip_prefix('v').unwrap_or(raw);

    let mut parts = raw.split('.');
    let (major, minor, patch) = (parts.next(), parts.next(), parts.next());

    if parts.next().is_some()
        || !is_numeric_part(major)
        || !is_numeric_part(minor)
        || !is_numeric_part(patch)
    {
        return Err(VersionError::InvalidFormat(text.to_string()));
    }

    Version::parse(raw).map_err(|_| VersionError::InvalidFormat(text.to_string()))
}

/// Format a version in the `vMAJOR.MINOR.PATCH` form used by headers and tags.
pub fn format_version_tag(version: &Version) -> String {
    format!("v{}.{}.{}", version.major, version.minor, version.patch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_v_prefix() {
        assert_eq!(parse_version_tag("v1.2.3").unwrap(), Version::new(1, 2, 3));
    }

    #[test]
    fn test_parse_without_v_prefix() {
        assert_eq!(parse_version_tag("10.0.7").unwrap(), Version::new(10, 0, 7));
    }

    #[test]
    fn test_parse_rejects_prerelease() {
        assert!(parse_version_tag("v1.0.0-beta.1").is_err());
    }

    #[test]
    fn test_parse_rejects_missing_component() {
        let err = parse_version_tag("v1.2").unwrap_err();
        assert!(matches!(err, VersionError::InvalidFormat(ref s) if s == "v1.2"));
    }

    #[test]
    fn test_parse_rejects_extra_component() {
        assert!(parse_version_tag("v1.2.3.4").is_err());
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert!(parse_version_tag("v1foo.0.0").is_err());
        assert!(parse_version_tag("initial release").is_err());
    }

    #[test]
    fn test_format_round_trips() {
        let version = parse_version_tag("v3.14.15").unwrap();
        assert_eq!(format_version_tag(&version), "v3.14.15");
    }

    #[test]
    fn test_ordering_is_lexicographic_on_components() {
        let a = parse_version_tag("v1.10.0").unwrap();
        let b = parse_version_tag("v1.9.9").unwrap();
        let c = parse_version_tag("v2.0.0").unwrap();
        assert!(a > b);
        assert!(c > a);
    }
}
