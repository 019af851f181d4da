use std::cmp::Ordering;
use std::sync::OnceLock;

use regex::Regex;
use semver::Version;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a tag name is not a version
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TagParseError {
    #[error("no version number in '{0}'")]
    NoVersion(String),

    #[error("invalid version: {0}")]
    Invalid(String),
}

/// A tag whose name parses as a semantic version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionTag {
    pub version: Version,
    /// Short tag name, e.g. "v1.2.0"
    pub tag: String,
    /// Hash of the commit the tag points to
    pub commit: String,
}

/// Which version tags count as release candidates
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TagPolicy {
    /// Whether tags like `v2.0.0-rc.1` can be the last version
    #[serde(default = "default_include_prereleases")]
    pub include_prereleases: bool,
}

fn default_include_prereleases() -> bool {
    true
}

impl Default for TagPolicy {
    fn default() -> Self {
        TagPolicy {
            include_prereleases: default_include_prereleases(),
        }
    }
}

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^v?(?P<major>\d+)(?:\.(?P<minor>\d+))?(?:\.(?P<patch>\d+))?(?P<rest>[-+].*)?$",
        )
        .expect("static version pattern")
    })
}

/// Parse a tag name as a semantic version.
///
/// An optional leading "v" is accepted. Any other prefix ("release-",
/// "build-") disqualifies the tag. Missing minor or patch components default
/// to zero, so `v2` is 2.0.0 and `v1.4`
/// is 1.4.0. Pre-release and build metadata follow SemVer syntax.
pub fn parse_tag_version(tag: &str) -> Result<Version, TagParseError> {
    let captures = version_pattern()
        .captures(tag)
        .ok_or_else(|| TagParseError::NoVersion(tag.to_string()))?;

    let major = &captures["major"];
    let minor = captures.name("minor").map_or("0", |m| m.as_str());
    let patch = captures.name("patch").map_or("0", |m| m.as_str());
    let rest = captures.name("rest").map_or("", |m| m.as_str());

    let normalized = format!("{}.{}.{}{}", major, minor, patch, rest);
    Version::parse(&normalized).map_err(|e| TagParseError::Invalid(e.to_string()))
}

/// Descending precedence; equal precedence falls back to descending tag name.
pub fn compare_descending(a: &(Version, String), b: &(Version, String)) -> Ordering {
    b.0.cmp_precedence(&a.0).then_with(|| b.1.cmp(&a.1))
}
