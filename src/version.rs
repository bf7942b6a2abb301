use serde::{Deserialize, Serialize};

use crate::domain::{Commit, LabelDefinition};

/// Represents the type of semantic version bump to apply.
///
/// Variants are ordered by severity, so the highest bump across a set of
/// commits is simply their maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionBump {
    Patch,
    Minor,
    Major,
}

impl VersionBump {
    /// Get the bump name as a string
    pub fn name(&self) -> &'static str {
        match self {
            VersionBump::Patch => "patch",
            VersionBump::Minor => "minor",
            VersionBump::Major => "major",
        }
    }
}

impl std::fmt::Display for VersionBump {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses a version from a git tag string.
///
/// Strips a leading `v`/`V` and hands the rest to `semver`.
///
/// # Example
/// ```ignore
/// assert_eq!(parse_version_from_tag("v1.2.3"), Some(Version::new(1, 2, 3)));
/// assert_eq!(parse_version_from_tag("1.2"), None);
/// ```
pub fn parse_version_from_tag(tag: &str) -> Option<semver::Version> {
    let clean_tag = tag.trim_start_matches('v').trim_start_matches('V');
    semver::Version::parse(clean_tag).ok()
}

/// Bumps a version according to the specified bump type.
///
/// Increments the appropriate component and resets lower components to 0.
/// Pre-release and build metadata are dropped.
pub fn bump_version(version: &semver::Version, bump_type: VersionBump) -> semver::Version {
    let mut next = semver::Version::new(version.major, version.minor, version.patch);
    match bump_type {
        VersionBump::Major => {
            next.major += 1;
            next.minor = 0;
            next.patch = 0;
        }
        VersionBump::Minor => {
            next.minor += 1;
            next.patch = 0;
        }
        VersionBump::Patch => {
            next.patch += 1;
        }
    }
    next
}

/// Computes the highest bump implied by the labels on a set of commits.
///
/// Labels that are not defined, or whose release type carries no version
/// impact (skip, release, none), are ignored. Returns `None` when no commit
/// carries a version label.
pub fn calculate_bump(commits: &[Commit], definitions: &[LabelDefinition]) -> Option<VersionBump> {
    commits
        .iter()
        .flat_map(|commit| commit.labels.iter())
        .filter_map(|label| {
            definitions
                .iter()
                .find(|definition| &definition.name == label)
                .and_then(|definition| definition.release_type.bump())
        })
        .max()
}
