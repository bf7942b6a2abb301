use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::version::VersionBump;

/// Release impact a label carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseType {
    Major,
    Minor,
    Patch,
    Skip,
    Release,
    None,
}

impl ReleaseType {
    /// Version bump this release type implies, if any.
    pub fn bump(&self) -> Option<VersionBump> {
        match self {
            ReleaseType::Major => Some(VersionBump::Major),
            ReleaseType::Minor => Some(VersionBump::Minor),
            ReleaseType::Patch => Some(VersionBump::Patch),
            ReleaseType::Skip | ReleaseType::Release | ReleaseType::None => None,
        }
    }
}

impl From<VersionBump> for ReleaseType {
    fn from(bump: VersionBump) -> Self {
        match bump {
            VersionBump::Major => ReleaseType::Major,
            VersionBump::Minor => ReleaseType::Minor,
            VersionBump::Patch => ReleaseType::Patch,
        }
    }
}

/// One entry of the label definition table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelDefinition {
    pub name: String,
    pub release_type: ReleaseType,
    #[serde(default)]
    pub description: String,
}

impl LabelDefinition {
    pub fn new(
        name: impl Into<String>,
        release_type: ReleaseType,
        description: impl Into<String>,
    ) -> Self {
        LabelDefinition {
            name: name.into(),
            release_type,
            description: description.into(),
        }
    }
}

/// Returns the default label definition table.
pub fn default_label_definitions() -> Vec<LabelDefinition> {
    vec![
        LabelDefinition::new("major", ReleaseType::Major, "Increment the major version when merged"),
        LabelDefinition::new("minor", ReleaseType::Minor, "Increment the minor version when merged"),
        LabelDefinition::new("patch", ReleaseType::Patch, "Increment the patch version when merged"),
        LabelDefinition::new(
            "skip-release",
            ReleaseType::Skip,
            "Preserve the current version when merged",
        ),
        LabelDefinition::new("release", ReleaseType::Release, "Create a release when this pr is merged"),
        LabelDefinition::new("internal", ReleaseType::None, "Changes only affect the internal API"),
        LabelDefinition::new("documentation", ReleaseType::None, "Changes only affect the documentation"),
    ]
}

/// Groups label names by release type, keeping table order within a group.
pub fn version_map(definitions: &[LabelDefinition]) -> BTreeMap<ReleaseType, Vec<String>> {
    let mut map: BTreeMap<ReleaseType, Vec<String>> = BTreeMap::new();
    for definition in definitions {
        map.entry(definition.release_type)
            .or_default()
            .push(definition.name.clone());
    }
    map
}
