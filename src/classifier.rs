//! Conventional commit classification.
//!
//! Maps a commit message to the labels its conventional-commit prefix implies.
//! Classification only reads the message; author and hash never matter.

use std::collections::BTreeMap;

use crate::config::ConventionalCommitsConfig;
use crate::domain::{version_map, Commit, LabelDefinition, ParsedCommit, ReleaseType};
use crate::error::{ReleaseError, Result};
use crate::hooks::CommitParser;
use crate::version::VersionBump;

/// Prefix to label table the classifier evaluates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierRules {
    /// Conventional commit type (`fix`, `feat`, ...) to label name.
    pub prefixes: BTreeMap<String, String>,
    /// Case-sensitive token a subject starts with to mark a breaking change.
    pub breaking_marker: String,
    /// Label attached to breaking changes.
    pub breaking_label: String,
}

impl ClassifierRules {
    /// Resolves the configured type bumps into label names.
    ///
    /// Each bump resolves to the first label of the matching release type in
    /// the definition table. A bump with no label defined is a configuration
    /// error.
    pub fn from_config(
        conventional: &ConventionalCommitsConfig,
        definitions: &[LabelDefinition],
    ) -> Result<Self> {
        let versions = version_map(definitions);
        let label_for = |bump: VersionBump| -> Result<String> {
            versions
                .get(&ReleaseType::from(bump))
                .and_then(|names| names.first())
                .cloned()
                .ok_or_else(|| {
                    ReleaseError::config(format!("No label defined for {} releases", bump))
                })
        };

        let mut prefixes = BTreeMap::new();
        for (commit_type, bump) in &conventional.types {
            prefixes.insert(commit_type.clone(), label_for(*bump)?);
        }

        Ok(ClassifierRules {
            prefixes,
            breaking_marker: conventional.breaking_marker.clone(),
            breaking_label: label_for(VersionBump::Major)?,
        })
    }
}

impl Default for ClassifierRules {
    fn default() -> Self {
        let mut prefixes = BTreeMap::new();
        prefixes.insert("feat".to_string(), "minor".to_string());
        prefixes.insert("fix".to_string(), "patch".to_string());
        prefixes.insert("perf".to_string(), "patch".to_string());

        ClassifierRules {
            prefixes,
            breaking_marker: "BREAKING".to_string(),
            breaking_label: "major".to_string(),
        }
    }
}

/// Stateless commit classifier.
#[derive(Debug, Clone, Default)]
pub struct CommitClassifier {
    rules: ClassifierRules,
}

impl CommitClassifier {
    pub fn new(rules: ClassifierRules) -> Self {
        CommitClassifier { rules }
    }

    pub fn rules(&self) -> &ClassifierRules {
        &self.rules
    }

    /// Labels implied by a commit message.
    ///
    /// Rules, first match wins:
    /// 1. subject starts with the breaking marker, or the conventional subject
    ///    is breaking (`type!:` or a `BREAKING CHANGE:` footer): breaking label
    /// 2. subject has a configured conventional type: that type's label
    /// 3. otherwise: nothing
    pub fn classify(&self, message: &str) -> Vec<String> {
        let subject = message.lines().next().unwrap_or("");
        let marker = self.rules.breaking_marker.as_str();

        if !marker.is_empty() && subject.starts_with(marker) {
            return vec![self.rules.breaking_label.clone()];
        }

        let Some(parsed) = ParsedCommit::parse(message) else {
            return Vec::new();
        };

        if parsed.is_breaking_change {
            return vec![self.rules.breaking_label.clone()];
        }

        self.rules
            .prefixes
            .get(&parsed.r#type)
            .map(|label| vec![label.clone()])
            .unwrap_or_default()
    }

    /// Merges the message's labels into the commit.
    ///
    /// Existing labels are kept and nothing is duplicated, so applying twice
    /// is the same as applying once. Unrecognized messages return the commit
    /// untouched.
    pub fn apply(&self, mut commit: Commit) -> Commit {
        for label in self.classify(&commit.message) {
            if commit.add_label(label.as_str()) {
                tracing::debug!(hash = %commit.hash, %label, "labeled commit");
            }
        }
        commit
    }
}

impl CommitParser for CommitClassifier {
    fn parse_commit(&self, commit: Commit) -> Commit {
        self.apply(commit)
    }
}
