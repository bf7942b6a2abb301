use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static CONVENTIONAL_SUBJECT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([a-z]+)(?:\(([^)]+)\))?(!?):\s*(.*)").ok());

static MERGE_PULL_REQUEST: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^Merge pull request #(\d+)").ok());

static SQUASH_PULL_REQUEST: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\(#(\d+)\)\s*$").ok());

/// Footers that mark a conventional commit as breaking regardless of its subject.
const BREAKING_FOOTERS: [&str; 2] = ["BREAKING CHANGE:", "BREAKING-CHANGE:"];

/// A commit as seen by the log parse pipeline.
///
/// `labels` is the only field the pipeline mutates. It stays free of
/// duplicates and is omitted from the serialized form while empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub hash: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
}

impl Commit {
    pub fn new(hash: impl Into<String>, message: impl Into<String>) -> Self {
        Commit {
            hash: hash.into(),
            message: message.into(),
            labels: Vec::new(),
            author_name: None,
            author_email: None,
        }
    }

    /// Builder-style helper that seeds labels, skipping duplicates.
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for label in labels {
            self.add_label(label);
        }
        self
    }

    pub fn with_author(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.author_name = Some(name.into());
        self.author_email = Some(email.into());
        self
    }

    /// First line of the message.
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Adds a label unless it is already present. Returns whether it was added.
    pub fn add_label(&mut self, label: impl Into<String>) -> bool {
        let label = label.into();
        if self.labels.contains(&label) {
            return false;
        }
        self.labels.push(label);
        true
    }

    pub fn has_labels(&self) -> bool {
        !self.labels.is_empty()
    }

    /// Pull request number this commit merged, if the subject names one.
    ///
    /// Recognizes GitHub merge commits (`Merge pull request #12 from ...`)
    /// and squash merges (`subject (#12)`).
    pub fn pull_request(&self) -> Option<u64> {
        let subject = self.subject();
        [&*MERGE_PULL_REQUEST, &*SQUASH_PULL_REQUEST]
            .into_iter()
            .flatten()
            .find_map(|re| re.captures(subject))
            .and_then(|captures| captures.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }
}

/// Element of a pull request's commit listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrCommit {
    pub sha: String,
}

impl PrCommit {
    pub fn new(sha: impl Into<String>) -> Self {
        PrCommit { sha: sha.into() }
    }
}

/// Parsed representation of a conventional commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    pub r#type: String,
    pub scope: Option<String>,
    pub description: String,
    pub is_breaking_change: bool,
}

impl ParsedCommit {
    /// Parse a commit message according to conventional commits spec
    /// Supports formats:
    /// - type(scope)!: description
    /// - type(scope): description
    /// - type!: description
    /// - type: description
    ///
    /// Returns `None` for non-conventional text.
    pub fn parse(message: &str) -> Option<Self> {
        let re = CONVENTIONAL_SUBJECT.as_ref()?;
        let captures = re.captures(message)?;

        let r#type = captures
            .get(1)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let scope = captures.get(2).map(|m| m.as_str().to_string());
        let has_exclamation = captures.get(3).map(|m| m.as_str()) == Some("!");
        let description = captures
            .get(4)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        let is_breaking_change = has_exclamation
            || message.lines().skip(1).any(|line| {
                BREAKING_FOOTERS
                    .iter()
                    .any(|footer| line.starts_with(footer))
            });

        Some(ParsedCommit {
            r#type,
            scope,
            description,
            is_breaking_change,
        })
    }
}
