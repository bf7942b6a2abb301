use std::fmt;

/// Non-fatal conditions met while computing a release.
/// These should be reported to the user but do not stop the run.
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseWarning {
    /// No commits in the range since the latest tag
    NoNewCommits { latest_tag: String },
    /// Latest tag exists but cannot be parsed as a semantic version
    UnparsableTag { tag: String },
    /// Commits exist but none carries a version label
    NoVersionLabels { commit_count: usize },
    /// Slack is configured but no access token was supplied
    MissingSlackToken,
}

impl fmt::Display for ReleaseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseWarning::NoNewCommits { latest_tag } => {
                write!(f, "No new commits since tag '{}'", latest_tag)
            }
            ReleaseWarning::UnparsableTag { tag } => {
                write!(f, "Cannot parse tag '{}' as a semantic version", tag)
            }
            ReleaseWarning::NoVersionLabels { commit_count } => {
                write!(
                    f,
                    "None of the {} commit(s) carries a version label",
                    commit_count
                )
            }
            ReleaseWarning::MissingSlackToken => {
                write!(f, "No Slack token supplied; posting without one")
            }
        }
    }
}
