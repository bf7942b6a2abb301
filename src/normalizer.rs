//! Pull request head commit normalization.
//!
//! A merge commit that carries no labels of its own is redundant when one of
//! the commits it merged already says what kind of release it needs. The
//! normalizer drops such heads so the children's labels drive the release.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::classifier::CommitClassifier;
use crate::domain::Commit;
use crate::error::Result;
use crate::git::CommitSource;
use crate::hooks::CommitNormalizer;

/// Decides whether a candidate head commit is retained.
pub struct LogNormalizer {
    classifier: CommitClassifier,
    source: Arc<dyn CommitSource>,
}

impl LogNormalizer {
    pub fn new(classifier: CommitClassifier, source: Arc<dyn CommitSource>) -> Self {
        LogNormalizer { classifier, source }
    }

    /// Returns the commit to retain, or `None` when it is absorbed by its children.
    ///
    /// 1. Own message classifies: keep with those labels.
    /// 2. Pre-seeded labels: keep unchanged.
    /// 3. Names a pull request whose other commits (as found in the log) carry
    ///    or classify to labels: drop.
    /// 4. Otherwise keep unchanged.
    ///
    /// The log and the pull request listing are fetched concurrently and only
    /// for step 3. Their failures are returned unchanged.
    pub async fn normalize(&self, commit: Commit) -> Result<Option<Commit>> {
        if !self.classifier.classify(&commit.message).is_empty() {
            return Ok(Some(self.classifier.apply(commit)));
        }

        if commit.has_labels() {
            return Ok(Some(commit));
        }

        let Some(pr_number) = commit.pull_request() else {
            return Ok(Some(commit));
        };

        let (log, pr_commits) = tokio::try_join!(
            self.source.get_git_log(),
            self.source.get_commits_for_pr(pr_number)
        )?;

        let pr_hashes: HashSet<&str> = pr_commits.iter().map(|c| c.sha.as_str()).collect();
        let labeled_child = log
            .iter()
            .filter(|child| child.hash != commit.hash && pr_hashes.contains(child.hash.as_str()))
            .find(|child| child.has_labels() || !self.classifier.classify(&child.message).is_empty());

        match labeled_child {
            Some(child) => {
                tracing::debug!(
                    head = %commit.hash,
                    child = %child.hash,
                    pr = pr_number,
                    "dropping label-less head commit"
                );
                Ok(None)
            }
            None => Ok(Some(commit)),
        }
    }
}

#[async_trait]
impl CommitNormalizer for LogNormalizer {
    async fn normalize_commit(&self, commit: Commit) -> Result<Option<Commit>> {
        self.normalize(commit).await
    }
}
