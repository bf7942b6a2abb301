use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::{Commit, PrCommit};
use crate::error::{ReleaseError, Result};
use crate::git::CommitSource;

/// In-memory commit source for testing without a repository
#[derive(Debug, Default)]
pub struct InMemoryCommitSource {
    log: Vec<Commit>,
    pr_commits: HashMap<u64, Vec<PrCommit>>,
    log_failure: Option<String>,
    pr_failure: Option<String>,
    log_calls: AtomicUsize,
    pr_calls: AtomicUsize,
}

impl InMemoryCommitSource {
    /// Create a new source serving the given log
    pub fn new(log: Vec<Commit>) -> Self {
        InMemoryCommitSource {
            log,
            ..Self::default()
        }
    }

    /// Set the commits that belong to a pull request
    pub fn with_pr_commits<I, S>(mut self, pr_number: u64, shas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pr_commits
            .insert(pr_number, shas.into_iter().map(PrCommit::new).collect());
        self
    }

    /// Make every log retrieval fail with the given message
    pub fn failing_log(mut self, message: impl Into<String>) -> Self {
        self.log_failure = Some(message.into());
        self
    }

    /// Make every pull request lookup fail with the given message
    pub fn failing_pr_lookup(mut self, message: impl Into<String>) -> Self {
        self.pr_failure = Some(message.into());
        self
    }

    pub fn log_calls(&self) -> usize {
        self.log_calls.load(Ordering::SeqCst)
    }

    pub fn pr_calls(&self) -> usize {
        self.pr_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CommitSource for InMemoryCommitSource {
    async fn get_git_log(&self) -> Result<Vec<Commit>> {
        self.log_calls.fetch_add(1, Ordering::SeqCst);
        match &self.log_failure {
            Some(message) => Err(ReleaseError::lookup(message.clone())),
            None => Ok(self.log.clone()),
        }
    }

    async fn get_commits_for_pr(&self, pr_number: u64) -> Result<Vec<PrCommit>> {
        self.pr_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.pr_failure {
            return Err(ReleaseError::lookup(message.clone()));
        }
        Ok(self.pr_commits.get(&pr_number).cloned().unwrap_or_default())
    }
}
