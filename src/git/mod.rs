//! Commit source abstraction layer
//!
//! The log normalizer never talks to git directly. It depends on the
//! [CommitSource] trait, which has two implementations:
//!
//! - [repository::Git2CommitSource]: reads a real repository with the `git2` crate
//! - [mock::InMemoryCommitSource]: deterministic fake for tests
//!
//! ```rust
//! # use release_hooks::git::CommitSource;
//! # async fn example<S: CommitSource>(source: &S) -> release_hooks::Result<()> {
//! let (log, pr_commits) = tokio::try_join!(source.get_git_log(), source.get_commits_for_pr(123))?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::InMemoryCommitSource;
pub use repository::Git2CommitSource;

use async_trait::async_trait;

use crate::domain::{Commit, PrCommit};
use crate::error::Result;

/// Supplies commits and pull request membership to the log normalizer.
///
/// ## Thread Safety
///
/// Implementors must be `Send + Sync`; the normalizer shares one source
/// across concurrent normalizations.
///
/// ## Error Handling
///
/// Failures are returned as-is to the caller of the normalizer. Sources do
/// not retry and must not turn a failure into an empty result.
#[async_trait]
pub trait CommitSource: Send + Sync {
    /// Full commit log for the range being released, oldest first.
    async fn get_git_log(&self) -> Result<Vec<Commit>>;

    /// Commits that belong to the given pull request.
    async fn get_commits_for_pr(&self, pr_number: u64) -> Result<Vec<PrCommit>>;
}
