use async_trait::async_trait;
use git2::{Oid, Repository, Sort};
use std::path::{Path, PathBuf};

use crate::domain::{Commit, PrCommit};
use crate::error::{ReleaseError, Result};
use crate::git::CommitSource;

/// Commit source backed by a local git repository.
///
/// The released range is `from..to`: everything reachable from `to` that is
/// not reachable from `from`. Pull request membership is read from merge
/// commits: the commits of PR `#N` are those reachable from the second parent
/// of the merge commit naming `#N`, but not from its first parent.
#[derive(Debug, Clone)]
pub struct Git2CommitSource {
    path: PathBuf,
    from: Option<String>,
    to: String,
}

impl Git2CommitSource {
    /// Create a source for the repository containing `path`, walking up to `HEAD`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path)?;
        let path = repo
            .workdir()
            .unwrap_or_else(|| repo.path())
            .to_path_buf();

        Ok(Git2CommitSource {
            path,
            from: None,
            to: "HEAD".to_string(),
        })
    }

    /// Exclude everything reachable from `from` (usually the latest release tag)
    pub fn since(mut self, from: Option<String>) -> Self {
        self.from = from;
        self
    }

    /// Walk from `to` instead of `HEAD`
    pub fn until(mut self, to: impl Into<String>) -> Self {
        self.to = to.into();
        self
    }

    /// Latest tag reachable from the walk start, if any.
    pub fn latest_tag(&self) -> Result<Option<String>> {
        let repo = Repository::open(&self.path)?;
        let start = resolve_commit(&repo, &self.to)?;

        let mut tag_oids = std::collections::HashMap::new();
        let tags = repo.tag_names(None)?;
        for tag_name in tags.iter().flatten() {
            if let Ok(tag_ref) = repo.find_reference(&format!("refs/tags/{}", tag_name)) {
                if let Ok(commit) = tag_ref.peel_to_commit() {
                    tag_oids.insert(commit.id(), tag_name.to_string());
                }
            }
        }

        let mut revwalk = repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(start)?;

        for oid in revwalk {
            if let Some(tag_name) = tag_oids.get(&oid?) {
                return Ok(Some(tag_name.clone()));
            }
        }

        Ok(None)
    }

    fn read_log(&self) -> Result<Vec<Commit>> {
        let repo = Repository::open(&self.path)?;
        let mut commits = Vec::new();

        for oid in self.range_walk(&repo)? {
            let commit = repo.find_commit(oid?)?;
            commits.push(to_commit(&commit));
        }

        commits.reverse();
        Ok(commits)
    }

    fn read_pr_commits(&self, pr_number: u64) -> Result<Vec<PrCommit>> {
        let repo = Repository::open(&self.path)?;

        // A follow-up squash commit may reuse `(#N)`; the merge commit wins.
        let mut candidate = None;
        for oid in self.range_walk(&repo)? {
            let commit = repo.find_commit(oid?)?;
            if to_commit(&commit).pull_request() != Some(pr_number) {
                continue;
            }
            if commit.parent_count() >= 2 {
                candidate = Some(commit);
                break;
            }
            candidate.get_or_insert(commit);
        }

        let Some(commit) = candidate else {
            return Err(ReleaseError::lookup(format!(
                "Pull request #{} not found in the commit log",
                pr_number
            )));
        };

        if commit.parent_count() < 2 {
            // Squash or rebase merge: the commit is the whole pull request.
            return Ok(vec![PrCommit::new(commit.id().to_string())]);
        }

        let mut revwalk = repo.revwalk()?;
        revwalk.push(commit.parent_id(1)?)?;
        revwalk.hide(commit.parent_id(0)?)?;

        revwalk
            .map(|oid| -> Result<PrCommit> { Ok(PrCommit::new(oid?.to_string())) })
            .collect()
    }

    fn range_walk<'repo>(&self, repo: &'repo Repository) -> Result<git2::Revwalk<'repo>> {
        let mut revwalk = repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(resolve_commit(repo, &self.to)?)?;

        if let Some(from) = &self.from {
            revwalk.hide(resolve_commit(repo, from)?)?;
        }

        Ok(revwalk)
    }
}

fn resolve_commit(repo: &Repository, spec: &str) -> Result<Oid> {
    let object = repo.revparse_single(spec)?;
    Ok(object.peel_to_commit()?.id())
}

fn to_commit(commit: &git2::Commit<'_>) -> Commit {
    let author = commit.author();
    Commit {
        hash: commit.id().to_string(),
        message: commit.message().unwrap_or("(empty message)").to_string(),
        labels: Vec::new(),
        author_name: author.name().map(str::to_string),
        author_email: author.email().map(str::to_string),
    }
}

#[async_trait]
impl CommitSource for Git2CommitSource {
    async fn get_git_log(&self) -> Result<Vec<Commit>> {
        let source = self.clone();
        tokio::task::spawn_blocking(move || source.read_log())
            .await
            .map_err(|e| ReleaseError::lookup(format!("Git log task failed: {}", e)))?
    }

    async fn get_commits_for_pr(&self, pr_number: u64) -> Result<Vec<PrCommit>> {
        let source = self.clone();
        tokio::task::spawn_blocking(move || source.read_pr_commits(pr_number))
            .await
            .map_err(|e| ReleaseError::lookup(format!("Pull request lookup task failed: {}", e)))?
    }
}
