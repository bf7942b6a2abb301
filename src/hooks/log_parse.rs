use async_trait::async_trait;
use futures::future::try_join_all;
use std::sync::Arc;

use crate::domain::Commit;
use crate::error::Result;

/// Synchronous step that rewrites a commit as it is parsed.
pub trait CommitParser: Send + Sync {
    fn parse_commit(&self, commit: Commit) -> Commit;
}

/// Asynchronous step that decides whether a parsed commit is retained.
///
/// `Ok(None)` drops the commit; `Ok(Some(commit))` retains it with the
/// returned fields.
#[async_trait]
pub trait CommitNormalizer: Send + Sync {
    async fn normalize_commit(&self, commit: Commit) -> Result<Option<Commit>>;
}

/// Log parse pipeline built for one session.
///
/// Parsers run in registration order, then normalizers in registration
/// order. The first normalizer returning `None` drops the commit.
#[derive(Clone, Default)]
pub struct LogParse {
    parsers: Vec<Arc<dyn CommitParser>>,
    normalizers: Vec<Arc<dyn CommitNormalizer>>,
}

impl LogParse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_parser(&mut self, parser: Arc<dyn CommitParser>) {
        self.parsers.push(parser);
    }

    pub fn add_normalizer(&mut self, normalizer: Arc<dyn CommitNormalizer>) {
        self.normalizers.push(normalizer);
    }

    pub fn parser_count(&self) -> usize {
        self.parsers.len()
    }

    pub fn normalizer_count(&self) -> usize {
        self.normalizers.len()
    }

    /// Threads a commit through every parser.
    pub fn parse_commit(&self, commit: Commit) -> Commit {
        self.parsers
            .iter()
            .fold(commit, |commit, parser| parser.parse_commit(commit))
    }

    /// Parses a commit and runs it through every normalizer.
    pub async fn normalize_commit(&self, commit: Commit) -> Result<Option<Commit>> {
        let mut current = self.parse_commit(commit);
        for normalizer in &self.normalizers {
            match normalizer.normalize_commit(current).await? {
                Some(next) => current = next,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    /// Normalizes a whole log, keeping input order and dropping elided commits.
    ///
    /// Commits are normalized concurrently; the first failure is returned.
    pub async fn normalize_commits(&self, commits: Vec<Commit>) -> Result<Vec<Commit>> {
        let results = try_join_all(
            commits
                .into_iter()
                .map(|commit| self.normalize_commit(commit)),
        )
        .await?;
        Ok(results.into_iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReleaseError;

    struct AddLabel(&'static str);

    impl CommitParser for AddLabel {
        fn parse_commit(&self, mut commit: Commit) -> Commit {
            commit.add_label(self.0);
            commit
        }
    }

    struct DropMessage(&'static str);

    #[async_trait]
    impl CommitNormalizer for DropMessage {
        async fn normalize_commit(&self, commit: Commit) -> Result<Option<Commit>> {
            Ok((commit.message != self.0).then_some(commit))
        }
    }

    struct Failing;

    #[async_trait]
    impl CommitNormalizer for Failing {
        async fn normalize_commit(&self, _commit: Commit) -> Result<Option<Commit>> {
            Err(ReleaseError::lookup("boom"))
        }
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        let commit = Commit::new("1", "msg");
        assert_eq!(LogParse::new().parse_commit(commit.clone()), commit);
    }

    #[test]
    fn test_parsers_run_in_order() {
        let mut log_parse = LogParse::new();
        log_parse.add_parser(Arc::new(AddLabel("a")));
        log_parse.add_parser(Arc::new(AddLabel("b")));
        let commit = log_parse.parse_commit(Commit::new("1", "msg"));
        assert_eq!(commit.labels, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_normalize_commits_drops_and_keeps_order() {
        let mut log_parse = LogParse::new();
        log_parse.add_parser(Arc::new(AddLabel("seen")));
        log_parse.add_normalizer(Arc::new(DropMessage("drop me")));

        let commits = vec![
            Commit::new("1", "first"),
            Commit::new("2", "drop me"),
            Commit::new("3", "third"),
        ];
        let result = log_parse.normalize_commits(commits).await.unwrap();
        let hashes: Vec<_> = result.iter().map(|c| c.hash.as_str()).collect();
        assert_eq!(hashes, vec!["1", "3"]);
        assert!(result.iter().all(|c| c.labels == vec!["seen"]));
    }

    #[tokio::test]
    async fn test_normalize_commit_propagates_errors() {
        let mut log_parse = LogParse::new();
        log_parse.add_normalizer(Arc::new(Failing));
        let err = log_parse
            .normalize_commit(Commit::new("1", "x"))
            .await
            .unwrap_err();
        assert!(matches!(err, ReleaseError::Lookup(_)));
    }
}
