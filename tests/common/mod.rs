#![allow(dead_code)]

use async_trait::async_trait;
use git2::{Oid, Repository, Signature};
use std::sync::Mutex;
use tempfile::TempDir;

use release_hooks::domain::Commit;
use release_hooks::plugins::SlackTransport;
use release_hooks::Result;

/// Build a commit the way the log source would hand it over.
pub fn make_commit_from_msg(message: &str) -> Commit {
    Commit::new("1234", message).with_author("Adam Dierkens", "adam@dierkens.com")
}

/// Transport that records every post instead of sending it.
#[derive(Default)]
pub struct RecordingTransport {
    pub calls: Mutex<Vec<(String, serde_json::Value)>>,
}

impl RecordingTransport {
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn urls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }
}

#[async_trait]
impl SlackTransport for RecordingTransport {
    async fn post(&self, url: &str, payload: &serde_json::Value) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), payload.clone()));
        Ok(())
    }
}

/// Scratch repository with a tagged base, a merged pull request and a squash merge:
///
/// ```text
/// base (v1.2.3) ── merge "Merge pull request #7" ── "fix: typo (#8)"  <- HEAD
///   └─ "feat: add widget" ── "wip" ──┘
/// ```
pub struct ScratchRepo {
    pub dir: TempDir,
    pub base: Oid,
    pub feature: Oid,
    pub wip: Oid,
    pub merge: Oid,
    pub squash: Oid,
}

pub fn scratch_repo() -> ScratchRepo {
    let dir = TempDir::new().expect("Could not create temp dir");
    let repo = Repository::init(dir.path()).expect("Could not init git repo");

    let base = commit(&repo, Some("HEAD"), "chore: initial commit", &[]);
    repo.tag_lightweight("v1.2.3", &repo.find_object(base, None).unwrap(), false)
        .expect("Could not create tag");

    let feature = commit(&repo, None, "feat: add widget", &[base]);
    let wip = commit(&repo, None, "wip", &[feature]);
    let merge = commit(
        &repo,
        Some("HEAD"),
        "Merge pull request #7 from acme/widget\n\nAdd widget",
        &[base, wip],
    );
    let squash = commit(&repo, Some("HEAD"), "fix: typo (#8)", &[merge]);

    ScratchRepo {
        dir,
        base,
        feature,
        wip,
        merge,
        squash,
    }
}

pub fn commit(repo: &Repository, update_ref: Option<&str>, message: &str, parents: &[Oid]) -> Oid {
    let sig = Signature::now("Test User", "test@example.com").expect("Could not create sig");
    let tree_id = repo
        .index()
        .expect("Could not get index")
        .write_tree()
        .expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");
    let parents: Vec<_> = parents
        .iter()
        .map(|oid| repo.find_commit(*oid).expect("Could not find parent"))
        .collect();
    let parent_refs: Vec<_> = parents.iter().collect();

    repo.commit(update_ref, &sig, &sig, message, &tree, &parent_refs)
        .expect("Could not create commit")
}
