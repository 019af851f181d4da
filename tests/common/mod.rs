//! Builders for throwaway repositories with hand-made commit graphs.

#![allow(dead_code)]

use std::cell::Cell;

use git2::{Oid, Repository, Signature, Time};
use tempfile::TempDir;

pub const AUTHOR: &str = "Alice Author";
pub const COMMITTER: &str = "Release Bot";

pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
    clock: Cell<i64>,
}

impl TestRepo {
    /// Empty repository whose HEAD points at the unborn `main` branch
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");
        let repo = Repository::init(dir.path()).expect("Could not init git repo");
        repo.set_head("refs/heads/main").expect("Could not set HEAD");

        TestRepo {
            dir,
            repo,
            clock: Cell::new(1_700_000_000),
        }
    }

    /// Create a commit with the given parents without moving any ref.
    /// Each commit is one minute newer than the previous one.
    pub fn commit(&self, message: &str, parents: &[Oid]) -> Oid {
        let time = self.clock.get() + 60;
        self.clock.set(time);

        let author = Signature::new(AUTHOR, "alice@example.com", &Time::new(time, 0))
            .expect("Could not create author");
        let committer = Signature::new(COMMITTER, "bot@example.com", &Time::new(time, 0))
            .expect("Could not create committer");

        let tree_id = self
            .repo
            .treebuilder(None)
            .and_then(|builder| builder.write())
            .expect("Could not write tree");
        let tree = self.repo.find_tree(tree_id).expect("Could not find tree");

        let parent_commits: Vec<_> = parents
            .iter()
            .map(|oid| self.repo.find_commit(*oid).expect("Could not find parent"))
            .collect();
        let parent_refs: Vec<_> = parent_commits.iter().collect();

        self.repo
            .commit(None, &author, &committer, message, &tree, &parent_refs)
            .expect("Could not create commit")
    }

    /// Linear chain of commits on top of `parent`, returns their ids oldest first
    pub fn chain(&self, prefix: &str, parent: Option<Oid>, count: usize) -> Vec<Oid> {
        let mut ids = Vec::new();
        let mut tip = parent;
        for i in 1..=count {
            let parents: Vec<Oid> = tip.into_iter().collect();
            let oid = self.commit(&format!("{} {}", prefix, i), &parents);
            ids.push(oid);
            tip = Some(oid);
        }
        ids
    }

    /// Create or move a local branch
    pub fn branch(&self, name: &str, target: Oid) {
        self.repo
            .reference(&format!("refs/heads/{}", name), target, true, "test branch")
            .expect("Could not create branch");
    }

    /// Move `main` to `target` and check it out symbolically
    pub fn checkout_main(&self, target: Oid) {
        self.branch("main", target);
        self.repo
            .set_head("refs/heads/main")
            .expect("Could not set HEAD");
    }

    pub fn detach(&self, target: Oid) {
        self.repo
            .set_head_detached(target)
            .expect("Could not detach HEAD");
    }

    pub fn lightweight_tag(&self, name: &str, target: Oid) {
        let object = self.repo.find_object(target, None).expect("Could not find object");
        self.repo
            .tag_lightweight(name, &object, false)
            .expect("Could not create tag");
    }

    pub fn annotated_tag(&self, name: &str, target: Oid) {
        let object = self.repo.find_object(target, None).expect("Could not find object");
        let tagger = Signature::now(COMMITTER, "bot@example.com").expect("Could not create tagger");
        self.repo
            .tag(name, &object, &tagger, &format!("Release {}", name), false)
            .expect("Could not create annotated tag");
    }
}

pub fn hex(oids: &[Oid]) -> Vec<String> {
    let mut list: Vec<String> = oids.iter().map(|o| o.to_string()).collect();
    list.sort();
    list
}

pub fn sorted_hashes(commits: &[git_release_state::Commit]) -> Vec<String> {
    let mut list: Vec<String> = commits.iter().map(|c| c.hash.clone()).collect();
    list.sort();
    list
}
