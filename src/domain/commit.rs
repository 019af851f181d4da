use std::collections::HashSet;

use serde::Serialize;

/// A commit introduced since the last release
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    /// Full commit hash
    pub hash: String,
    /// Raw, unparsed commit message
    pub message: String,
    /// Committer name. The committer reflects the integration event, authorship can be rewritten.
    pub author: String,
}

/// Commit object as read from the object store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub hash: String,
    pub message: String,
    pub committer: String,
    /// Parent hashes, first parent first
    pub parents: Vec<String>,
}

impl CommitRecord {
    /// Check if this is a merge commit (has multiple parents)
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// Parents merged in besides the first one
    pub fn merged_parents(&self) -> &[String] {
        self.parents.get(1..).unwrap_or(&[])
    }

    pub fn to_commit(&self) -> Commit {
        Commit {
            hash: self.hash.clone(),
            message: self.message.clone(),
            author: self.committer.clone(),
        }
    }
}

/// Commits keyed by hash, in insertion order
#[derive(Debug, Default, Clone)]
pub(crate) struct CommitSet {
    seen: HashSet<String>,
    commits: Vec<Commit>,
}

impl CommitSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a commit unless its hash is already present. Returns whether it was added.
    pub fn insert(&mut self, commit: Commit) -> bool {
        if !self.seen.insert(commit.hash.clone()) {
            return false;
        }
        self.commits.push(commit);
        true
    }

    pub fn contains(&self, hash: &str) -> bool {
        self.seen.contains(hash)
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn into_vec(self) -> Vec<Commit> {
        self.commits
    }
}
