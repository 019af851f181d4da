use std::cell::Cell;
use std::collections::{HashMap, HashSet};

use crate::domain::CommitRecord;
use crate::error::{ReleaseStateError, Result};
use crate::git::{CommitWalk, Head, Repository};

/// In-memory commit graph for testing without a real repository
///
/// Parents that were never added behave like commits cut off by a shallow
/// clone: history walks end there and direct lookups fail.
pub struct MockRepository {
    commits: HashMap<String, CommitRecord>,
    tags: Vec<(String, String)>,
    branches: Vec<String>,
    head: Option<Head>,
    broken_at: Option<String>,
    refs_unreadable: bool,
    commit_reads: Cell<usize>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            commits: HashMap::new(),
            tags: Vec::new(),
            branches: Vec::new(),
            head: None,
            broken_at: None,
            refs_unreadable: false,
            commit_reads: Cell::new(0),
        }
    }

    /// Add a commit with the given parents
    pub fn add_commit(&mut self, hash: &str, parents: &[&str]) {
        self.commits.insert(
            hash.to_string(),
            CommitRecord {
                hash: hash.to_string(),
                message: format!("commit {}", hash),
                committer: "Mock Committer".to_string(),
                parents: parents.iter().map(|p| p.to_string()).collect(),
            },
        );
    }

    /// Add a tag pointing at a commit
    pub fn add_tag(&mut self, name: impl Into<String>, hash: impl Into<String>) {
        self.tags.push((name.into(), hash.into()));
    }

    /// Add a local branch name
    pub fn add_branch(&mut self, name: impl Into<String>) {
        self.branches.push(name.into());
    }

    /// Point HEAD at a branch whose tip is `hash`
    pub fn checkout_branch(&mut self, name: &str, hash: &str) {
        if !self.branches.iter().any(|b| b == name) {
            self.branches.push(name.to_string());
        }
        self.head = Some(Head {
            reference: format!("refs/heads/{}", name),
            branch: Some(name.to_string()),
            commit: Some(hash.to_string()),
        });
    }

    /// Detach HEAD at a commit
    pub fn detach_at(&mut self, hash: &str) {
        self.head = Some(Head {
            reference: "HEAD".to_string(),
            branch: None,
            commit: Some(hash.to_string()),
        });
    }

    /// Make history walks fail when they reach `hash`
    pub fn break_history_at(&mut self, hash: &str) {
        self.broken_at = Some(hash.to_string());
    }

    /// Make branch and tag enumeration fail
    pub fn break_refs(&mut self) {
        self.refs_unreadable = true;
    }

    /// Number of `find_commit` lookups served so far
    pub fn commit_reads(&self) -> usize {
        self.commit_reads.get()
    }

    fn refs_guard(&self) -> Result<()> {
        if self.refs_unreadable {
            return Err(ReleaseStateError::repository_read("refs unreadable"));
        }
        Ok(())
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn head(&self) -> Result<Head> {
        self.head
            .clone()
            .ok_or_else(|| ReleaseStateError::repository_read("HEAD not set"))
    }

    fn local_branches(&self) -> Result<Vec<String>> {
        self.refs_guard()?;
        Ok(self.branches.clone())
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        self.refs_guard()?;
        Ok(self.tags.iter().map(|(name, _)| name.clone()).collect())
    }

    fn resolve_tag(&self, tag_name: &str) -> Result<String> {
        self.refs_guard()?;
        self.tags
            .iter()
            .find(|(name, _)| name == tag_name)
            .map(|(_, hash)| hash.clone())
            .ok_or_else(|| ReleaseStateError::repository_read(format!("Tag not found: {}", tag_name)))
    }

    fn first_parent_history(&self, from: &str) -> Result<CommitWalk<'_>> {
        let mut next = Some(from.to_string());
        let mut failed = false;
        Ok(Box::new(std::iter::from_fn(move || {
            if failed {
                return None;
            }
            let hash = next.take()?;
            if self.broken_at.as_deref() == Some(hash.as_str()) {
                failed = true;
                return Some(Err(ReleaseStateError::history(format!(
                    "object {} is corrupt",
                    hash
                ))));
            }
            let record = self.commits.get(&hash)?.clone();
            next = record.parents.first().cloned();
            Some(Ok(record))
        })))
    }

    fn find_commit(&self, hash: &str) -> Result<CommitRecord> {
        self.commit_reads.set(self.commit_reads.get() + 1);
        self.commits
            .get(hash)
            .cloned()
            .ok_or_else(|| ReleaseStateError::history(format!("object not found - no match for id ({})", hash)))
    }

    fn resolve_commit(&self, rev: &str) -> Result<String> {
        if self.commits.contains_key(rev) {
            return Ok(rev.to_string());
        }

        let mut matches = self
            .commits
            .keys()
            .filter(|hash| !rev.is_empty() && hash.starts_with(rev));
        match (matches.next(), matches.next()) {
            (Some(hash), None) => Ok(hash.clone()),
            (Some(_), Some(_)) => Err(ReleaseStateError::history(format!(
                "ambiguous revision '{}'",
                rev
            ))),
            (None, _) => Err(ReleaseStateError::history(format!(
                "revspec '{}' not found",
                rev
            ))),
        }
    }

    fn is_ancestor(&self, ancestor: &str, descendant: &str) -> Result<bool> {
        let mut seen = HashSet::new();
        let mut frontier: Vec<&str> = self
            .commits
            .get(descendant)
            .map(|record| record.parents.iter().map(String::as_str).collect())
            .unwrap_or_default();

        while let Some(hash) = frontier.pop() {
            if hash == ancestor {
                return Ok(true);
            }
            if !seen.insert(hash) {
                continue;
            }
            if let Some(record) = self.commits.get(hash) {
                frontier.extend(record.parents.iter().map(String::as_str));
            }
        }

        Ok(false)
    }
}
