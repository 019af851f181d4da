use std::path::Path;

use git2::{BranchType, ObjectType, Oid, Repository as Git2Repo, Sort};

use crate::domain::CommitRecord;
use crate::error::{ReleaseStateError, Result};
use crate::git::{CommitWalk, Head};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open the repository containing `path`, searching parent directories like git does
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::discover(path).map_err(|source| ReleaseStateError::RepositoryOpen {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn read_commit(&self, oid: Oid) -> Result<CommitRecord> {
        let commit = self
            .repo
            .find_commit(oid)
            .map_err(|e| ReleaseStateError::history(format!("Cannot read commit {}: {}", oid, e)))?;

        let committer = commit.committer();
        let record = CommitRecord {
            hash: oid.to_string(),
            message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
            committer: committer.name().unwrap_or("unknown").to_string(),
            parents: commit.parent_ids().map(|id| id.to_string()).collect(),
        };
        Ok(record)
    }

    fn parse_oid(hash: &str) -> Result<Oid> {
        Oid::from_str(hash)
            .map_err(|e| ReleaseStateError::history(format!("Invalid commit hash '{}': {}", hash, e)))
    }
}

impl super::Repository for Git2Repository {
    fn head(&self) -> Result<Head> {
        let head = self
            .repo
            .find_reference("HEAD")
            .map_err(|e| ReleaseStateError::repository_read(format!("Cannot read HEAD: {}", e)))?;

        if let Some(target) = head.symbolic_target() {
            let reference = target.to_string();
            let branch = reference.strip_prefix("refs/heads/").map(str::to_string);
            let commit = head
                .resolve()
                .ok()
                .and_then(|r| r.target())
                .map(|oid| oid.to_string());
            return Ok(Head {
                reference,
                branch,
                commit,
            });
        }

        Ok(Head {
            reference: "HEAD".to_string(),
            branch: None,
            commit: head.target().map(|oid| oid.to_string()),
        })
    }

    fn local_branches(&self) -> Result<Vec<String>> {
        let branches = self.repo.branches(Some(BranchType::Local)).map_err(|e| {
            ReleaseStateError::repository_read(format!("Cannot list branches: {}", e))
        })?;

        let mut names = Vec::new();
        for entry in branches {
            let (branch, _) = entry.map_err(|e| {
                ReleaseStateError::repository_read(format!("Cannot read branch: {}", e))
            })?;
            if let Ok(Some(name)) = branch.name() {
                names.push(name.to_string());
            }
        }

        Ok(names)
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self
            .repo
            .tag_names(None)
            .map_err(|e| ReleaseStateError::repository_read(format!("Cannot list tags: {}", e)))?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn resolve_tag(&self, tag_name: &str) -> Result<String> {
        let reference = self
            .repo
            .find_reference(&format!("refs/tags/{}", tag_name))
            .map_err(|e| {
                ReleaseStateError::repository_read(format!("Cannot find tag '{}': {}", tag_name, e))
            })?;

        let commit = reference.peel(ObjectType::Commit).map_err(|e| {
            ReleaseStateError::repository_read(format!(
                "Tag '{}' does not point at a commit: {}",
                tag_name, e
            ))
        })?;

        Ok(commit.id().to_string())
    }

    fn first_parent_history(&self, from: &str) -> Result<CommitWalk<'_>> {
        let start = Self::parse_oid(from)?;

        let mut revwalk = self.repo.revwalk().map_err(|e| ReleaseStateError::history(e.to_string()))?;
        revwalk
            .set_sorting(Sort::TIME)
            .map_err(|e| ReleaseStateError::history(e.to_string()))?;
        revwalk
            .simplify_first_parent()
            .map_err(|e| ReleaseStateError::history(e.to_string()))?;
        revwalk
            .push(start)
            .map_err(|e| ReleaseStateError::history(format!("Cannot walk from {}: {}", from, e)))?;

        Ok(Box::new(revwalk.map(move |oid_result| {
            let oid = oid_result.map_err(|e| ReleaseStateError::history(e.to_string()))?;
            self.read_commit(oid)
        })))
    }

    fn find_commit(&self, hash: &str) -> Result<CommitRecord> {
        self.read_commit(Self::parse_oid(hash)?)
    }

    fn resolve_commit(&self, rev: &str) -> Result<String> {
        let commit = self
            .repo
            .revparse_single(rev)
            .and_then(|object| object.peel_to_commit())
            .map_err(|e| {
                ReleaseStateError::history(format!("Cannot resolve commit '{}': {}", rev, e))
            })?;

        Ok(commit.id().to_string())
    }

    fn is_ancestor(&self, ancestor: &str, descendant: &str) -> Result<bool> {
        let ancestor = Self::parse_oid(ancestor)?;
        let descendant = Self::parse_oid(descendant)?;
        self.repo
            .graph_descendant_of(descendant, ancestor)
            .map_err(|e| ReleaseStateError::history(e.to_string()))
    }
}
