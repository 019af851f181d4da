//! Read-only git access
//!
//! This module provides a trait-based abstraction over the handful of
//! repository queries release state resolution needs, so the resolution
//! logic can run against a real repository or an in-memory graph.
//!
//! # Overview
//!
//! - [repository::Git2Repository]: the real implementation using the `git2` crate
//! - [mock::MockRepository]: an in-memory commit graph for testing
//!
//! # Usage
//!
//! ```rust,no_run
//! # use git_release_state::git::{Git2Repository, Repository};
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repo = Git2Repository::open(".")?;
//! let head = repo.head()?;
//! println!("HEAD is {}", head.reference);
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::CommitRecord;
use crate::error::Result;

/// State of HEAD
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Head {
    /// Raw reference name: "refs/heads/main" when on a branch, "HEAD" when detached
    pub reference: String,
    /// Short branch name when HEAD is a symbolic reference to a local branch
    pub branch: Option<String>,
    /// Commit HEAD resolves to, `None` on an unborn branch
    pub commit: Option<String>,
}

impl Head {
    pub fn is_detached(&self) -> bool {
        self.branch.is_none()
    }
}

/// Lazily evaluated commit walk
pub type CommitWalk<'a> = Box<dyn Iterator<Item = Result<CommitRecord>> + 'a>;

/// Read-only repository queries
///
/// ## Error Handling
///
/// Ref and tag queries fail with [crate::error::ReleaseStateError::RepositoryRead];
/// commit and history queries fail with
/// [crate::error::ReleaseStateError::CommitHistoryRead].
///
/// ## Implementations
///
/// - [Git2Repository](repository::Git2Repository): Real Git implementation using the `git2` crate
/// - [MockRepository](mock::MockRepository): Test implementation with a hand-built graph
pub trait Repository {
    /// Read HEAD without requiring it to resolve to a commit
    fn head(&self) -> Result<Head>;

    /// Short names of all local branches, in backend enumeration order
    fn local_branches(&self) -> Result<Vec<String>>;

    /// Short names of all tags
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Hash of the commit a tag points to
    ///
    /// Annotated tags are dereferenced to their target commit; lightweight
    /// tags already point at one.
    fn resolve_tag(&self, tag_name: &str) -> Result<String>;

    /// Walk the first-parent chain starting at `from`, newest committer time first
    ///
    /// The walk ends at a root commit or where the object store has no
    /// further history (shallow clones).
    fn first_parent_history(&self, from: &str) -> Result<CommitWalk<'_>>;

    /// Read a single commit
    fn find_commit(&self, hash: &str) -> Result<CommitRecord>;

    /// Full hash of the commit a revision names, e.g. an abbreviated hash
    fn resolve_commit(&self, rev: &str) -> Result<String>;

    /// Whether `ancestor` is reachable from `descendant` through parent links.
    /// A commit is not its own ancestor.
    fn is_ancestor(&self, ancestor: &str, descendant: &str) -> Result<bool>;
}
