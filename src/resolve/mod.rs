//! Release state resolution
//!
//! Three independent components share one read-only repository handle:
//!
//! - [`branch::resolve_branch`] - branch name of the current checkout
//! - [`version_tags::find_last_version`] - highest version tag and its commit
//! - [`commit_range::collect_commits`] - commits since that commit
//!
//! [`ReleaseResolver`] runs them in sequence and produces a [`ReleaseState`].

pub mod branch;
pub mod commit_range;
pub mod version_tags;

pub use branch::resolve_branch;
pub use commit_range::{collect_commits, collect_commits_from};
pub use version_tags::{find_last_version, version_candidates};

use std::path::Path;

use serde::Serialize;

use crate::config::Config;
use crate::diagnostics::DiagnosticSink;
use crate::domain::{Commit, VersionTag};
use crate::error::{ReleaseStateError, Result};
use crate::git::{Git2Repository, Repository};

/// Everything downstream release logic needs to know about a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseState {
    pub branch: String,
    /// Hash of the HEAD commit
    pub head: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_version: Option<VersionTag>,
    pub commits: Vec<Commit>,
}

impl ReleaseState {
    /// No release exists yet
    pub fn is_first_release(&self) -> bool {
        self.last_version.is_none()
    }
}

/// Full hash of the commit HEAD points to
pub fn head_hash<R: Repository + ?Sized>(repo: &R) -> Result<String> {
    let head = repo.head()?;
    head.commit.ok_or_else(|| {
        ReleaseStateError::repository_read(format!("{} does not point at a commit", head.reference))
    })
}

/// Owns a repository handle and the configuration for one or more resolutions
pub struct ReleaseResolver<R: Repository = Git2Repository> {
    repo: R,
    config: Config,
}

impl ReleaseResolver<Git2Repository> {
    /// Open the repository containing `path`
    pub fn open<P: AsRef<Path>>(path: P, config: Config) -> Result<Self> {
        Ok(Self::new(Git2Repository::open(path)?, config))
    }
}

impl<R: Repository> ReleaseResolver<R> {
    pub fn new(repo: R, config: Config) -> Self {
        ReleaseResolver { repo, config }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn branch(&self, sink: &mut dyn DiagnosticSink) -> Result<String> {
        resolve_branch(&self.repo, &self.config.branch, sink)
    }

    pub fn last_version(&self, sink: &mut dyn DiagnosticSink) -> Result<Option<VersionTag>> {
        find_last_version(&self.repo, &self.config.tags, sink)
    }

    pub fn commits_since(
        &self,
        boundary: Option<&str>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Vec<Commit>> {
        collect_commits(&self.repo, boundary, sink)
    }

    pub fn head_hash(&self) -> Result<String> {
        head_hash(&self.repo)
    }

    /// Resolve branch, last version and the commits since that version.
    ///
    /// The first failing step aborts the resolution.
    pub fn resolve(&self, sink: &mut dyn DiagnosticSink) -> Result<ReleaseState> {
        let branch = self.branch(sink)?;
        let last_version = self.last_version(sink)?;
        let boundary = last_version.as_ref().map(|v| v.commit.as_str());
        self.resolve_with_boundary(branch, last_version.clone(), boundary, sink)
    }

    /// Like [`resolve`](Self::resolve) but with an explicit boundary instead of tag lookup
    pub fn resolve_since(
        &self,
        boundary: Option<&str>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<ReleaseState> {
        let branch = self.branch(sink)?;
        self.resolve_with_boundary(branch, None, boundary, sink)
    }

    fn resolve_with_boundary(
        &self,
        branch: String,
        last_version: Option<VersionTag>,
        boundary: Option<&str>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<ReleaseState> {
        let commits = self.commits_since(boundary, sink)?;
        let head = self.head_hash()?;

        Ok(ReleaseState {
            branch,
            head,
            last_version,
            commits,
        })
    }
}

/// Open the repository at `path` and resolve its release state
pub fn resolve_release_state<P: AsRef<Path>>(
    path: P,
    config: Config,
    sink: &mut dyn DiagnosticSink,
) -> Result<ReleaseState> {
    ReleaseResolver::open(path, config)?.resolve(sink)
}
