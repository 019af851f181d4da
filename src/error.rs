use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for release state resolution
#[derive(Error, Debug)]
pub enum ReleaseStateError {
    #[error("Cannot open repository at '{}': {source}", .path.display())]
    RepositoryOpen {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("No branch found, found {reference}, please checkout a branch (git checkout -b <BRANCH>)")]
    NoBranchFound { reference: String },

    #[error("Repository read failed: {0}")]
    RepositoryRead(String),

    #[error("Could not read commits, check git clone depth in your CI: {0}")]
    CommitHistoryRead(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-release-state
pub type Result<T> = std::result::Result<T, ReleaseStateError>;

impl ReleaseStateError {
    /// Create a missing branch error for the given HEAD reference
    pub fn no_branch(reference: impl Into<String>) -> Self {
        ReleaseStateError::NoBranchFound {
            reference: reference.into(),
        }
    }

    /// Create a ref/tag read error with context
    pub fn repository_read(msg: impl Into<String>) -> Self {
        ReleaseStateError::RepositoryRead(msg.into())
    }

    /// Create a commit history error with context
    pub fn history(msg: impl Into<String>) -> Self {
        ReleaseStateError::CommitHistoryRead(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseStateError::Config(msg.into())
    }
}
