//! Structured diagnostics emitted while resolving release state.
//!
//! Resolution code never talks to a global logger. Every notable step is
//! reported as a [`Diagnostic`] to a caller-supplied [`DiagnosticSink`].
//! [`LogSink`] forwards events to the `log` facade, [`RecordingSink`] keeps
//! them in memory and [`NullSink`] drops them.

use std::fmt;

use log::Level;

/// How a commit entered the collected set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Reached by the first-parent walk from HEAD
    Mainline,
    /// Reached through a non-first parent of a merge commit
    MergeParent,
}

/// A single event observed during resolution. None of these are errors.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// HEAD is a symbolic reference to a branch
    BranchFromHead { branch: String },
    /// HEAD is detached and a local branch was picked instead
    BranchFromFallback { branch: String, reference: String },
    /// Tag seen during enumeration
    TagSeen { tag: String },
    /// Tag is not a release candidate
    TagSkipped { tag: String, reason: String },
    /// No tag parsed as a semantic version
    NoVersionTags,
    /// Highest version tag and the commit it points to
    LastVersion {
        tag: String,
        version: String,
        commit: String,
    },
    /// Primary walk reached the boundary commit
    BoundaryReached { hash: String },
    /// Commit added to the result
    CommitRecorded { hash: String, route: Route },
    /// Commit reached again through another path and discarded
    DuplicateCommit { hash: String },
    /// Merge-parent path ended at an unreadable object
    ParentUnreadable { hash: String, reason: String },
    /// Collection finished
    CommitsCollected { count: usize },
}

impl Diagnostic {
    /// Severity used when forwarding to a logger
    pub fn level(&self) -> Level {
        match self {
            Diagnostic::TagSeen { .. }
            | Diagnostic::CommitRecorded { .. }
            | Diagnostic::DuplicateCommit { .. } => Level::Trace,
            _ => Level::Debug,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::BranchFromHead { branch } => write!(f, "Found branch {}", branch),
            Diagnostic::BranchFromFallback { branch, reference } => {
                write!(f, "Found branch {} from detached {}", branch, reference)
            }
            Diagnostic::TagSeen { tag } => write!(f, "Tag {}", tag),
            Diagnostic::TagSkipped { tag, reason } => {
                write!(f, "Skipping tag {}: {}", tag, reason)
            }
            Diagnostic::NoVersionTags => write!(f, "Found no version tags"),
            Diagnostic::LastVersion {
                tag,
                version,
                commit,
            } => write!(
                f,
                "Found last version {} (tag '{}') at {}",
                version,
                tag,
                short_hash(commit)
            ),
            Diagnostic::BoundaryReached { hash } => {
                write!(f, "Found commit with hash {}, will stop here", hash)
            }
            Diagnostic::CommitRecorded { hash, route } => {
                let via = match route {
                    Route::Mainline => "mainline",
                    Route::MergeParent => "merge parent",
                };
                write!(f, "Found commit with hash {} via {}", hash, via)
            }
            Diagnostic::DuplicateCommit { hash } => {
                write!(f, "Commit {} already recorded", short_hash(hash))
            }
            Diagnostic::ParentUnreadable { hash, reason } => write!(
                f,
                "Cannot read commit {}, ending this merge path: {}",
                short_hash(hash),
                reason
            ),
            Diagnostic::CommitsCollected { count } => {
                write!(f, "Found {} commits till last release", count)
            }
        }
    }
}

fn short_hash(hash: &str) -> &str {
    hash.get(..7).unwrap_or(hash)
}

/// Receiver for resolution diagnostics
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        log::log!(target: "git_release_state", diagnostic.level(), "{}", diagnostic);
    }
}

/// Keeps every diagnostic in order of emission
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub events: Vec<Diagnostic>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded events matching the predicate
    pub fn count(&self, predicate: impl Fn(&Diagnostic) -> bool) -> usize {
        self.events.iter().filter(|d| predicate(d)).count()
    }
}

impl DiagnosticSink for RecordingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.events.push(diagnostic);
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&mut self, _diagnostic: Diagnostic) {}
}
