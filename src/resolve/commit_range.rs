//! Commits introduced since a boundary commit.
//!
//! The primary walk follows the first-parent chain from HEAD, newest first.
//! Every non-first parent of a merge seeds a worklist which is drained
//! iteratively, so commits that only arrive through merged branches are
//! included. Accumulation is keyed by hash: a commit reached along several
//! paths is recorded once.

use std::collections::HashMap;

use crate::diagnostics::{Diagnostic, DiagnosticSink, Route};
use crate::domain::{Commit, CommitRecord, CommitSet};
use crate::error::{ReleaseStateError, Result};
use crate::git::Repository;

/// Collect every commit reachable from HEAD that is not the boundary or one of its ancestors.
///
/// `boundary` is the commit of the last release; `None` (or an empty hash)
/// means there was no release and the whole reachable history is returned,
/// bounded only by what a shallow clone has fetched.
///
/// The result is unique by hash. Its order is newest-first along the
/// mainline with merged commits placed right after their merge commit;
/// callers needing a strict order must sort.
///
/// # Errors
/// [`ReleaseStateError::CommitHistoryRead`] when HEAD does not resolve to a
/// commit, the boundary commit is missing from the object store, or the
/// mainline walk fails. No partial result is returned.
pub fn collect_commits<R: Repository + ?Sized>(
    repo: &R,
    boundary: Option<&str>,
    sink: &mut dyn DiagnosticSink,
) -> Result<Vec<Commit>> {
    let head = repo
        .head()
        .map_err(|e| ReleaseStateError::history(e.to_string()))?;
    let start = head.commit.ok_or_else(|| {
        ReleaseStateError::history(format!("{} does not point at a commit", head.reference))
    })?;

    collect_commits_from(repo, &start, boundary, sink)
}

/// Same as [`collect_commits`] but starting at an explicit commit instead of HEAD.
///
/// `start` and `boundary` may be abbreviated hashes.
pub fn collect_commits_from<R: Repository + ?Sized>(
    repo: &R,
    start: &str,
    boundary: Option<&str>,
    sink: &mut dyn DiagnosticSink,
) -> Result<Vec<Commit>> {
    let start = repo.resolve_commit(start)?;
    let mut released = match boundary.filter(|hash| !hash.is_empty()) {
        Some(hash) => Released::at(repo, hash)?,
        None => Released::nothing(repo),
    };

    let mut collected = CommitSet::new();
    let mut pending: Vec<String> = Vec::new();

    for record in repo.first_parent_history(&start)? {
        let record = record?;

        if released.contains(&record.hash) {
            sink.emit(Diagnostic::BoundaryReached {
                hash: record.hash.clone(),
            });
            break;
        }

        record_commit(&mut collected, &record, Route::Mainline, sink);

        if record.is_merge() {
            pending.extend(record.merged_parents().iter().rev().cloned());
            drain_merged(repo, &mut released, &mut pending, &mut collected, sink);
        }
    }

    sink.emit(Diagnostic::CommitsCollected {
        count: collected.len(),
    });
    Ok(collected.into_vec())
}

/// The boundary commit and its ancestors, checked on demand.
///
/// Only commits the walks actually reach are tested against the boundary,
/// so the cost follows the number of new commits rather than the size of
/// the released history.
struct Released<'r, R: Repository + ?Sized> {
    repo: &'r R,
    boundary: Option<String>,
    known: HashMap<String, bool>,
}

impl<'r, R: Repository + ?Sized> Released<'r, R> {
    fn nothing(repo: &'r R) -> Self {
        Released {
            repo,
            boundary: None,
            known: HashMap::new(),
        }
    }

    fn at(repo: &'r R, boundary: &str) -> Result<Self> {
        let hash = repo.resolve_commit(boundary).map_err(|e| {
            let cause = match e {
                ReleaseStateError::CommitHistoryRead(cause) => cause,
                other => other.to_string(),
            };
            ReleaseStateError::history(format!(
                "last release commit {} is not in the local history ({})",
                boundary, cause
            ))
        })?;

        Ok(Released {
            repo,
            boundary: Some(hash),
            known: HashMap::new(),
        })
    }

    fn contains(&mut self, hash: &str) -> bool {
        let Some(boundary) = self.boundary.as_deref() else {
            return false;
        };
        if hash == boundary {
            return true;
        }
        if let Some(&released) = self.known.get(hash) {
            return released;
        }

        // Ancestry cut off by a shallow clone counts as unreleased.
        let released = self.repo.is_ancestor(hash, boundary).unwrap_or(false);
        self.known.insert(hash.to_string(), released);
        released
    }
}

fn drain_merged<R: Repository + ?Sized>(
    repo: &R,
    released: &mut Released<'_, R>,
    pending: &mut Vec<String>,
    collected: &mut CommitSet,
    sink: &mut dyn DiagnosticSink,
) {
    while let Some(hash) = pending.pop() {
        if collected.contains(&hash) {
            sink.emit(Diagnostic::DuplicateCommit { hash });
            continue;
        }
        if released.contains(&hash) {
            continue;
        }

        let record = match repo.find_commit(&hash) {
            Ok(record) => record,
            Err(e) => {
                sink.emit(Diagnostic::ParentUnreadable {
                    hash,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        record_commit(collected, &record, Route::MergeParent, sink);
        pending.extend(record.parents.iter().rev().cloned());
    }
}

fn record_commit(
    collected: &mut CommitSet,
    record: &CommitRecord,
    route: Route,
    sink: &mut dyn DiagnosticSink,
) {
    if collected.insert(record.to_commit()) {
        sink.emit(Diagnostic::CommitRecorded {
            hash: record.hash.clone(),
            route,
        });
    } else {
        sink.emit(Diagnostic::DuplicateCommit {
            hash: record.hash.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::diagnostics::{NullSink, RecordingSink};
    use crate::git::MockRepository;

    fn hashes(commits: &[Commit]) -> Vec<&str> {
        commits.iter().map(|c| c.hash.as_str()).collect()
    }

    fn sorted_hashes(commits: &[Commit]) -> Vec<&str> {
        let mut list = hashes(commits);
        list.sort();
        list
    }

    fn assert_unique(commits: &[Commit]) {
        let unique: HashSet<_> = commits.iter().map(|c| &c.hash).collect();
        assert_eq!(unique.len(), commits.len(), "duplicate hashes in {:?}", hashes(commits));
    }

    /// A <- B <- C <- D, HEAD on main at D
    fn linear_repo() -> MockRepository {
        let mut repo = MockRepository::new();
        repo.add_commit("A", &[]);
        repo.add_commit("B", &["A"]);
        repo.add_commit("C", &["B"]);
        repo.add_commit("D", &["C"]);
        repo.checkout_branch("main", "D");
        repo
    }

    #[test]
    fn test_linear_history_stops_at_boundary() {
        let repo = linear_repo();
        let mut sink = RecordingSink::new();

        let commits = collect_commits(&repo, Some("B"), &mut sink).unwrap();
        assert_eq!(hashes(&commits), vec!["D", "C"]);
        assert!(sink.events.contains(&Diagnostic::BoundaryReached {
            hash: "B".to_string()
        }));
        assert!(sink.events.contains(&Diagnostic::CommitsCollected { count: 2 }));
    }

    #[test]
    fn test_no_boundary_returns_everything() {
        let repo = linear_repo();

        let commits = collect_commits(&repo, None, &mut NullSink).unwrap();
        assert_eq!(hashes(&commits), vec!["D", "C", "B", "A"]);

        let empty_hash = collect_commits(&repo, Some(""), &mut NullSink).unwrap();
        assert_eq!(hashes(&empty_hash), vec!["D", "C", "B", "A"]);
    }

    #[test]
    fn test_boundary_at_head_is_empty() {
        let repo = linear_repo();
        let commits = collect_commits(&repo, Some("D"), &mut NullSink).unwrap();
        assert!(commits.is_empty());
    }

    #[test]
    fn test_commit_fields_use_committer() {
        let repo = linear_repo();
        let commits = collect_commits(&repo, Some("C"), &mut NullSink).unwrap();
        assert_eq!(
            commits,
            vec![Commit {
                hash: "D".to_string(),
                message: "commit D".to_string(),
                author: "Mock Committer".to_string(),
            }]
        );
    }

    #[test]
    fn test_merge_includes_feature_branch() {
        // R <- T <- P1 <- M ; R <- F1 <- F2 <- M ; released at T
        let mut repo = MockRepository::new();
        repo.add_commit("R", &[]);
        repo.add_commit("T", &["R"]);
        repo.add_commit("F1", &["R"]);
        repo.add_commit("F2", &["F1"]);
        repo.add_commit("P1", &["T"]);
        repo.add_commit("M", &["P1", "F2"]);
        repo.checkout_branch("main", "M");

        let commits = collect_commits(&repo, Some("T"), &mut NullSink).unwrap();
        assert_eq!(sorted_hashes(&commits), vec!["F1", "F2", "M", "P1"]);
        assert_unique(&commits);
        // merged commits follow their merge commit
        assert_eq!(hashes(&commits)[0], "M");
    }

    #[test]
    fn test_commit_reached_through_two_merges_is_recorded_once() {
        // X forks after the release and is merged twice through Y and Z
        let mut repo = MockRepository::new();
        repo.add_commit("B", &[]);
        repo.add_commit("X", &["B"]);
        repo.add_commit("Y", &["X"]);
        repo.add_commit("Z", &["X"]);
        repo.add_commit("M1", &["B", "Y"]);
        repo.add_commit("M2", &["M1", "Z"]);
        repo.checkout_branch("main", "M2");

        let mut sink = RecordingSink::new();
        let commits = collect_commits(&repo, Some("B"), &mut sink).unwrap();
        assert_eq!(sorted_hashes(&commits), vec!["M1", "M2", "X", "Y", "Z"]);
        assert_unique(&commits);
        assert_eq!(
            sink.count(|d| matches!(d, Diagnostic::DuplicateCommit { hash } if hash == "X")),
            1
        );
    }

    #[test]
    fn test_mainline_commit_reached_from_merge_first() {
        // the feature branch forks from mainline commit C, after the release
        let mut repo = MockRepository::new();
        repo.add_commit("B", &[]);
        repo.add_commit("C", &["B"]);
        repo.add_commit("F", &["C"]);
        repo.add_commit("D", &["C"]);
        repo.add_commit("M", &["D", "F"]);
        repo.checkout_branch("main", "M");

        let commits = collect_commits(&repo, Some("B"), &mut NullSink).unwrap();
        assert_eq!(sorted_hashes(&commits), vec!["C", "D", "F", "M"]);
        assert_unique(&commits);
    }

    #[test]
    fn test_merge_without_boundary_collects_whole_graph() {
        let mut repo = MockRepository::new();
        repo.add_commit("R", &[]);
        repo.add_commit("A", &["R"]);
        repo.add_commit("F", &["R"]);
        repo.add_commit("M", &["A", "F"]);
        repo.checkout_branch("main", "M");

        let commits = collect_commits(&repo, None, &mut NullSink).unwrap();
        assert_eq!(sorted_hashes(&commits), vec!["A", "F", "M", "R"]);
        assert_unique(&commits);
    }

    #[test]
    fn test_boundary_on_merged_branch() {
        // release was tagged on the feature branch before it was merged
        let mut repo = MockRepository::new();
        repo.add_commit("R", &[]);
        repo.add_commit("A", &["R"]);
        repo.add_commit("F1", &["R"]);
        repo.add_commit("F2", &["F1"]);
        repo.add_commit("M", &["A", "F2"]);
        repo.checkout_branch("main", "M");

        let commits = collect_commits(&repo, Some("F1"), &mut NullSink).unwrap();
        assert_eq!(sorted_hashes(&commits), vec!["A", "F2", "M"]);
    }

    #[test]
    fn test_octopus_merge_parents_are_all_followed() {
        let mut repo = MockRepository::new();
        repo.add_commit("B", &[]);
        repo.add_commit("X", &["B"]);
        repo.add_commit("Y", &["B"]);
        repo.add_commit("Z", &["B"]);
        repo.add_commit("M", &["X", "Y", "Z"]);
        repo.checkout_branch("main", "M");

        let commits = collect_commits(&repo, Some("B"), &mut NullSink).unwrap();
        assert_eq!(sorted_hashes(&commits), vec!["M", "X", "Y", "Z"]);
    }

    #[test]
    fn test_unreadable_merge_parent_truncates_path() {
        let mut repo = MockRepository::new();
        repo.add_commit("A", &[]);
        repo.add_commit("M", &["A", "gone"]);
        repo.checkout_branch("main", "M");

        let mut sink = RecordingSink::new();
        let commits = collect_commits(&repo, None, &mut sink).unwrap();
        assert_eq!(hashes(&commits), vec!["M", "A"]);
        assert_eq!(
            sink.count(|d| matches!(d, Diagnostic::ParentUnreadable { hash, .. } if hash == "gone")),
            1
        );
    }

    #[test]
    fn test_broken_mainline_walk_fails_without_partial_result() {
        let mut repo = linear_repo();
        repo.break_history_at("B");

        let err = collect_commits(&repo, None, &mut NullSink).unwrap_err();
        assert!(matches!(err, ReleaseStateError::CommitHistoryRead(_)));
        assert!(err.to_string().contains("clone depth"));
    }

    #[test]
    fn test_missing_boundary_commit_is_an_error() {
        let repo = linear_repo();
        let err = collect_commits(&repo, Some("not-fetched"), &mut NullSink).unwrap_err();
        assert!(matches!(err, ReleaseStateError::CommitHistoryRead(_)));
        assert!(err.to_string().contains("not-fetched"));
    }

    #[test]
    fn test_missing_boundary_message_has_single_guidance() {
        let repo = linear_repo();
        let err = collect_commits(&repo, Some("not-fetched"), &mut NullSink).unwrap_err();
        assert_eq!(err.to_string().matches("clone depth").count(), 1, "got: {}", err);
    }

    #[test]
    fn test_abbreviated_boundary_is_expanded() {
        let mut repo = MockRepository::new();
        repo.add_commit("aaaa1111", &[]);
        repo.add_commit("bbbb2222", &["aaaa1111"]);
        repo.add_commit("cccc3333", &["bbbb2222"]);
        repo.checkout_branch("main", "cccc3333");

        let commits = collect_commits(&repo, Some("bbbb"), &mut NullSink).unwrap();
        assert_eq!(hashes(&commits), vec!["cccc3333"]);
    }

    #[test]
    fn test_released_history_is_not_read_in_full() {
        let mut repo = MockRepository::new();
        repo.add_commit("c0", &[]);
        for i in 1..200 {
            let parent = format!("c{}", i - 1);
            repo.add_commit(&format!("c{}", i), &[parent.as_str()]);
        }
        repo.add_commit("feature", &["c197"]);
        repo.add_commit("merge", &["c199", "feature"]);
        repo.checkout_branch("main", "merge");

        let commits = collect_commits(&repo, Some("c198"), &mut NullSink).unwrap();
        assert_eq!(sorted_hashes(&commits), vec!["c199", "feature", "merge"]);
        // only the merged branch is read commit by commit
        assert!(repo.commit_reads() <= 2, "read {} commits", repo.commit_reads());
    }

    #[test]
    fn test_shallow_history_without_boundary() {
        let mut repo = MockRepository::new();
        repo.add_commit("C", &["cut-off"]);
        repo.add_commit("D", &["C"]);
        repo.checkout_branch("main", "D");

        let commits = collect_commits(&repo, None, &mut NullSink).unwrap();
        assert_eq!(hashes(&commits), vec!["D", "C"]);
    }

    #[test]
    fn test_head_without_commit() {
        let repo = MockRepository::new();
        assert!(matches!(
            collect_commits(&repo, None, &mut NullSink),
            Err(ReleaseStateError::CommitHistoryRead(_))
        ));
    }

    #[test]
    fn test_collect_from_explicit_start() {
        let repo = linear_repo();
        let commits = collect_commits_from(&repo, "C", Some("A"), &mut NullSink).unwrap();
        assert_eq!(hashes(&commits), vec!["C", "B"]);
    }
}
