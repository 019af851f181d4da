use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::domain::BranchPolicy;
use crate::error::{ReleaseStateError, Result};
use crate::git::Repository;

/// Determine the branch name for the current checkout.
///
/// A symbolic HEAD yields its branch directly. A detached HEAD (common in CI
/// checkouts) falls back to a local branch chosen by `policy`.
///
/// # Errors
/// [`ReleaseStateError::NoBranchFound`] when HEAD cannot be read, or when it
/// is detached and no local branch qualifies.
/// [`ReleaseStateError::RepositoryRead`] when local branches cannot be listed.
pub fn resolve_branch<R: Repository + ?Sized>(
    repo: &R,
    policy: &BranchPolicy,
    sink: &mut dyn DiagnosticSink,
) -> Result<String> {
    let head = repo
        .head()
        .map_err(|_| ReleaseStateError::no_branch("HEAD"))?;

    if let Some(branch) = head.branch {
        sink.emit(Diagnostic::BranchFromHead {
            branch: branch.clone(),
        });
        return Ok(branch);
    }

    let branches = repo.local_branches()?;

    match policy.select(branches) {
        Some(branch) => {
            sink.emit(Diagnostic::BranchFromFallback {
                branch: branch.clone(),
                reference: head.reference,
            });
            Ok(branch)
        }
        None => Err(ReleaseStateError::no_branch(head.reference)),
    }
}
