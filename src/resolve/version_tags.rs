use semver::Version;

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::domain::tag::compare_descending;
use crate::domain::{parse_tag_version, TagPolicy, VersionTag};
use crate::error::Result;
use crate::git::Repository;

/// All tags that parse as versions, highest precedence first.
///
/// Tags that are not versions are skipped and reported to `sink`; they are
/// never an error.
pub fn version_candidates<R: Repository + ?Sized>(
    repo: &R,
    policy: &TagPolicy,
    sink: &mut dyn DiagnosticSink,
) -> Result<Vec<(Version, String)>> {
    let mut candidates = Vec::new();

    for tag in repo.list_tags()? {
        sink.emit(Diagnostic::TagSeen { tag: tag.clone() });

        match parse_tag_version(&tag) {
            Ok(version) if !policy.include_prereleases && !version.pre.is_empty() => {
                sink.emit(Diagnostic::TagSkipped {
                    tag,
                    reason: "pre-release versions are excluded".to_string(),
                });
            }
            Ok(version) => candidates.push((version, tag)),
            Err(e) => sink.emit(Diagnostic::TagSkipped {
                tag,
                reason: e.to_string(),
            }),
        }
    }

    candidates.sort_by(compare_descending);
    Ok(candidates)
}

/// Highest version tag and the commit it points to.
///
/// Returns `Ok(None)` when no tag is a version, which is the normal state
/// before a first release.
///
/// # Errors
/// [`crate::error::ReleaseStateError::RepositoryRead`] when tags cannot be
/// enumerated or the winning tag cannot be resolved to a commit.
pub fn find_last_version<R: Repository + ?Sized>(
    repo: &R,
    policy: &TagPolicy,
    sink: &mut dyn DiagnosticSink,
) -> Result<Option<VersionTag>> {
    let Some((version, tag)) = version_candidates(repo, policy, sink)?.into_iter().next() else {
        sink.emit(Diagnostic::NoVersionTags);
        return Ok(None);
    };

    let commit = repo.resolve_tag(&tag)?;
    sink.emit(Diagnostic::LastVersion {
        tag: tag.clone(),
        version: version.to_string(),
        commit: commit.clone(),
    });

    Ok(Some(VersionTag {
        version,
        tag,
        commit,
    }))
}
