//! Domain types - pure values independent of git operations

pub mod branch;
pub mod commit;
pub mod tag;

pub use branch::{BranchPolicy, FallbackOrder};
pub use commit::{Commit, CommitRecord};
pub(crate) use commit::CommitSet;
pub use tag::{parse_tag_version, TagParseError, TagPolicy, VersionTag};
