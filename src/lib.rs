pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod git;
pub mod resolve;
pub mod ui;

pub use config::Config;
pub use diagnostics::{Diagnostic, DiagnosticSink, LogSink, NullSink, RecordingSink};
pub use domain::{Commit, VersionTag};
pub use error::{ReleaseStateError, Result};
pub use resolve::{resolve_release_state, ReleaseResolver, ReleaseState};
