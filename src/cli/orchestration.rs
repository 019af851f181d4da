//! Resolution workflow behind the command line
//!
//! Keeps argument parsing (clap, in `main.rs`) apart from the workflow so it
//! can be called programmatically.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::load_config;
use crate::diagnostics::DiagnosticSink;
use crate::resolve::{ReleaseResolver, ReleaseState};

/// Arguments for the resolve workflow
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolveArgs {
    /// Repository path; parent directories are searched like git does
    pub repository: PathBuf,

    /// Path to custom config file
    pub config_path: Option<PathBuf>,

    /// Boundary commit overriding the last version tag
    pub since: Option<String>,
}

/// Load configuration, open the repository and resolve its release state.
pub fn run_resolve(args: &ResolveArgs, sink: &mut dyn DiagnosticSink) -> Result<ReleaseState> {
    let config = load_config(args.config_path.as_deref()).context("Error loading config")?;

    let resolver = ReleaseResolver::open(&args.repository, config)?;

    let state = match &args.since {
        Some(boundary) => resolver.resolve_since(Some(boundary.as_str()), sink)?,
        None => resolver.resolve(sink)?,
    };

    Ok(state)
}
