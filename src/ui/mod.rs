//! User interface module - terminal output for resolved release state.

pub mod formatter;

pub use formatter::{display_error, format_state, format_toml, summary_line};

use crate::resolve::ReleaseState;

/// Output format of the resolved state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Styled text for terminals
    #[default]
    Text,
    /// TOML document for scripts
    Toml,
}

/// Print the state to stdout in the requested format
pub fn display_state(state: &ReleaseState, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", format_state(state)),
        OutputFormat::Toml => print!("{}", format_toml(state)?),
    }
    Ok(())
}
