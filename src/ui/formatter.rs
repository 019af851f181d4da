//! Pure formatting functions for UI output.
//!
//! Rendering is separated from printing so the output can be tested.

use console::style;

use crate::resolve::ReleaseState;

/// Number of commits listed before the rest are summarized
const COMMIT_PREVIEW_LIMIT: usize = 10;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// First line of a commit message, truncated to 60 characters
pub fn summary_line(message: &str) -> String {
    let first = message.lines().next().unwrap_or("").trim();
    if first.chars().count() > 60 {
        let short: String = first.chars().take(60).collect();
        format!("{}...", short)
    } else {
        first.to_string()
    }
}

fn short_hash(hash: &str) -> &str {
    hash.get(..7).unwrap_or(hash)
}

/// Human readable rendering of a resolved release state.
///
/// Shows the branch, HEAD, the last version (or a first-release note) and
/// up to 10 commits; any remaining commits are counted.
pub fn format_state(state: &ReleaseState) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} {}\n",
        style("Branch:").bold(),
        style(&state.branch).cyan()
    ));
    out.push_str(&format!(
        "{} {}\n",
        style("HEAD:").bold(),
        short_hash(&state.head)
    ));

    match &state.last_version {
        Some(last) => out.push_str(&format!(
            "{} {} ({}) at {}\n",
            style("Last version:").bold(),
            style(&last.version).green(),
            last.tag,
            short_hash(&last.commit)
        )),
        None => out.push_str(&format!(
            "{} {}\n",
            style("Last version:").bold(),
            style("none, first release").yellow()
        )),
    }

    out.push_str(&format!(
        "\n{}\n",
        style(format!("{} new commits:", state.commits.len())).underlined()
    ));

    for commit in state.commits.iter().take(COMMIT_PREVIEW_LIMIT) {
        out.push_str(&format!(
            "  {} {} ({})\n",
            style(short_hash(&commit.hash)).dim(),
            summary_line(&commit.message),
            commit.author
        ));
    }

    if state.commits.len() > COMMIT_PREVIEW_LIMIT {
        out.push_str(&format!(
            "  ... and {} more commits\n",
            state.commits.len() - COMMIT_PREVIEW_LIMIT
        ));
    }

    out
}

/// Machine readable rendering
pub fn format_toml(state: &ReleaseState) -> Result<String, toml::ser::Error> {
    toml::to_string(state)
}
