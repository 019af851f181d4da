use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{BranchPolicy, TagPolicy};
use crate::error::{ReleaseStateError, Result};

/// File name looked up in the working directory and the user config directory
pub const CONFIG_FILE_NAME: &str = ".release-state.toml";

/// Complete configuration for release state resolution.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    /// Branch selection for detached HEAD checkouts
    #[serde(default)]
    pub branch: BranchPolicy,

    /// Which tags count as versions
    #[serde(default)]
    pub tags: TagPolicy,
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ReleaseStateError::config(e.to_string()))
    }
}

fn default_locations() -> Vec<PathBuf> {
    let mut locations = vec![Path::new(".").join(CONFIG_FILE_NAME)];
    if let Some(config_dir) = dirs::config_dir() {
        locations.push(config_dir.join(CONFIG_FILE_NAME));
    }
    locations
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `.release-state.toml` in current directory
/// 3. `.release-state.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Errors
/// Fails if an explicit path cannot be read, or a found file cannot be parsed.
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => match default_locations().into_iter().find(|p| p.exists()) {
            Some(path) => path,
            None => return Ok(Config::default()),
        },
    };

    let content = fs::read_to_string(&path)?;
    Config::from_toml_str(&content)
        .map_err(|e| ReleaseStateError::config(format!("{}: {}", path.display(), e)))
}
