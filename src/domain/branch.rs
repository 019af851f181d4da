use serde::{Deserialize, Serialize};

/// Order in which local branches are considered when HEAD is detached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackOrder {
    /// Lexicographic by short name, stable across runs
    #[default]
    Sorted,
    /// Ref enumeration order of the repository backend
    FirstFound,
}

/// How to pick a branch name for a detached HEAD
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BranchPolicy {
    #[serde(default)]
    pub fallback_order: FallbackOrder,

    /// Short names never returned by the fallback
    #[serde(default = "default_excluded")]
    pub excluded: Vec<String>,
}

fn default_excluded() -> Vec<String> {
    vec!["origin".to_string()]
}

impl Default for BranchPolicy {
    fn default() -> Self {
        BranchPolicy {
            fallback_order: FallbackOrder::default(),
            excluded: default_excluded(),
        }
    }
}

impl BranchPolicy {
    /// Pick the fallback branch from enumerated local branch names
    pub fn select(&self, mut branches: Vec<String>) -> Option<String> {
        if self.fallback_order == FallbackOrder::Sorted {
            branches.sort();
        }
        branches
            .into_iter()
            .find(|name| !self.excluded.iter().any(|excluded| excluded == name))
    }
}
