use super::Preferences;
use serde::{Deserialize, Serialize};

/// Single value threading every planner/editor-wide knob through the
/// public API explicitly, so no component reaches for module-level
/// globals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    pub preferences: Preferences,
    /// Hard cap on how many size-`target` combinations the first-term
    /// bounded search will enumerate before falling back to sampling.
    #[serde(default = "default_search_cap")]
    pub search_combination_cap: usize,
    /// Above this many zero-indegree, offered courses in the first term,
    /// candidates are randomly sampled rather than exhaustively enumerated.
    #[serde(default = "default_available_sample_threshold")]
    pub available_sample_threshold: usize,
}

fn default_search_cap() -> usize {
    4096
}

fn default_available_sample_threshold() -> usize {
    12
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            preferences: Preferences::default(),
            search_combination_cap: default_search_cap(),
            available_sample_threshold: default_available_sample_threshold(),
        }
    }
}

impl PlannerConfig {
    /// Load overrides from a TOML defaults file, falling back to
    /// `PlannerConfig::default()` on any error.
    pub fn load_or_default(path: &std::path::Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }
}
