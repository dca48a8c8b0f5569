use crate::core::RuleConfig;
use serde::{Deserialize, Serialize};

pub const CONFIG_PATH: &str = "filler_config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub version: String,
    pub rules: RuleConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Node limit per `solve`. `None` searches to the end of the game.
    pub node_budget: Option<u64>,
    /// Weight of the mobility term in the fallback evaluation.
    pub mobility_weight: i32,
    /// Skip moves that gain nothing (a forced pass is still played).
    pub prune_zero_growth: bool,
    /// Search root moves on the rayon pool.
    pub parallel_root: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            node_budget: None,
            mobility_weight: 1,
            prune_zero_growth: true,
            parallel_root: false,
        }
    }
}

impl SolverConfig {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(CONFIG_PATH)
    }

    pub fn load_from(path: &str) -> anyhow::Result<Self> {
        let config_str = std::fs::read_to_string(path)?;
        let config: SolverConfig = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|_| Self::default())
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            version: "1.0".to_string(),
            rules: RuleConfig::default(),
            search: SearchConfig::default(),
        }
    }
}
