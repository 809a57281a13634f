// Bench configuration — optional JSON file, built-in scenarios otherwise
//
// {
//   "runs": 200,
//   "base_seed": 7,
//   "scenarios": [
//     { "name": "SPARE_8", "label": "8 spares, run dry",
//       "request": { "initial_spare_tokens": 8, "max_iterations": 100000 } }
//   ]
// }

use std::path::{Path, PathBuf};

use house_engine::SimulationRequest;
use serde::{Deserialize, Serialize};

use crate::scenarios::default_scenarios;

pub const DEFAULT_RUNS: usize = 100;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("invalid config {path}: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BenchConfig {
    #[serde(default = "default_runs")]
    pub runs: usize,
    #[serde(default)]
    pub base_seed: i64,
    #[serde(default = "default_scenarios")]
    pub scenarios: Vec<ScenarioConfig>,
}

/// One named request template. Its seed, if any, is replaced per sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub category: String,
    pub request: SimulationRequest,
}

fn default_runs() -> usize {
    DEFAULT_RUNS
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self { runs: DEFAULT_RUNS, base_seed: 0, scenarios: default_scenarios() }
    }
}

impl BenchConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        serde_json::from_str(&text)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// Scenarios whose name, label or category contains `filter` (any case).
    pub fn matching(&self, filter: Option<&str>) -> Vec<&ScenarioConfig> {
        match filter {
            Some(f) => {
                let f = f.to_lowercase();
                self.scenarios
                    .iter()
                    .filter(|s| {
                        s.name.to_lowercase().contains(&f)
                            || s.label.to_lowercase().contains(&f)
                            || s.category.to_lowercase().contains(&f)
                    })
                    .collect()
            }
            None => self.scenarios.iter().collect(),
        }
    }
}
