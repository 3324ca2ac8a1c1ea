//! Ambient configuration layer above [`crate::mcts::MCTSConfig`].
//!
//! `MCTSConfig` itself stays a plain data struct with the reference planner's own
//! defaults. `PlannerSettings` bundles it with the action generator's and runner's knobs
//! into one serde-friendly struct, loadable from a JSON string or file — the same crate the
//! teacher already uses for its own wire payloads, so no new dependency is pulled in.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::mcts::MCTSConfig;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlannerSettings {
    pub simulations: usize,
    pub exploration_constant: f64,
    pub rollout_depth: usize,
    pub top_k_actions: usize,
    pub discount: f64,
    pub execute_prefix: usize,
    pub max_iterations: usize,
}

impl PlannerSettings {
    pub fn mcts_config(&self) -> MCTSConfig {
        MCTSConfig {
            simulations: self.simulations,
            exploration_constant: self.exploration_constant,
            rollout_depth: self.rollout_depth,
            top_k_actions: self.top_k_actions,
            discount: self.discount,
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let settings: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::InvalidJson {
                details: err.to_string(),
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|err| ConfigError::ReadFailed {
            path: path.display().to_string(),
            details: err.to_string(),
        })?;
        Self::from_json_str(&raw)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.exploration_constant < 0.0 {
            return Err(ConfigError::NotPositive {
                field: "exploration_constant",
                value: self.exploration_constant,
            });
        }
        if self.discount <= 0.0 {
            return Err(ConfigError::NotPositive {
                field: "discount",
                value: self.discount,
            });
        }
        Ok(())
    }
}

impl Default for PlannerSettings {
    /// Mirrors the CLI's own defaults (`simulations=80, rollout_depth=5,
    /// top_k_actions=8, execute_prefix=1`), which deliberately differ from
    /// `MCTSConfig::default()`'s `simulations=96` — both are documented tunables.
    fn default() -> Self {
        Self {
            simulations: 80,
            exploration_constant: 1.4,
            rollout_depth: 5,
            top_k_actions: 8,
            discount: 0.96,
            execute_prefix: 1,
            max_iterations: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_round_trip_into_an_mcts_config() {
        let settings = PlannerSettings::default();
        let config = settings.mcts_config();
        assert_eq!(config.simulations, 80);
        assert_eq!(config.top_k_actions, 8);
    }

    #[test]
    fn from_json_str_loads_overrides() {
        let raw = r#"{
            "simulations": 10,
            "exploration_constant": 1.0,
            "rollout_depth": 3,
            "top_k_actions": 4,
            "discount": 0.9,
            "execute_prefix": 2,
            "max_iterations": 5
        }"#;
        let settings = PlannerSettings::from_json_str(raw).unwrap();
        assert_eq!(settings.simulations, 10);
        assert_eq!(settings.execute_prefix, 2);
    }

    #[test]
    fn from_json_str_rejects_a_non_positive_discount() {
        let raw = r#"{
            "simulations": 10, "exploration_constant": 1.0, "rollout_depth": 3,
            "top_k_actions": 4, "discount": 0.0, "execute_prefix": 1, "max_iterations": 5
        }"#;
        assert!(PlannerSettings::from_json_str(raw).is_err());
    }

    #[test]
    fn from_json_file_loads_settings_written_to_disk() {
        let path = std::env::temp_dir().join("dom_mcts_planner_settings_test.json");
        std::fs::write(
            &path,
            r#"{
                "simulations": 20, "exploration_constant": 1.2, "rollout_depth": 4,
                "top_k_actions": 6, "discount": 0.95, "execute_prefix": 1, "max_iterations": 8
            }"#,
        )
        .unwrap();

        let settings = PlannerSettings::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.simulations, 20);
        assert_eq!(settings.top_k_actions, 6);
    }

    #[test]
    fn from_json_file_reports_a_missing_path() {
        let err = PlannerSettings::from_json_file("/nonexistent/dom_mcts_planner_settings.json");
        assert!(matches!(err, Err(ConfigError::ReadFailed { .. })));
    }
}
