//! The reward model: maps a `(prev_state, action, next_state, terminal flags)` transition
//! to an additive [`RewardBreakdown`].

use crate::actions::{Action, ActionType};
use crate::dom::{DOMState, RewardBreakdown};

/// Heuristic reward model for baseline planning and rollout scoring.
#[derive(Debug, Clone, Copy, Default)]
pub struct RewardModel;

impl RewardModel {
    pub fn new() -> Self {
        Self
    }

    /// Pure: `evaluate(prev, action, next, is_terminal, is_success) -> RewardBreakdown`.
    pub fn evaluate(
        &self,
        prev_state: &DOMState,
        action: &Action,
        next_state: &DOMState,
        is_terminal: bool,
        is_success: bool,
    ) -> RewardBreakdown {
        let progress = self.progress_reward(prev_state, action, next_state);
        let risk = self.risk_penalty(action);
        let efficiency = -0.02;
        let terminal = if is_terminal {
            if is_success {
                1.0
            } else {
                -1.0
            }
        } else {
            0.0
        };

        RewardBreakdown::new(progress, risk, efficiency, terminal)
    }

    fn progress_reward(&self, prev_state: &DOMState, action: &Action, next_state: &DOMState) -> f64 {
        let mut reward = 0.0;

        if action.action_type == ActionType::Type {
            if let Some(node_id) = &action.node_id {
                let key = format!("filled:{node_id}");
                let was_filled = prev_state.metadata.get(&key).map(String::as_str) == Some("true");
                let is_filled = next_state.metadata.get(&key).map(String::as_str) == Some("true");
                reward += if !was_filled && is_filled { 0.7 } else { 0.1 };
            }
        }

        if action.action_type == ActionType::Click {
            reward += 0.1;
            if action.node_id.as_deref() == Some("n_submit")
                && next_state.metadata.get("all_required_filled").map(String::as_str)
                    == Some("true")
            {
                reward += 0.7;
            }
        }

        if action.action_type == ActionType::Select {
            reward += 0.2;
        }

        if action.action_type == ActionType::Scroll {
            reward -= 0.05;
        }

        if next_state.interaction_history.len() > prev_state.interaction_history.len() {
            reward += 0.02;
        }

        reward
    }

    fn risk_penalty(&self, action: &Action) -> f64 {
        if action.metadata.get("destructive").map(String::as_str) == Some("true") {
            -0.8
        } else {
            0.0
        }
    }
}
