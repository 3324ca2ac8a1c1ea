//! The prior policy: a scalar score used both for PUCT exploration weight and for
//! top-K pruning of candidate actions.

use crate::actions::{Action, ActionType};
use crate::dom::DOMState;

/// Simple heuristic prior over candidate actions.
///
/// Order-preserving and stable across calls with equal inputs; never returns below the
/// exploration floor of `0.01`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorPolicy;

impl PriorPolicy {
    pub fn new() -> Self {
        Self
    }

    /// `score(state, action) -> [0.01, +inf)`.
    pub fn score(&self, state: &DOMState, action: &Action) -> f64 {
        let mut score = 0.05;

        match action.action_type {
            ActionType::Type => {
                score += 0.45;
                if let Some(node_id) = &action.node_id {
                    if state.metadata.get(&format!("filled:{node_id}")).map(String::as_str)
                        == Some("true")
                    {
                        score -= 0.35;
                    }
                    if let Some(node) = state.nodes.get(node_id) {
                        if node.attr("required") == Some("true") {
                            score += 0.4;
                        }
                    }
                }
            }
            ActionType::Click => {
                score += 0.2;
                if action.node_id.as_deref() == Some("n_submit") {
                    score += 0.4;
                    if state.metadata.get("all_required_filled").map(String::as_str)
                        != Some("true")
                    {
                        score -= 0.45;
                    }
                }
            }
            ActionType::Select => score += 0.15,
            ActionType::Scroll => score -= 0.08,
            ActionType::Navigate => {}
        }

        if action.metadata.get("destructive").map(String::as_str) == Some("true") {
            score -= 0.5;
        }

        score.max(0.01)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::DOMNode;

    fn form_state() -> DOMState {
        let mut state = DOMState::new("https://mock.local/form");
        let mut name = DOMNode::new("n_name", "input");
        name.interactable = true;
        name.attributes.insert("required".into(), "true".into());
        state.nodes.insert("n_name".into(), name);
        state
            .metadata
            .insert("all_required_filled".into(), "false".into());
        state
    }

    #[test]
    fn score_never_goes_below_the_floor() {
        let policy = PriorPolicy::new();
        let state = form_state();
        let destructive = Action::new(ActionType::Scroll).with_metadata("destructive", "true");
        assert!(policy.score(&state, &destructive) >= 0.01);
    }

    #[test]
    fn submit_before_fill_scores_lower_than_typing_a_required_field() {
        let policy = PriorPolicy::new();
        let state = form_state();
        let submit = Action::new(ActionType::Click).with_node("n_submit");
        let type_name = Action::new(ActionType::Type)
            .with_node("n_name")
            .with_value("x_text");
        assert!(policy.score(&state, &submit) < policy.score(&state, &type_name));
    }

    #[test]
    fn destructive_metadata_penalizes_any_action_type() {
        let policy = PriorPolicy::new();
        let state = form_state();
        let click = Action::new(ActionType::Click).with_node("n_cancel");
        let destructive_click = click.clone().with_metadata("destructive", "true");
        assert!(policy.score(&state, &destructive_click) < policy.score(&state, &click));
    }

    #[test]
    fn filled_required_field_scores_lower_than_unfilled() {
        let policy = PriorPolicy::new();
        let mut filled = form_state();
        filled
            .metadata
            .insert("filled:n_name".into(), "true".into());
        let unfilled = form_state();

        let type_name = Action::new(ActionType::Type)
            .with_node("n_name")
            .with_value("x_text");
        assert!(policy.score(&filled, &type_name) < policy.score(&unfilled, &type_name));
    }
}
