//! The action space: candidate actions over a DOM state, and their canonical identity.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dom::DOMState;

/// The kind of interaction an [`Action`] performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Click,
    Type,
    Select,
    Scroll,
    Navigate,
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionType::Click => "click",
            ActionType::Type => "type",
            ActionType::Select => "select",
            ActionType::Scroll => "scroll",
            ActionType::Navigate => "navigate",
        };
        f.write_str(s)
    }
}

/// A value-typed candidate action. Two actions with equal [`Action::canonical`] must be
/// treated as equal and produce identical planner behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub action_type: ActionType,
    pub node_id: Option<String>,
    pub value: Option<String>,
    pub metadata: std::collections::BTreeMap<String, String>,
}

impl Action {
    pub fn new(action_type: ActionType) -> Self {
        Self {
            action_type,
            node_id: None,
            value: None,
            metadata: std::collections::BTreeMap::new(),
        }
    }

    pub fn with_node(mut self, node_id: impl Into<String>) -> Self {
        self.node_id = Some(node_id.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// The byte-stable canonical form: `type:node_id:value:k1=v1|k2=v2|...`, with `"_"` for
    /// an absent `node_id`/`value` and metadata keys sorted lexicographically. This is the
    /// action's identity for deduplication, tree indexing, and trace recording.
    pub fn canonical(&self) -> String {
        let node_id = self.node_id.as_deref().unwrap_or("_");
        let value = self.value.as_deref().unwrap_or("_");
        let metadata_repr = self
            .metadata
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("|");
        format!("{}:{}:{}:{}", self.action_type, node_id, value, metadata_repr)
    }
}

/// Generates deterministic, canonical action candidates from a [`DOMState`].
///
/// Pure and total: never fails. Malformed attribute strings are treated as their defaults.
#[derive(Debug, Clone)]
pub struct ActionGenerator {
    default_input_text: String,
}

impl ActionGenerator {
    pub fn new(default_input_text: impl Into<String>) -> Self {
        Self {
            default_input_text: default_input_text.into(),
        }
    }

    /// Deterministic, deduplicated, lexicographically-sorted-by-canonical-form action list.
    pub fn enumerate(&self, state: &DOMState) -> Vec<Action> {
        let mut candidates = Vec::new();

        // `state.nodes` is a BTreeMap, so this already iterates in lexicographic key order.
        for (node_id, node) in &state.nodes {
            if !node.visible {
                continue;
            }

            if node.interactable {
                let mut action = Action::new(ActionType::Click).with_node(node_id.clone());
                if node.attr("destructive") == Some("true") {
                    action = action.with_metadata("destructive", "true");
                }
                candidates.push(action);
            }

            if (node.tag == "input" || node.tag == "textarea") && node.interactable {
                let placeholder = node.attr("placeholder").unwrap_or(&self.default_input_text);
                let value = format!("{placeholder}_text");
                candidates.push(
                    Action::new(ActionType::Type)
                        .with_node(node_id.clone())
                        .with_value(value),
                );
            }

            if node.tag == "select" && node.interactable {
                let first_option = match node.attr("options") {
                    Some(options) if !options.is_empty() => {
                        options.split(',').next().unwrap_or("").trim().to_string()
                    }
                    _ => "option_1".to_string(),
                };
                candidates.push(
                    Action::new(ActionType::Select)
                        .with_node(node_id.clone())
                        .with_value(first_option),
                );
            }
        }

        if state.metadata_or("scrollable", "true") == "true" {
            candidates.push(
                Action::new(ActionType::Scroll)
                    .with_node("viewport")
                    .with_value("300"),
            );
        }

        Self::deduplicate(candidates)
    }

    fn deduplicate(actions: Vec<Action>) -> Vec<Action> {
        let mut by_canonical: std::collections::BTreeMap<String, Action> =
            std::collections::BTreeMap::new();
        for action in actions {
            by_canonical.insert(action.canonical(), action);
        }
        by_canonical.into_values().collect()
    }
}

impl Default for ActionGenerator {
    fn default() -> Self {
        Self::new("sample_value")
    }
}
