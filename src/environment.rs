//! The environment contract the planner requires, and the deterministic mock used for
//! development and tests.

use std::collections::BTreeMap;

use crate::actions::{Action, ActionType};
use crate::dom::{DOMNode, DOMState, TaskSpec};

/// The capability the planner consumes: observe, apply, clone, and terminal checks.
///
/// All methods are synchronous and return immediately; there are no suspension points.
/// `clone_env` must produce a deep, independent copy — the planner's guarantees rely on
/// `apply` calls on a clone having no effect on the caller's environment. `apply` must be a
/// no-op returning the current observation once `is_terminal` is true.
pub trait Environment {
    /// Snapshot current state. Idempotent.
    fn observe(&self) -> DOMState;

    /// Advance one step, returning the post-state.
    fn apply(&mut self, action: &Action) -> DOMState;

    /// Deep, independent copy.
    fn clone_env(&self) -> Box<dyn Environment>;

    fn is_terminal(&self) -> bool;

    fn is_success(&self) -> bool;
}

/// Deterministic browser-like env for baseline development and tests: a form with two
/// required fields (`n_name`, `n_email`), a submit button, and a destructive cancel button.
#[derive(Debug, Clone)]
pub struct MockBrowserEnv {
    pub task: TaskSpec,
    max_steps: u32,
    step: u32,
    success: bool,
    failed: bool,
    submitted: bool,
    field_values: BTreeMap<String, String>,
    history: Vec<String>,
}

impl MockBrowserEnv {
    pub fn new(max_steps: u32) -> Self {
        let mut field_values = BTreeMap::new();
        field_values.insert("n_name".to_string(), String::new());
        field_values.insert("n_email".to_string(), String::new());

        Self {
            task: TaskSpec::new("Fill required fields and submit the form"),
            max_steps,
            step: 0,
            success: false,
            failed: false,
            submitted: false,
            field_values,
            history: Vec::new(),
        }
    }

    fn all_required_filled(&self) -> bool {
        self.field_values.values().all(|v| !v.trim().is_empty())
    }
}

impl Default for MockBrowserEnv {
    fn default() -> Self {
        Self::new(8)
    }
}

impl Environment for MockBrowserEnv {
    fn observe(&self) -> DOMState {
        let required_filled = self.all_required_filled();
        let status_text = if self.success {
            "success"
        } else if self.failed {
            "failed"
        } else {
            "pending"
        };

        let mut nodes = BTreeMap::new();

        let mut form = DOMNode::new("n_form", "form");
        form.children = vec![
            "n_name".to_string(),
            "n_email".to_string(),
            "n_submit".to_string(),
            "n_cancel".to_string(),
        ];
        nodes.insert("n_form".to_string(), form);

        let mut name = DOMNode::new("n_name", "input");
        name.interactable = true;
        name.text = self.field_values["n_name"].clone();
        name.attributes.insert("placeholder".into(), "name".into());
        name.attributes.insert("required".into(), "true".into());
        nodes.insert("n_name".to_string(), name);

        let mut email = DOMNode::new("n_email", "input");
        email.interactable = true;
        email.text = self.field_values["n_email"].clone();
        email.attributes.insert("placeholder".into(), "email".into());
        email.attributes.insert("required".into(), "true".into());
        nodes.insert("n_email".to_string(), email);

        let mut submit = DOMNode::new("n_submit", "button");
        submit.text = "submit".to_string();
        submit.interactable = true;
        submit.attributes.insert("id".into(), "submit".into());
        nodes.insert("n_submit".to_string(), submit);

        let mut cancel = DOMNode::new("n_cancel", "button");
        cancel.text = "cancel".to_string();
        cancel.interactable = true;
        cancel.attributes.insert("destructive".into(), "true".into());
        nodes.insert("n_cancel".to_string(), cancel);

        let mut status = DOMNode::new("n_status", "div");
        status.text = status_text.to_string();
        nodes.insert("n_status".to_string(), status);

        let mut metadata = BTreeMap::new();
        metadata.insert(
            "all_required_filled".to_string(),
            required_filled.to_string(),
        );
        metadata.insert("submitted".to_string(), self.submitted.to_string());
        metadata.insert("success".to_string(), self.success.to_string());
        metadata.insert("scrollable".to_string(), "true".to_string());
        for (field, value) in &self.field_values {
            metadata.insert(
                format!("filled:{field}"),
                (!value.trim().is_empty()).to_string(),
            );
        }

        DOMState {
            url: "https://mock.local/form".to_string(),
            nodes,
            focused_node_id: None,
            interaction_history: self.history.clone(),
            metadata,
            step: self.step,
        }
    }

    fn apply(&mut self, action: &Action) -> DOMState {
        if self.is_terminal() {
            return self.observe();
        }

        self.step += 1;
        self.history.push(action.canonical());

        if action.action_type == ActionType::Type {
            if let Some(node_id) = &action.node_id {
                if self.field_values.contains_key(node_id) {
                    let value = action.value.as_deref().unwrap_or("").trim().to_string();
                    self.field_values.insert(node_id.clone(), value);
                }
            }
        }

        if action.action_type == ActionType::Click {
            match action.node_id.as_deref() {
                Some("n_submit") => {
                    self.submitted = true;
                    if self.all_required_filled() {
                        self.success = true;
                    } else {
                        self.failed = true;
                    }
                }
                Some("n_cancel") => self.failed = true,
                _ => {}
            }
        }

        if self.step >= self.max_steps && !self.success {
            self.failed = true;
        }

        self.observe()
    }

    fn clone_env(&self) -> Box<dyn Environment> {
        Box::new(self.clone())
    }

    fn is_terminal(&self) -> bool {
        self.success || self.failed
    }

    fn is_success(&self) -> bool {
        self.success
    }
}
