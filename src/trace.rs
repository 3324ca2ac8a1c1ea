//! Minimal in-memory execution trace, for replay and debugging.

use serde::Serialize;

use crate::actions::Action;
use crate::dom::DOMState;

#[derive(Debug, Clone, Serialize)]
pub struct TraceEvent {
    pub step: u32,
    pub action: String,
    pub url: String,
    pub success: bool,
}

/// Records plans and executed actions as a run progresses.
#[derive(Debug, Clone, Default)]
pub struct TraceRecorder {
    pub events: Vec<TraceEvent>,
    pub plans: Vec<Vec<String>>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_plan(&mut self, actions: &[Action]) {
        self.plans
            .push(actions.iter().map(Action::canonical).collect());
    }

    pub fn record_action(&mut self, prev_state: &DOMState, action: &Action, next_state: &DOMState) {
        self.events.push(TraceEvent {
            step: next_state.step,
            action: action.canonical(),
            url: prev_state.url.clone(),
            success: next_state.metadata.get("success").map(String::as_str) == Some("true"),
        });
    }
}
