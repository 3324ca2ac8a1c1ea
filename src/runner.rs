//! Online re-planning loop: observe -> search -> execute prefix -> repeat.
//!
//! This is a thin loop around the planner contract, not core search logic — it owns no
//! tree state of its own and never second-guesses the plan it is handed.

use crate::actions::Action;
use crate::environment::Environment;
use crate::mcts::{MCTSPlanner, PlanResult};
use crate::trace::TraceRecorder;

#[derive(Debug, Clone)]
pub struct EpisodeResult {
    pub success: bool,
    pub steps: usize,
    pub executed_actions: Vec<Action>,
    /// The last `PlanResult` computed during the episode, for inspecting `estimated_value`
    /// or the search tree after a run. `None` only if `max_iterations == 0`.
    pub final_plan: Option<PlanResult>,
}

/// Runs the online re-planning loop against any [`Environment`].
pub struct AgentRunner {
    planner: MCTSPlanner,
    execute_prefix: usize,
    trace_recorder: Option<TraceRecorder>,
}

impl AgentRunner {
    pub fn new(planner: MCTSPlanner, execute_prefix: usize) -> Self {
        Self {
            planner,
            execute_prefix: execute_prefix.max(1),
            trace_recorder: None,
        }
    }

    pub fn with_trace_recorder(mut self, trace_recorder: TraceRecorder) -> Self {
        self.trace_recorder = Some(trace_recorder);
        self
    }

    pub fn trace_recorder(&self) -> Option<&TraceRecorder> {
        self.trace_recorder.as_ref()
    }

    /// Re-plan and execute up to `max_iterations` times, stopping early once `env` becomes
    /// terminal or a plan comes back empty ("no move").
    pub fn run_episode(&mut self, env: &mut dyn Environment, max_iterations: usize) -> EpisodeResult {
        let mut executed_actions = Vec::new();
        let mut final_plan: Option<PlanResult> = None;

        for iteration in 0..max_iterations {
            if env.is_terminal() {
                break;
            }

            let plan_result: PlanResult = self.planner.plan(env);
            log::info!(
                "re-plan iteration {iteration}: {} actions, estimated_value={:.3}",
                plan_result.actions.len(),
                plan_result.estimated_value,
            );

            let actions = plan_result.actions.clone();
            final_plan = Some(plan_result);

            if actions.is_empty() {
                break;
            }

            if let Some(recorder) = &mut self.trace_recorder {
                recorder.record_plan(&actions);
            }

            for action in actions.iter().take(self.execute_prefix) {
                let prev_state = env.observe();
                let next_state = env.apply(action);
                executed_actions.push(action.clone());

                if let Some(recorder) = &mut self.trace_recorder {
                    recorder.record_action(&prev_state, action, &next_state);
                }

                if env.is_terminal() {
                    break;
                }
            }
        }

        EpisodeResult {
            success: env.is_success(),
            steps: executed_actions.len(),
            executed_actions,
            final_plan,
        }
    }
}
