//! A tiny batch-episode evaluation harness.

use crate::environment::Environment;
use crate::runner::AgentRunner;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalSummary {
    pub episodes: usize,
    pub success_rate: f64,
    pub avg_steps: f64,
}

/// Run `episodes` fresh episodes (one env per episode, built by `env_factory`) through
/// `runner` and summarize the outcomes.
pub fn evaluate_runner<E, F>(runner: &mut AgentRunner, mut env_factory: F, episodes: usize) -> EvalSummary
where
    E: Environment + 'static,
    F: FnMut() -> E,
{
    let mut successes = 0usize;
    let mut steps = 0usize;

    for _ in 0..episodes {
        let mut env = env_factory();
        let result = runner.run_episode(&mut env, 10);
        if result.success {
            successes += 1;
        }
        steps += result.steps;
    }

    EvalSummary {
        episodes,
        success_rate: if episodes == 0 {
            0.0
        } else {
            successes as f64 / episodes as f64
        },
        avg_steps: if episodes == 0 {
            0.0
        } else {
            steps as f64 / episodes as f64
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ActionGenerator;
    use crate::environment::MockBrowserEnv;
    use crate::mcts::{MCTSConfig, MCTSPlanner};
    use crate::policy::PriorPolicy;
    use crate::reward::RewardModel;

    #[test]
    fn evaluate_runner_reports_a_plausible_success_rate() {
        let planner = MCTSPlanner::new(
            ActionGenerator::new("seed"),
            RewardModel::new(),
            PriorPolicy::new(),
            MCTSConfig {
                simulations: 60,
                rollout_depth: 5,
                top_k_actions: 8,
                ..MCTSConfig::default()
            },
        );
        let mut runner = AgentRunner::new(planner, 1);
        let summary = evaluate_runner(&mut runner, MockBrowserEnv::default, 3);
        assert_eq!(summary.episodes, 3);
        assert!(summary.success_rate >= 0.0 && summary.success_rate <= 1.0);
        assert!(summary.avg_steps >= 1.0);
    }

    #[test]
    fn evaluate_runner_handles_zero_episodes() {
        let planner = MCTSPlanner::new(
            ActionGenerator::new("seed"),
            RewardModel::new(),
            PriorPolicy::new(),
            MCTSConfig::default(),
        );
        let mut runner = AgentRunner::new(planner, 1);
        let summary = evaluate_runner(&mut runner, MockBrowserEnv::default, 0);
        assert_eq!(summary.success_rate, 0.0);
        assert_eq!(summary.avg_steps, 0.0);
    }
}
