//! The MCTS planner: tree growth, PUCT selection, rollouts, discounted backup, and plan
//! extraction.
//!
//! The tree is an arena (`Vec<TreeNode>` addressed by index) rather than a graph of
//! `Rc`/`Weak` pointers — `path` is a list of indices built once during descent and walked
//! in reverse for backpropagation. This avoids the lifetime cycles a parent-pointer tree
//! would otherwise need, and makes the whole tree trivially droppable at the end of
//! `plan()`.

use std::collections::BTreeMap;
use std::time::Instant;

use crate::actions::{Action, ActionGenerator};
use crate::dom::DOMState;
use crate::environment::Environment;
use crate::policy::PriorPolicy;
use crate::reward::RewardModel;

/// Tunable search budget. `MCTSConfig::default()` mirrors the reference planner's own
/// dataclass default (`simulations = 96`); callers such as [`crate::config::PlannerSettings`]
/// may use a different default — see spec notes on tunables vs. contract.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MCTSConfig {
    pub simulations: usize,
    pub exploration_constant: f64,
    pub rollout_depth: usize,
    pub top_k_actions: usize,
    pub discount: f64,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            simulations: 96,
            exploration_constant: 1.4,
            rollout_depth: 5,
            top_k_actions: 12,
            discount: 0.96,
        }
    }
}

/// One node of the search tree, owned by the arena in [`MCTSPlanner::plan`].
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub state: DOMState,
    pub parent: Option<usize>,
    pub action_from_parent: Option<Action>,
    pub prior: f64,
    pub visits: u32,
    pub value_sum: f64,
    pub children: BTreeMap<String, usize>,
}

impl TreeNode {
    fn root(state: DOMState) -> Self {
        Self {
            state,
            parent: None,
            action_from_parent: None,
            prior: 1.0,
            visits: 0,
            value_sum: 0.0,
            children: BTreeMap::new(),
        }
    }

    fn child(state: DOMState, parent: usize, action_from_parent: Action, prior: f64) -> Self {
        Self {
            state,
            parent: Some(parent),
            action_from_parent: Some(action_from_parent),
            prior,
            visits: 0,
            value_sum: 0.0,
            children: BTreeMap::new(),
        }
    }

    /// `value_sum / max(visits, 1)`, with `0.0` when unvisited.
    pub fn q_value(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.value_sum / self.visits as f64
        }
    }
}

/// The result of one `plan()` call.
///
/// `nodes` is the full arena built during search (root at index `0`, matching every index
/// stored in `TreeNode.children`/`TreeNode.parent`) so callers can walk the tree for
/// inspection or testing; `root` is `nodes[0]`, kept as its own field for convenient access.
#[derive(Debug, Clone)]
pub struct PlanResult {
    pub actions: Vec<Action>,
    pub estimated_value: f64,
    pub simulations_run: usize,
    pub root: TreeNode,
    pub nodes: Vec<TreeNode>,
}

/// Baseline PUCT planner for DOM-grounded action search.
pub struct MCTSPlanner {
    action_generator: ActionGenerator,
    reward_model: RewardModel,
    prior_policy: PriorPolicy,
    config: MCTSConfig,
}

impl MCTSPlanner {
    pub fn new(
        action_generator: ActionGenerator,
        reward_model: RewardModel,
        prior_policy: PriorPolicy,
        config: MCTSConfig,
    ) -> Self {
        Self {
            action_generator,
            reward_model,
            prior_policy,
            config,
        }
    }

    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }

    /// Run the bounded search against `env` (borrowed: observed and cloned, never
    /// `apply`'d) and return a ranked plan prefix.
    pub fn plan(&self, env: &dyn Environment) -> PlanResult {
        let start = Instant::now();
        let root_state = env.observe();
        let mut nodes: Vec<TreeNode> = vec![TreeNode::root(root_state)];
        const ROOT: usize = 0;

        for _ in 0..self.config.simulations {
            let mut sim_env = env.clone_env();
            let mut node_index = ROOT;
            let mut path = vec![ROOT];
            let mut depth = 0usize;

            loop {
                if sim_env.is_terminal() || depth >= self.config.rollout_depth {
                    break;
                }

                let candidates = self.candidate_actions(&nodes[node_index].state);
                let unexpanded: Vec<&Action> = candidates
                    .iter()
                    .filter(|action| !nodes[node_index].children.contains_key(&action.canonical()))
                    .collect();

                if let Some(action) = unexpanded.first() {
                    let action = (*action).clone();
                    let prior = self.prior_policy.score(&nodes[node_index].state, &action);
                    let next_state = sim_env.apply(&action);
                    let canonical = action.canonical();
                    let new_index = nodes.len();
                    nodes.push(TreeNode::child(next_state, node_index, action, prior));
                    nodes[node_index].children.insert(canonical, new_index);
                    node_index = new_index;
                    path.push(node_index);
                    depth += 1;
                    break;
                }

                if nodes[node_index].children.is_empty() {
                    break;
                }

                let selected = self.select_child(&nodes, node_index);
                let selected_action = nodes[selected]
                    .action_from_parent
                    .clone()
                    .expect("child must have an action from its parent");
                sim_env.apply(&selected_action);
                node_index = selected;
                path.push(node_index);
                depth += 1;
            }

            let value = self.rollout(sim_env.as_mut(), depth);
            self.backpropagate(&mut nodes, &path, value);
        }

        let actions = self.extract_best_plan(&nodes);
        let root = nodes[ROOT].clone();
        let estimated_value = root.q_value();

        log::debug!(
            "MCTS planned {} actions from {} simulations in {:?} (estimated_value={:.3})",
            actions.len(),
            self.config.simulations,
            start.elapsed(),
            estimated_value,
        );

        PlanResult {
            actions,
            estimated_value,
            simulations_run: self.config.simulations,
            root,
            nodes,
        }
    }

    /// Candidates ranked by prior, pruned to `top_k_actions`. The *first* unexpanded
    /// candidate in this order is always the one picked for expansion, which is also the
    /// highest-prior unexpanded one since this list is already prior-sorted.
    fn candidate_actions(&self, state: &DOMState) -> Vec<Action> {
        let mut actions = self.action_generator.enumerate(state);
        actions.sort_by(|a, b| {
            self.prior_policy
                .score(state, b)
                .partial_cmp(&self.prior_policy.score(state, a))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        actions.truncate(self.config.top_k_actions);
        actions
    }

    /// PUCT argmax among `nodes[node_index].children`. Ties are broken by the `BTreeMap`'s
    /// canonical-form iteration order, which is deterministic within and across runs.
    fn select_child(&self, nodes: &[TreeNode], node_index: usize) -> usize {
        let parent = &nodes[node_index];
        let parent_visits = parent.visits.max(1) as f64;

        let mut best_index = None;
        let mut best_score = f64::NEG_INFINITY;
        for &child_index in parent.children.values() {
            let child = &nodes[child_index];
            let exploration = self.config.exploration_constant
                * child.prior
                * parent_visits.sqrt()
                / (1.0 + child.visits as f64);
            let score = child.q_value() + exploration;
            if score > best_score {
                best_score = score;
                best_index = Some(child_index);
            }
        }
        best_index.expect("cannot select a child from a leaf node")
    }

    /// Greedy, on-policy rollout from `sim_env` at `depth`, scored by the reward model.
    fn rollout(&self, sim_env: &mut dyn Environment, depth: usize) -> f64 {
        let mut total = 0.0;
        let mut discount = 1.0;
        let mut current_depth = depth;

        while !sim_env.is_terminal() && current_depth < self.config.rollout_depth {
            let state = sim_env.observe();
            let candidates = self.candidate_actions(&state);
            let Some(action) = candidates.into_iter().next() else {
                break;
            };

            let next_state = sim_env.apply(&action);
            let breakdown = self.reward_model.evaluate(
                &state,
                &action,
                &next_state,
                sim_env.is_terminal(),
                sim_env.is_success(),
            );
            total += discount * breakdown.total;
            discount *= self.config.discount;
            current_depth += 1;
        }

        total
    }

    /// Walk `path` leaf-to-root: each node's `visits` and `value_sum` are updated, and the
    /// credited value is discounted by one more `discount` factor per level toward the
    /// root.
    fn backpropagate(&self, nodes: &mut [TreeNode], path: &[usize], value: f64) {
        let mut running = value;
        for &index in path.iter().rev() {
            let node = &mut nodes[index];
            node.visits += 1;
            node.value_sum += running;
            running *= self.config.discount;
        }
    }

    /// Descend from the root up to `rollout_depth` steps, choosing the child maximizing
    /// `(visits, q_value)` at each step.
    fn extract_best_plan(&self, nodes: &[TreeNode]) -> Vec<Action> {
        let mut plan = Vec::new();
        let mut node_index = 0usize;

        for _ in 0..self.config.rollout_depth {
            let node = &nodes[node_index];
            if node.children.is_empty() {
                break;
            }
            let best_index = *node
                .children
                .values()
                .max_by(|&&a, &&b| {
                    let node_a = &nodes[a];
                    let node_b = &nodes[b];
                    node_a
                        .visits
                        .cmp(&node_b.visits)
                        .then(
                            node_a
                                .q_value()
                                .partial_cmp(&node_b.q_value())
                                .unwrap_or(std::cmp::Ordering::Equal),
                        )
                })
                .unwrap();
            let Some(action) = nodes[best_index].action_from_parent.clone() else {
                break;
            };
            plan.push(action);
            node_index = best_index;
        }

        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::MockBrowserEnv;

    fn planner(config: MCTSConfig) -> MCTSPlanner {
        MCTSPlanner::new(
            ActionGenerator::new("seed"),
            RewardModel::new(),
            PriorPolicy::new(),
            config,
        )
    }

    #[test]
    fn first_plan_action_is_never_destructive() {
        let p = planner(MCTSConfig {
            simulations: 60,
            rollout_depth: 5,
            top_k_actions: 8,
            ..MCTSConfig::default()
        });
        let env = MockBrowserEnv::default();
        let plan = p.plan(&env);
        assert!(!plan.actions.is_empty());
        assert_ne!(plan.actions[0].canonical(), "click:n_cancel:_:destructive=true");
    }

    #[test]
    fn visit_accounting_respects_the_simulation_budget() {
        let config = MCTSConfig {
            simulations: 40,
            ..MCTSConfig::default()
        };
        let p = planner(config);
        let env = MockBrowserEnv::default();
        let plan = p.plan(&env);

        let child_visits: u32 = plan
            .root
            .children
            .values()
            .map(|&index| plan.nodes[index].visits)
            .sum();
        assert!(child_visits <= plan.root.visits);
        assert!(plan.root.visits as usize <= config.simulations);
    }

    #[test]
    fn zero_simulations_yields_empty_plan_without_touching_env() {
        let p = planner(MCTSConfig {
            simulations: 0,
            ..MCTSConfig::default()
        });
        let env = MockBrowserEnv::default();
        let plan = p.plan(&env);
        assert!(plan.actions.is_empty());
        assert_eq!(plan.estimated_value, 0.0);
    }

    #[test]
    fn zero_top_k_yields_no_candidates_and_empty_plan() {
        let p = planner(MCTSConfig {
            simulations: 10,
            top_k_actions: 0,
            ..MCTSConfig::default()
        });
        let env = MockBrowserEnv::default();
        let plan = p.plan(&env);
        assert!(plan.actions.is_empty());
    }

    #[test]
    fn zero_rollout_depth_backs_up_zero_value_every_simulation() {
        let p = planner(MCTSConfig {
            simulations: 10,
            rollout_depth: 0,
            ..MCTSConfig::default()
        });
        let env = MockBrowserEnv::default();
        let plan = p.plan(&env);
        assert!(plan.actions.is_empty());
        assert_eq!(plan.estimated_value, 0.0);
    }
}
