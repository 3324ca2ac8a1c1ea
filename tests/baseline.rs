//! End-to-end scenarios S1–S6 (spec §8) against the reference mock form environment.

use dom_mcts_planner::{
    ActionGenerator, AgentRunner, Environment, MCTSConfig, MCTSPlanner, MockBrowserEnv,
    PriorPolicy, RewardModel,
};

fn planner(config: MCTSConfig) -> MCTSPlanner {
    MCTSPlanner::new(
        ActionGenerator::new("seed"),
        RewardModel::new(),
        PriorPolicy::new(),
        config,
    )
}

fn reference_config() -> MCTSConfig {
    MCTSConfig {
        simulations: 60,
        rollout_depth: 5,
        top_k_actions: 8,
        ..MCTSConfig::default()
    }
}

#[test]
fn s1_action_set_contains_the_expected_candidates() {
    let env = MockBrowserEnv::default();
    let generator = ActionGenerator::new("seed");
    let actions = generator.enumerate(&env.observe());
    let canonical: std::collections::BTreeSet<String> =
        actions.iter().map(|a| a.canonical()).collect();

    assert!(canonical.contains("type:n_name:name_text:"));
    assert!(canonical.contains("type:n_email:email_text:"));
    assert!(canonical.contains("click:n_submit:_:"));
    assert!(canonical.contains("click:n_cancel:_:destructive=true"));
    assert!(canonical.contains("scroll:viewport:300:"));
}

#[test]
fn s2_first_move_is_safe() {
    let planner = planner(reference_config());
    let env = MockBrowserEnv::default();
    let plan = planner.plan(&env);
    assert_ne!(
        plan.actions[0].canonical(),
        "click:n_cancel:_:destructive=true"
    );
}

#[test]
fn s3_solves_the_form() {
    let planner = planner(reference_config());
    let mut runner = AgentRunner::new(planner, 1);
    let mut env = MockBrowserEnv::default();
    let result = runner.run_episode(&mut env, 10);
    assert!(result.success);
    assert!(result.steps >= 1);
}

#[test]
fn s4_submit_before_fill_is_penalized() {
    let policy = PriorPolicy::new();
    let env = MockBrowserEnv::default();
    let state = env.observe();

    let submit = dom_mcts_planner::Action::new(dom_mcts_planner::ActionType::Click)
        .with_node("n_submit");
    let type_name = dom_mcts_planner::Action::new(dom_mcts_planner::ActionType::Type)
        .with_node("n_name")
        .with_value("x_text");

    assert!(policy.score(&state, &submit) < policy.score(&state, &type_name));
}

#[test]
fn s5_reward_for_filling_a_new_required_field() {
    let model = RewardModel::new();
    let mut prev = dom_mcts_planner::DOMState::new("https://mock.local/form");
    prev.metadata.insert("filled:n_name".into(), "false".into());
    let mut next = dom_mcts_planner::DOMState::new("https://mock.local/form");
    next.metadata.insert("filled:n_name".into(), "true".into());

    let action = dom_mcts_planner::Action::new(dom_mcts_planner::ActionType::Type)
        .with_node("n_name")
        .with_value("x_text");
    let breakdown = model.evaluate(&prev, &action, &next, false, false);

    assert!(breakdown.progress >= 0.70);
    assert_eq!(breakdown.risk, 0.0);
    assert_eq!(breakdown.efficiency, -0.02);
    assert_eq!(breakdown.terminal, 0.0);
}

#[test]
fn s6_destructive_click_incurs_risk_penalty() {
    let model = RewardModel::new();
    let prev = dom_mcts_planner::DOMState::new("https://mock.local/form");
    let next = dom_mcts_planner::DOMState::new("https://mock.local/form");
    let action = dom_mcts_planner::Action::new(dom_mcts_planner::ActionType::Click)
        .with_node("n_cancel")
        .with_metadata("destructive", "true");
    let breakdown = model.evaluate(&prev, &action, &next, false, false);
    assert_eq!(breakdown.risk, -0.80);
}

#[test]
fn clone_independence_holds_across_many_steps() {
    let mut env = MockBrowserEnv::default();
    let baseline = env.observe();
    let mut cloned: Box<dyn Environment> = env.clone_env();
    cloned.apply(
        &dom_mcts_planner::Action::new(dom_mcts_planner::ActionType::Type)
            .with_node("n_name")
            .with_value("mutated"),
    );
    assert_eq!(env.observe(), baseline);
}

#[test]
fn simulations_zero_never_applies_to_the_env() {
    let planner = planner(MCTSConfig {
        simulations: 0,
        ..MCTSConfig::default()
    });
    let env = MockBrowserEnv::default();
    let before = env.observe();
    let plan = planner.plan(&env);
    assert!(plan.actions.is_empty());
    assert_eq!(env.observe(), before);
}
