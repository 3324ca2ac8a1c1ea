//! CLI entry point: build the default planner pipeline, run one episode against the mock
//! form environment, print the outcome, then run a quick multi-episode evaluation.

use clap::Parser;

use dom_mcts_planner::{
    evaluate_runner, ActionGenerator, AgentRunner, MCTSPlanner, MockBrowserEnv, PlannerSettings,
    PriorPolicy, RewardModel, TraceRecorder,
};

#[derive(Debug, Parser)]
#[command(about = "Run the DOM-grounded MCTS planner against the mock form environment")]
struct Cli {
    #[arg(long, default_value_t = PlannerSettings::default().simulations)]
    simulations: usize,

    #[arg(long, default_value_t = PlannerSettings::default().rollout_depth)]
    rollout_depth: usize,

    #[arg(long, default_value_t = PlannerSettings::default().top_k_actions)]
    top_k: usize,

    #[arg(long, default_value_t = 3)]
    episodes: usize,
}

fn build_runner(settings: &PlannerSettings) -> AgentRunner {
    let action_generator = ActionGenerator::new("seed");
    let reward_model = RewardModel::new();
    let prior_policy = PriorPolicy::new();
    let planner = MCTSPlanner::new(
        action_generator,
        reward_model,
        prior_policy,
        settings.mcts_config(),
    );
    AgentRunner::new(planner, settings.execute_prefix).with_trace_recorder(TraceRecorder::new())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let settings = PlannerSettings {
        simulations: cli.simulations,
        rollout_depth: cli.rollout_depth,
        top_k_actions: cli.top_k,
        ..PlannerSettings::default()
    };

    let mut runner = build_runner(&settings);
    let mut env = MockBrowserEnv::default();
    let result = runner.run_episode(&mut env, settings.max_iterations);

    println!("DOM-MCTS baseline run");
    println!("success: {}", result.success);
    println!("steps: {}", result.steps);
    println!("executed actions:");
    for (index, action) in result.executed_actions.iter().enumerate() {
        println!("  {}. {}", index + 1, action.canonical());
    }

    let mut eval_runner = build_runner(&settings);
    let summary = evaluate_runner(&mut eval_runner, MockBrowserEnv::default, cli.episodes);
    println!("\nquick eval:");
    println!("  episodes: {}", summary.episodes);
    println!("  success_rate: {:.2}", summary.success_rate);
    println!("  avg_steps: {:.2}", summary.avg_steps);
}
