// DOM-grounded MCTS planner — core module organization.
//
// Five leaf-first components: the DOM model, the action space, the reward model, the
// prior policy, and the MCTS planner that orchestrates them against an `Environment`.

pub mod actions;
pub mod config;
pub mod dom;
pub mod environment;
pub mod errors;
pub mod eval;
pub mod mcts;
pub mod policy;
pub mod reward;
pub mod runner;
pub mod snapshot;
pub mod trace;

pub use crate::actions::{Action, ActionGenerator, ActionType};
pub use crate::config::PlannerSettings;
pub use crate::dom::{DOMNode, DOMState, RewardBreakdown, TaskSpec};
pub use crate::environment::{Environment, MockBrowserEnv};
pub use crate::errors::{ConfigError, PlannerError, PlannerResult, SnapshotError};
pub use crate::eval::{evaluate_runner, EvalSummary};
pub use crate::mcts::{MCTSConfig, MCTSPlanner, PlanResult, TreeNode};
pub use crate::policy::PriorPolicy;
pub use crate::reward::RewardModel;
pub use crate::runner::{AgentRunner, EpisodeResult};
pub use crate::trace::{TraceEvent, TraceRecorder};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
