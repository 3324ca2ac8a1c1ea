use thiserror::Error;

/// Top-level error type for the planner's boundaries.
///
/// The core (action enumeration, scoring, reward, search) is pure and total: it never
/// returns a `Result`. Fallibility only enters where untrusted data crosses into the
/// crate — decoding a raw snapshot, or loading planner settings from a config source.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlannerError {
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors decoding a raw DOM snapshot into a [`crate::dom::DOMState`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SnapshotError {
    #[error("snapshot is not a JSON object")]
    NotAnObject,

    #[error("node at index {index} is not a JSON object")]
    NodeNotAnObject { index: usize },

    #[error("failed to parse snapshot JSON: {details}")]
    InvalidJson { details: String },
}

/// Errors loading [`crate::config::PlannerSettings`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("failed to parse planner settings JSON: {details}")]
    InvalidJson { details: String },

    #[error("failed to read planner settings from {path}: {details}")]
    ReadFailed { path: String, details: String },

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
}

pub type PlannerResult<T> = Result<T, PlannerError>;
