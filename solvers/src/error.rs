//! Error types for solver adapters

use thiserror::Error;

/// Solver error types
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("missing credentials for {0}")]
    MissingCredentials(String),

    #[error("backend execution failed: {0}")]
    BackendExecutionError(String),

    #[error("sampler returned no feasible samples")]
    InfeasibleResult,

    #[error("unknown backend: {0}")]
    UnknownBackend(String),

    #[error("unknown variable '{0}' in quadratic model")]
    UnknownVariable(String),

    #[error(transparent)]
    InvalidProgram(#[from] vqo_circuits::CircuitError),

    #[error(transparent)]
    Model(#[from] vqo_model::ModelError),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, SolverError>;
