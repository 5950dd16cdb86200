//! Engine error taxonomy
//!
//! Every failure of the pipeline converges here; nothing is swallowed. The
//! engine performs no retries - a failed adapter call surfaces as-is and
//! the outer optimizer (or the caller) decides whether to continue.

use thiserror::Error;

/// Engine error types
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Model(#[from] vqo_model::ModelError),

    #[error(transparent)]
    Circuit(#[from] vqo_circuits::CircuitError),

    #[error(transparent)]
    Algorithm(#[from] vqo_algorithms::AlgorithmError),

    #[error(transparent)]
    Solver(#[from] vqo_solvers::SolverError),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, EngineError>;
