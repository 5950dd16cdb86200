//! Error types for variational algorithms

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlgorithmError {
    #[error("algorithm not supported: {0}")]
    UnsupportedAlgorithm(String),

    #[error("unknown ansatz: {0}")]
    UnknownAnsatz(String),

    #[error(transparent)]
    Model(#[from] vqo_model::ModelError),

    #[error(transparent)]
    Circuit(#[from] vqo_circuits::CircuitError),
}

pub type Result<T> = std::result::Result<T, AlgorithmError>;
