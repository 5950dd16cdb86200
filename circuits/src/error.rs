//! Error types for the circuit module

use thiserror::Error;

/// Circuit error types
#[derive(Error, Debug, Clone)]
pub enum CircuitError {
    #[error("invalid qubit index {0}, circuit has {1} qubits")]
    InvalidQubitIndex(usize, usize),

    #[error("invalid classical bit index {0}, circuit has {1} bits")]
    InvalidClbitIndex(usize, usize),

    #[error("circuit expects {expected} parameters, got {actual}")]
    ParameterArityMismatch { expected: usize, actual: usize },

    #[error("unbound parameter '{0}' after substitution")]
    UnboundParameter(String),

    #[error("cannot parse circuit: {0}")]
    ParseError(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CircuitError>;
