//! Error types for the model crate

use thiserror::Error;

/// Model error types
#[derive(Error, Debug, Clone)]
pub enum ModelError {
    #[error("variable kind not representable on this path: {0}")]
    UnsupportedVariableKind(String),

    #[error("model cannot be represented as a QUBO: {0}")]
    UnrepresentableModel(String),

    #[error("duplicate constraint label '{0}'")]
    DuplicateConstraintLabel(String),

    #[error("unknown variable '{0}'")]
    UnknownVariable(String),

    #[error("invalid model: {0}")]
    InvalidModel(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ModelError>;
