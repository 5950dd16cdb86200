//! Decision variables

use serde::{Deserialize, Serialize};

/// Kind of a decision variable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum VarKind {
    /// Binary variable in {0, 1}
    Binary,
    /// Bounded integer variable; an open upper bound cannot be QUBO-encoded
    Integer { lower: i64, upper: Option<i64> },
    /// Continuous variable; never QUBO-encoded
    Continuous { lower: f64, upper: f64 },
}

impl VarKind {
    pub fn is_binary(&self) -> bool {
        matches!(self, VarKind::Binary)
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, VarKind::Integer { .. })
    }

    pub fn is_continuous(&self) -> bool {
        matches!(self, VarKind::Continuous { .. })
    }

    /// Lowest value the variable can take
    pub fn lower_bound(&self) -> f64 {
        match self {
            VarKind::Binary => 0.0,
            VarKind::Integer { lower, .. } => *lower as f64,
            VarKind::Continuous { lower, .. } => *lower,
        }
    }

    /// Highest value the variable can take, if bounded
    pub fn upper_bound(&self) -> Option<f64> {
        match self {
            VarKind::Binary => Some(1.0),
            VarKind::Integer { upper, .. } => upper.map(|u| u as f64),
            VarKind::Continuous { upper, .. } => Some(*upper),
        }
    }
}

/// A named decision variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    /// Variable name, unique within a model
    pub name: String,
    /// Variable kind
    pub kind: VarKind,
}

impl Variable {
    pub fn binary(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: VarKind::Binary }
    }

    pub fn integer(name: impl Into<String>, lower: i64, upper: i64) -> Self {
        Self {
            name: name.into(),
            kind: VarKind::Integer { lower, upper: Some(upper) },
        }
    }

    pub fn continuous(name: impl Into<String>, lower: f64, upper: f64) -> Self {
        Self {
            name: name.into(),
            kind: VarKind::Continuous { lower, upper },
        }
    }
}
