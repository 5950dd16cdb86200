//! Gate parameters - numeric constants and named placeholders
//!
//! A rotation angle is either a bound numeric value or a reference to an
//! outer-loop parameter `theta<k>`, optionally scaled by a constant factor
//! (the standard mixer uses `2 * theta<k>`).

use serde::{Deserialize, Serialize};

/// A scalar gate parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Param {
    /// A bound numeric angle
    Value(f64),
    /// `scale * theta<index>`
    Theta { index: usize, scale: f64 },
}

impl Param {
    /// Bare placeholder `theta<index>`
    pub fn theta(index: usize) -> Self {
        Param::Theta { index, scale: 1.0 }
    }

    /// Scaled placeholder `scale * theta<index>`
    pub fn scaled(scale: f64, index: usize) -> Self {
        Param::Theta { index, scale }
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, Param::Value(_))
    }

    /// Placeholder index, if unbound
    pub fn theta_index(&self) -> Option<usize> {
        match self {
            Param::Theta { index, .. } => Some(*index),
            Param::Value(_) => None,
        }
    }

    /// Resolve against a parameter vector; bound values pass through
    pub fn bind(&self, params: &[f64]) -> Param {
        match *self {
            Param::Value(v) => Param::Value(v),
            Param::Theta { index, scale } => Param::Value(scale * params[index]),
        }
    }
}

impl std::fmt::Display for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Param::Value(v) => write!(f, "{}", v),
            Param::Theta { index, scale } if *scale == 1.0 => write!(f, "theta{}", index),
            Param::Theta { index, scale } => write!(f, "{} * theta{}", scale, index),
        }
    }
}
