//! Classical optimizers for the outer loop
//!
//! All three named optimizers are derivative-free, which is what shot-noisy
//! cost functions call for. The cost callable is fallible: a failed adapter
//! call aborts the minimization and propagates.

mod cobyla;
mod nelder_mead;
mod spsa;

pub use cobyla::Cobyla;
pub use nelder_mead::NelderMead;
pub use spsa::Spsa;

use crate::error::{EngineError, Result};

/// A fallible objective function
pub type CostFn<'a> = dyn FnMut(&[f64]) -> Result<f64> + 'a;

/// Outcome of a minimization
#[derive(Debug, Clone)]
pub struct OptimizeResult {
    /// Best point seen
    pub x: Vec<f64>,
    /// Objective at the best point
    pub fun: f64,
    /// Function evaluations spent
    pub evaluations: usize,
    /// Whether the tolerance was reached before the evaluation budget
    pub converged: bool,
}

/// A classical minimizer over a fallible objective
///
/// `max_iter` bounds the number of objective evaluations. Convergence
/// failure is not an error; the best point seen is still returned.
pub trait Optimizer: Send + Sync {
    fn minimize(
        &self,
        f: &mut CostFn<'_>,
        x0: &[f64],
        tol: f64,
        max_iter: usize,
    ) -> Result<OptimizeResult>;
}

/// The closed set of named optimizers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizerKind {
    Cobyla,
    NelderMead,
    Spsa,
}

/// Accepted optimizer names
pub const ALLOWED_OPTIMIZERS: &[&str] = &["cobyla", "nelder-mead", "spsa"];

impl std::str::FromStr for OptimizerKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "cobyla" => Ok(OptimizerKind::Cobyla),
            "nelder-mead" => Ok(OptimizerKind::NelderMead),
            "spsa" => Ok(OptimizerKind::Spsa),
            other => Err(EngineError::InvalidConfig(format!(
                "invalid optimizer '{}', must be one of {:?} or a custom implementation",
                other, ALLOWED_OPTIMIZERS
            ))),
        }
    }
}

impl OptimizerKind {
    /// Construct the optimizer; `seed` feeds the stochastic ones
    pub fn build(self, seed: u64) -> Box<dyn Optimizer> {
        match self {
            OptimizerKind::Cobyla => Box::new(Cobyla::default()),
            OptimizerKind::NelderMead => Box::new(NelderMead::default()),
            OptimizerKind::Spsa => Box::new(Spsa::with_seed(seed)),
        }
    }
}
