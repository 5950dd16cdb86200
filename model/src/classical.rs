//! Delegation hook for classical solving
//!
//! Classical solving belongs to the algebraic modeling front-end; the engine
//! only forwards to an implementation of this trait when
//! `method = classical` is requested.

use crate::error::Result;
use crate::Model;
use std::collections::HashMap;

/// A classical solver supplied by the modeling front-end
pub trait ClassicalSolve {
    /// Solve the model, returning per-variable values and the objective
    fn solve(&self, model: &Model) -> Result<(HashMap<String, f64>, f64)>;
}
