//! Common interface of the gate-based variational algorithms

use crate::Result;
use vqo_circuits::Circuit;
use vqo_model::{Qubo, QuboInterpreter};

/// A gate-based variational algorithm
///
/// The circuit template is built once at construction; parameters are
/// substituted on every iteration of the outer loop, always starting from
/// the template.
pub trait Algorithm {
    /// Short algorithm name used in reports ("qaoa", "vqe", ...)
    fn name(&self) -> &'static str;

    /// The parameterized circuit template
    fn circuit(&self) -> &Circuit;

    /// The QUBO this algorithm minimizes
    fn qubo(&self) -> &Qubo;

    /// Interpreter mapping expanded QUBO bits back to model variables
    fn interpreter(&self) -> &QuboInterpreter;

    /// Compile-time parameter count of the circuit
    fn num_params(&self) -> usize {
        self.circuit().num_params()
    }

    /// Bind a parameter vector into a fully numeric circuit
    fn update_params(&self, params: &[f64]) -> Result<Circuit> {
        Ok(self.circuit().bind(params)?)
    }

    /// Starting point of the optimization, uniform in `[0,1)^num_params`
    fn starting_point(&mut self) -> Vec<f64>;
}
