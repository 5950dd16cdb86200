//! Variational Quantum Eigensolver (VQE)
//!
//! Hardware-efficient ansatz over the QUBO encoding: one Ry rotation per
//! qubit, then per layer and per adjacent pair an entangling block
//! `cx; ry; ry; cx; ry; ry`. Total parameter count `n + 4(n-1)*layers`.

use crate::error::AlgorithmError;
use crate::{Algorithm, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use vqo_circuits::{Circuit, Param};
use vqo_model::{Model, Qubo, QuboEncoder, QuboInterpreter};

/// Ansatz family for VQE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnsatzKind {
    /// Ry rotations with CX entangling blocks over adjacent pairs
    HardwareEfficient,
}

impl Default for AnsatzKind {
    fn default() -> Self {
        AnsatzKind::HardwareEfficient
    }
}

impl std::str::FromStr for AnsatzKind {
    type Err = AlgorithmError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "hardware-efficient" => Ok(AnsatzKind::HardwareEfficient),
            other => Err(AlgorithmError::UnknownAnsatz(other.to_string())),
        }
    }
}

/// VQE over a model's QUBO encoding
pub struct Vqe {
    /// Number of entangling layers
    pub layers: usize,
    ansatz: AnsatzKind,
    qubo: Qubo,
    interpreter: QuboInterpreter,
    circuit: Circuit,
    rng: StdRng,
}

impl Vqe {
    pub fn new(
        model: &Model,
        layers: usize,
        seed: u64,
        penalty: Option<f64>,
        ansatz: Option<AnsatzKind>,
    ) -> Result<Self> {
        let ansatz = ansatz.unwrap_or_default();
        let (qubo, interpreter) = QuboEncoder::with_penalty(penalty).encode(model)?;
        let circuit = Self::build_circuit(&qubo, layers, ansatz);
        Ok(Self {
            layers,
            ansatz,
            qubo,
            interpreter,
            circuit,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn ansatz(&self) -> AnsatzKind {
        self.ansatz
    }

    fn build_circuit(qubo: &Qubo, layers: usize, ansatz: AnsatzKind) -> Circuit {
        let AnsatzKind::HardwareEfficient = ansatz;
        let n = qubo.num_vars();
        let mut circuit = Circuit::with_name(n, "vqe");
        let mut pc = 0usize;
        let next = |pc: &mut usize| {
            let p = Param::theta(*pc);
            *pc += 1;
            p
        };

        for i in 0..n {
            circuit = circuit.ry(next(&mut pc), i);
        }

        for _ in 0..layers {
            for i in 0..n.saturating_sub(1) {
                circuit = circuit
                    .cx(i, i + 1)
                    .ry(next(&mut pc), i)
                    .ry(next(&mut pc), i + 1)
                    .cx(i, i + 1)
                    .ry(next(&mut pc), i)
                    .ry(next(&mut pc), i + 1);
            }
        }

        circuit.measure_all()
    }
}

impl Algorithm for Vqe {
    fn name(&self) -> &'static str {
        "vqe"
    }

    fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    fn qubo(&self) -> &Qubo {
        &self.qubo
    }

    fn interpreter(&self) -> &QuboInterpreter {
        &self.interpreter
    }

    fn starting_point(&mut self) -> Vec<f64> {
        (0..self.num_params()).map(|_| self.rng.gen::<f64>()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vqo_model::linear_sum;

    fn model(n: usize) -> Model {
        let mut model = Model::new("m");
        let vars = model.binary_var_list(n, "x");
        model.minimize(linear_sum(vars.iter().map(|&v| (v, 1.0))));
        model
    }

    #[test]
    fn test_parameter_count() {
        // n + 4 * (n - 1) * layers
        let vqe = Vqe::new(&model(5), 2, 1, None, None).unwrap();
        assert_eq!(vqe.num_params(), 5 + 4 * 4 * 2);
    }

    #[test]
    fn test_ansatz_structure() {
        let vqe = Vqe::new(&model(3), 1, 1, None, None).unwrap();
        let counts = vqe.circuit().gate_counts();
        // 3 initial ry + 2 pairs * 4 ry, 2 pairs * 2 cx
        assert_eq!(counts["ry"], 3 + 8);
        assert_eq!(counts["cx"], 4);
        assert_eq!(counts["measure"], 3);
    }

    #[test]
    fn test_starting_point_matches_arity() {
        let mut vqe = Vqe::new(&model(4), 2, 9, None, None).unwrap();
        let point = vqe.starting_point();
        assert_eq!(point.len(), vqe.num_params());
    }

    #[test]
    fn test_unknown_ansatz_name() {
        let parsed: Result<AnsatzKind> = "uccsd".parse();
        assert!(matches!(parsed, Err(AlgorithmError::UnknownAnsatz(_))));
    }
}
