//! Quantum Approximate Optimization Algorithm (QAOA)
//!
//! Alternating cost and mixing unitaries over the QUBO encoding of the
//! model:
//!
//! |ψ(γ,β)⟩ = U_B(β_p)U_C(γ_p)...U_B(β_1)U_C(γ_1)|+⟩^n
//!
//! Layer ℓ consumes two placeholders: `theta_{2ℓ}` (γ) drives the cost
//! unitary, `theta_{2ℓ+1}` (β) the mixer.

use crate::mixers::Mixer;
use crate::{Algorithm, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vqo_circuits::{Circuit, Param};
use vqo_model::{Model, Qubo, QuboEncoder, QuboInterpreter};

/// QAOA over a model's QUBO encoding with a pluggable mixer
pub struct Qaoa {
    /// Number of layers (p); the circuit carries `2p` parameters
    pub p: usize,
    qubo: Qubo,
    interpreter: QuboInterpreter,
    circuit: Circuit,
    mixer: Box<dyn Mixer>,
    rng: StdRng,
}

impl Qaoa {
    pub fn new(
        model: &Model,
        p: usize,
        seed: u64,
        penalty: Option<f64>,
        mixer: Box<dyn Mixer>,
    ) -> Result<Self> {
        let (qubo, interpreter) = QuboEncoder::with_penalty(penalty).encode(model)?;
        let circuit = Self::build_circuit(&qubo, p, mixer.as_ref())?;
        Ok(Self {
            p,
            qubo,
            interpreter,
            circuit,
            mixer,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Mixer in use, for reports and tests
    pub fn mixer(&self) -> &dyn Mixer {
        self.mixer.as_ref()
    }

    fn build_circuit(qubo: &Qubo, p: usize, mixer: &dyn Mixer) -> Result<Circuit> {
        let n = qubo.num_vars();
        let mut circuit = Circuit::with_name(n, "qaoa").h_all();

        for layer in 0..p {
            let gamma = 2 * layer;
            let beta = 2 * layer + 1;

            // Cost unitary. The row sum folds the quadratic contribution
            // into the linear angle, matching the Ising form of the QUBO.
            for i in 0..n {
                circuit = circuit.rz(Param::scaled(qubo.linear_plus_row_sum(i), gamma), i);
            }
            for i in 0..n {
                for j in (i + 1)..n {
                    let w = qubo.quadratic(i, j);
                    if w != 0.0 {
                        circuit = circuit
                            .cx(i, j)
                            .rz(Param::scaled(w / 2.0, gamma), j)
                            .cx(i, j);
                    }
                }
            }

            // Mixer unitary
            circuit.extend(mixer.generate(n, beta))?;
        }

        circuit.declare_params(2 * p);
        Ok(circuit.measure_all())
    }
}

impl Algorithm for Qaoa {
    fn name(&self) -> &'static str {
        "qaoa"
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
        (0..2 * self.p).map(|_| self.rng.gen::<f64>()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mixers::{CardinalityMixer, StandardMixer};
    use vqo_model::{linear_sum, Comparator};

    fn unconstrained_model(n: usize) -> Model {
        let mut model = Model::new("m");
        let vars = model.binary_var_list(n, "x");
        model.maximize(linear_sum(vars.iter().map(|&v| (v, 1.0))));
        model
    }

    #[test]
    fn test_parameter_count() {
        let model = unconstrained_model(4);
        let qaoa = Qaoa::new(&model, 3, 1, None, Box::new(StandardMixer)).unwrap();
        assert_eq!(qaoa.num_params(), 6);
        assert_eq!(qaoa.circuit().num_qubits, 4);
        assert_eq!(qaoa.circuit().gate_counts()["measure"], 4);
    }

    #[test]
    fn test_starting_point_seeded() {
        let model = unconstrained_model(3);
        let mut a = Qaoa::new(&model, 2, 7, None, Box::new(StandardMixer)).unwrap();
        let mut b = Qaoa::new(&model, 2, 7, None, Box::new(StandardMixer)).unwrap();
        let pa = a.starting_point();
        assert_eq!(pa, b.starting_point());
        assert_eq!(pa.len(), 4);
        assert!(pa.iter().all(|&v| (0.0..1.0).contains(&v)));
    }

    #[test]
    fn test_cost_unitary_layers() {
        let model = unconstrained_model(2);
        let qaoa = Qaoa::new(&model, 1, 1, None, Box::new(StandardMixer)).unwrap();
        let counts = qaoa.circuit().gate_counts();
        // 2 initial h, 2 linear rz, 2 mixer rx, 2 measures; no couplings in
        // an unconstrained linear objective
        assert_eq!(counts["h"], 2);
        assert_eq!(counts["rz"], 2);
        assert_eq!(counts["rx"], 2);
        assert!(!counts.contains_key("cx"));
    }

    #[test]
    fn test_coupling_blocks_from_penalty() {
        let mut model = unconstrained_model(3);
        let sum = linear_sum([(0, 1.0), (1, 1.0), (2, 1.0)]);
        model.constrain("card", sum, Comparator::Equal, 2.0).unwrap();

        let qaoa = Qaoa::new(&model, 1, 1, None, Box::new(CardinalityMixer)).unwrap();
        let counts = qaoa.circuit().gate_counts();
        // Penalty couples all 3 pairs: cx-rz-cx each, plus the XY mixer's
        // pairwise blocks
        assert!(counts["cx"] >= 6);
        assert!(!counts.contains_key("rx"));
    }

    #[test]
    fn test_cost_angles_follow_qubo() {
        use vqo_circuits::Op;

        let mut model = unconstrained_model(2);
        let mut objective = linear_sum([(0, 1.0), (1, 2.0)]);
        objective.add_quadratic(0, 1, 4.0);
        model.minimize(objective);

        let qaoa = Qaoa::new(&model, 1, 1, None, Box::new(StandardMixer)).unwrap();
        let qubo = qaoa.qubo();
        let ops = qaoa.circuit().ops();

        // After the initial Hadamards: rz(gamma * (h_i + row_sum)) per
        // qubit, then cx; rz(gamma * J/2); cx per coupled pair
        assert_eq!(ops[2], Op::Rz(Param::scaled(qubo.linear_plus_row_sum(0), 0), 0));
        assert_eq!(ops[3], Op::Rz(Param::scaled(qubo.linear_plus_row_sum(1), 0), 1));
        assert_eq!(ops[4], Op::Cx(0, 1));
        assert_eq!(ops[5], Op::Rz(Param::scaled(qubo.quadratic(0, 1) / 2.0, 0), 1));
        assert_eq!(ops[6], Op::Cx(0, 1));
        assert_eq!(qubo.quadratic(0, 1), 4.0);
        assert_eq!(qubo.linear_plus_row_sum(0), 5.0);
    }

    #[test]
    fn test_update_params_binds_template() {
        let model = unconstrained_model(2);
        let qaoa = Qaoa::new(&model, 1, 1, None, Box::new(StandardMixer)).unwrap();
        let bound = qaoa.update_params(&[0.3, 0.7]).unwrap();
        assert!(!bound.has_unbound_params());
        assert!(qaoa.circuit().has_unbound_params());
        assert!(qaoa.update_params(&[0.3]).is_err());
    }
}
