//! XY mixer for cardinality constraints

use super::Mixer;
use vqo_circuits::{Op, Param};

/// XY mixer preserving the Hamming weight of the state
///
/// Suitable for fixed-sum constraints `sum x_i = k`: the pairwise XX+YY
/// blocks exchange excitations between qubits without creating or
/// destroying them.
pub struct CardinalityMixer;

impl Mixer for CardinalityMixer {
    fn name(&self) -> &'static str {
        "cardinality"
    }

    fn generate(&self, n_qubits: usize, theta: usize) -> Vec<Op> {
        let mut ops = Vec::new();
        for i in 0..n_qubits {
            for j in (i + 1)..n_qubits {
                ops.extend([
                    Op::H(i),
                    Op::H(j),
                    Op::Cx(i, j),
                    Op::Rz(Param::theta(theta), j),
                    Op::Cx(i, j),
                    Op::H(i),
                    Op::H(j),
                ]);
            }
        }
        ops
    }
}
