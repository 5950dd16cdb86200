//! Chain mixer for inequality-constrained problems

use super::Mixer;
use vqo_circuits::{Op, Param};

/// Heuristic mixer for inequality feasibility
///
/// Entangles each adjacent pair along the register with a ZZ-style rotation,
/// biasing exploration toward small coordinated flips.
pub struct InequalityMixer;

impl Mixer for InequalityMixer {
    fn name(&self) -> &'static str {
        "inequality"
    }

    fn generate(&self, n_qubits: usize, theta: usize) -> Vec<Op> {
        let mut ops = Vec::new();
        for i in 0..n_qubits.saturating_sub(1) {
            ops.extend([
                Op::Cx(i, i + 1),
                Op::Rz(Param::theta(theta), i + 1),
                Op::Cx(i, i + 1),
            ]);
        }
        ops
    }
}
