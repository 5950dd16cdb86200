//! Standard X-mixer

use super::Mixer;
use vqo_circuits::{Op, Param};

/// The default transverse-field mixer: `Rx(2θ)` on every qubit
///
/// Explores the full state space; used for unconstrained problems.
pub struct StandardMixer;

impl Mixer for StandardMixer {
    fn name(&self) -> &'static str {
        "standard"
    }

    fn generate(&self, n_qubits: usize, theta: usize) -> Vec<Op> {
        (0..n_qubits)
            .map(|i| Op::Rx(Param::scaled(2.0, theta), i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_rx_per_qubit() {
        let ops = StandardMixer.generate(4, 1);
        assert_eq!(ops.len(), 4);
        for (i, op) in ops.iter().enumerate() {
            assert_eq!(*op, Op::Rx(Param::scaled(2.0, 1), i));
        }
    }
}
