//! SWAP-based mixer for partition constraints

use super::Mixer;
use vqo_circuits::{Op, Param};

/// Mixer for equal-bipartition problems
///
/// SWAPs disjoint adjacent pairs (0,1), (2,3), ... and rotates both halves,
/// mixing within the partition structure without changing group sizes.
pub struct PartitionMixer;

impl Mixer for PartitionMixer {
    fn name(&self) -> &'static str {
        "partition"
    }

    fn generate(&self, n_qubits: usize, theta: usize) -> Vec<Op> {
        let mut ops = Vec::new();
        let mut i = 0;
        while i + 1 < n_qubits {
            ops.extend([
                Op::Swap(i, i + 1),
                Op::Rz(Param::theta(theta), i),
                Op::Rz(Param::theta(theta), i + 1),
            ]);
            i += 2;
        }
        ops
    }
}
