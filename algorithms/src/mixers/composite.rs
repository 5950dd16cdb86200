//! Composition of multiple mixers

use super::Mixer;
use vqo_circuits::Op;

/// Mixer combining several constraint-preserving mixers
///
/// The generated circuit is the concatenation of the component circuits, so
/// the preserved subspace is the intersection of the components' subspaces.
pub struct CompositeMixer {
    mixers: Vec<Box<dyn Mixer>>,
}

impl CompositeMixer {
    pub fn new(mixers: Vec<Box<dyn Mixer>>) -> Self {
        Self { mixers }
    }

    pub fn components(&self) -> impl Iterator<Item = &dyn Mixer> {
        self.mixers.iter().map(|m| m.as_ref())
    }
}

impl Mixer for CompositeMixer {
    fn name(&self) -> &'static str {
        "composite"
    }

    fn generate(&self, n_qubits: usize, theta: usize) -> Vec<Op> {
        self.mixers
            .iter()
            .flat_map(|m| m.generate(n_qubits, theta))
            .collect()
    }
}
