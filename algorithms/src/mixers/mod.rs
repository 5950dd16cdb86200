//! Constraint-preserving mixer operators for the QAOA framework
//!
//! Each mixer emits a gate subsequence parameterized by a single mixing
//! angle placeholder. A mixer must preserve the feasible subspace its
//! constraint pattern defines.

mod cardinality;
mod composite;
mod factory;
mod inequality;
mod partition;
mod standard;

pub use cardinality::CardinalityMixer;
pub use composite::CompositeMixer;
pub use factory::MixerFactory;
pub use inequality::InequalityMixer;
pub use partition::PartitionMixer;
pub use standard::StandardMixer;

use vqo_circuits::Op;

/// A mixing operator for the QAOA framework
pub trait Mixer: Send + Sync {
    /// Mixer name used in reports and tests
    fn name(&self) -> &'static str;

    /// Emit the mixer sub-circuit on `n_qubits` qubits, parameterized by
    /// the placeholder `theta<theta>`
    fn generate(&self, n_qubits: usize, theta: usize) -> Vec<Op>;
}
