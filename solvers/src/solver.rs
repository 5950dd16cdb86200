//! Gate-based solver interface
//!
//! A solver adapts one provider's gate stack: it parses the dialect text,
//! selects a backend, transpiles, executes and normalizes the histogram to
//! the little-endian bit convention.

use crate::device::QuantumDevice;
use crate::error::Result;
use crate::transpile::transpile;
use crate::Counts;
use std::sync::Arc;
use vqo_circuits::Circuit;

/// Reverse every bitstring key (vendor order -> little-endian)
pub fn reverse_bit_order(counts: Counts) -> Counts {
    counts
        .into_iter()
        .map(|(bits, count)| (bits.chars().rev().collect(), count))
        .collect()
}

/// A gate-based provider adapter
pub trait Solver: Send + Sync {
    /// Shots per execution
    fn shots(&self) -> u64;

    /// Transpiler optimization level
    fn optimization_level(&self) -> u8 {
        1
    }

    /// Parse dialect text (header added if absent) into the circuit IR
    fn parse_input(&self, program: &str) -> Result<Circuit>;

    /// Normalize a vendor histogram to the little-endian convention
    fn parse_response(&self, counts: Counts) -> Counts;

    /// Select the backend for a circuit of `num_qubits` qubits
    fn select_backend(&self, num_qubits: usize) -> Result<Arc<dyn QuantumDevice>>;

    /// Full pipeline: parse, select, transpile, execute, normalize
    fn solve(&self, program: &str) -> Result<Counts> {
        let circuit = self.parse_input(program)?;
        let backend = self.select_backend(circuit.num_qubits)?;
        let transpiled = transpile(&circuit, backend.as_ref(), self.optimization_level())?;
        let raw = backend.run(&transpiled, self.shots())?;
        Ok(self.parse_response(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_bit_order() {
        let counts = Counts::from([("110".to_string(), 7u64)]);
        let reversed = reverse_bit_order(counts);
        assert_eq!(reversed.get("011"), Some(&7));
    }
}
