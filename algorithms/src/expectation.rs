//! Pauli-basis expectation values from measurement counts
//!
//! To estimate ⟨P⟩ for a Pauli string P, the state-preparation circuit is
//! extended with basis rotations (H for X, S†H for Y) and measured in the
//! computational basis; the expectation is the parity-weighted average of
//! the observed bitstrings.

use crate::Result;
use std::collections::HashMap;
use vqo_circuits::{Circuit, Op};

/// Append the pre-measurement basis rotations for a Pauli string
///
/// `basis` holds one of `I`, `X`, `Y`, `Z` per qubit; `I` and `Z` need no
/// rotation.
pub fn basis_rotation(mut circuit: Circuit, basis: &str) -> Result<Circuit> {
    for (qubit, base) in basis.chars().enumerate() {
        match base {
            'I' | 'Z' => {}
            'X' => {
                circuit.push(Op::H(qubit))?;
            }
            'Y' => {
                circuit.push(Op::Sdg(qubit))?;
                circuit.push(Op::H(qubit))?;
            }
            other => {
                return Err(vqo_circuits::CircuitError::ParseError(format!(
                    "unknown Pauli basis '{}'",
                    other
                ))
                .into())
            }
        }
    }
    Ok(circuit)
}

/// Parity-weighted expectation of a Pauli string from counts
///
/// Bitstrings are little-endian in the classical register index; positions
/// where the basis is `I` do not contribute to the parity.
pub fn expectation_from_counts(
    counts: &HashMap<String, u64>,
    basis: &str,
    shots: u64,
) -> f64 {
    let mut total = 0.0;
    for (bitstring, &count) in counts {
        let parity: u32 = bitstring
            .chars()
            .zip(basis.chars())
            .filter(|&(bit, base)| base != 'I' && bit == '1')
            .count() as u32;
        let sign = if parity % 2 == 0 { 1.0 } else { -1.0 };
        total += sign * count as f64;
    }
    total / shots as f64
}
