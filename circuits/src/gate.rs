//! Gate operations of the emitted dialect
//!
//! The op set is exactly what the adapters' gate dialect carries: `h`, `x`,
//! `rx`, `ry`, `rz`, `cx` (also spelled `cnot`), `swap`, `sdg` and the final
//! per-qubit measurement.

use crate::Param;
use serde::{Deserialize, Serialize};

/// A single gate-level operation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Op {
    H(usize),
    X(usize),
    Sdg(usize),
    Rx(Param, usize),
    Ry(Param, usize),
    Rz(Param, usize),
    Cx(usize, usize),
    Swap(usize, usize),
    Measure { qubit: usize, clbit: usize },
}

impl Op {
    /// Lower-case dialect name of the gate
    pub fn name(&self) -> &'static str {
        match self {
            Op::H(_) => "h",
            Op::X(_) => "x",
            Op::Sdg(_) => "sdg",
            Op::Rx(..) => "rx",
            Op::Ry(..) => "ry",
            Op::Rz(..) => "rz",
            Op::Cx(..) => "cx",
            Op::Swap(..) => "swap",
            Op::Measure { .. } => "measure",
        }
    }

    /// Qubits the operation touches
    pub fn qubits(&self) -> Vec<usize> {
        match *self {
            Op::H(q) | Op::X(q) | Op::Sdg(q) => vec![q],
            Op::Rx(_, q) | Op::Ry(_, q) | Op::Rz(_, q) => vec![q],
            Op::Cx(a, b) | Op::Swap(a, b) => vec![a, b],
            Op::Measure { qubit, .. } => vec![qubit],
        }
    }

    /// Rotation parameter, if the gate has one
    pub fn param(&self) -> Option<Param> {
        match *self {
            Op::Rx(p, _) | Op::Ry(p, _) | Op::Rz(p, _) => Some(p),
            _ => None,
        }
    }

    /// Apply a mapping to the rotation parameter
    pub fn map_param(self, f: impl FnOnce(Param) -> Param) -> Op {
        match self {
            Op::Rx(p, q) => Op::Rx(f(p), q),
            Op::Ry(p, q) => Op::Ry(f(p), q),
            Op::Rz(p, q) => Op::Rz(f(p), q),
            other => other,
        }
    }

    pub fn is_measurement(&self) -> bool {
        matches!(self, Op::Measure { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubits() {
        assert_eq!(Op::Cx(0, 2).qubits(), vec![0, 2]);
        assert_eq!(Op::Rz(Param::theta(0), 1).qubits(), vec![1]);
    }

    #[test]
    fn test_map_param_only_touches_rotations() {
        let op = Op::Cx(0, 1).map_param(|_| Param::Value(9.0));
        assert_eq!(op, Op::Cx(0, 1));

        let op = Op::Ry(Param::theta(2), 0).map_param(|p| p.bind(&[0.0, 0.0, 1.5]));
        assert_eq!(op, Op::Ry(Param::Value(1.5), 0));
    }
}
