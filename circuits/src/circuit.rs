//! Quantum circuit construction and parameter binding
//!
//! Circuits are ordered op lists over a quantum and a classical register.
//! Parameters stay symbolic (`theta<k>`) in the template; [`Circuit::bind`]
//! produces a fully numeric copy for submission.

use crate::error::{CircuitError, Result};
use crate::{Op, Param};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A parameterized quantum circuit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Number of qubits
    pub num_qubits: usize,
    /// Number of classical bits
    pub num_clbits: usize,
    /// Circuit name
    pub name: String,
    /// Parameter count; grows as ops referencing new placeholders are added
    num_params: usize,
    ops: Vec<Op>,
}

impl Circuit {
    /// Create a new circuit with n qubits and n classical bits
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            num_clbits: num_qubits,
            name: String::from("circuit"),
            num_params: 0,
            ops: Vec::new(),
        }
    }

    /// Create a named circuit
    pub fn with_name(num_qubits: usize, name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::new(num_qubits)
        }
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Compile-time parameter count of the circuit
    pub fn num_params(&self) -> usize {
        self.num_params
    }

    /// Declare the parameter arity explicitly
    ///
    /// The count grows automatically as placeholder-bearing ops are pushed;
    /// this covers templates whose last placeholders happen to go unused
    /// (e.g. a mixer that emits no gates on a one-qubit register).
    pub fn declare_params(&mut self, n: usize) {
        self.num_params = self.num_params.max(n);
    }

    pub fn gate_count(&self) -> usize {
        self.ops.len()
    }

    /// Count ops by dialect name
    pub fn gate_counts(&self) -> HashMap<&'static str, usize> {
        let mut counts = HashMap::new();
        for op in &self.ops {
            *counts.entry(op.name()).or_insert(0) += 1;
        }
        counts
    }

    /// Circuit depth (number of layers)
    pub fn depth(&self) -> usize {
        let mut qubit_layers = vec![0usize; self.num_qubits];
        for op in &self.ops {
            let layer = op
                .qubits()
                .iter()
                .map(|&q| qubit_layers[q])
                .max()
                .unwrap_or(0)
                + 1;
            for q in op.qubits() {
                qubit_layers[q] = layer;
            }
        }
        qubit_layers.into_iter().max().unwrap_or(0)
    }

    /// Add an operation with bounds checking
    pub fn push(&mut self, op: Op) -> Result<&mut Self> {
        for q in op.qubits() {
            if q >= self.num_qubits {
                return Err(CircuitError::InvalidQubitIndex(q, self.num_qubits));
            }
        }
        if let Op::Measure { clbit, .. } = op {
            if clbit >= self.num_clbits {
                return Err(CircuitError::InvalidClbitIndex(clbit, self.num_clbits));
            }
        }
        if let Some(Param::Theta { index, .. }) = op.param() {
            self.num_params = self.num_params.max(index + 1);
        }
        self.ops.push(op);
        Ok(self)
    }

    /// Append all ops of another circuit
    pub fn extend(&mut self, ops: impl IntoIterator<Item = Op>) -> Result<&mut Self> {
        for op in ops {
            self.push(op)?;
        }
        Ok(self)
    }

    // ==================== Fluent gate API ====================

    pub fn h(mut self, qubit: usize) -> Self {
        self.push(Op::H(qubit)).ok();
        self
    }

    pub fn x(mut self, qubit: usize) -> Self {
        self.push(Op::X(qubit)).ok();
        self
    }

    pub fn sdg(mut self, qubit: usize) -> Self {
        self.push(Op::Sdg(qubit)).ok();
        self
    }

    pub fn rx(mut self, angle: Param, qubit: usize) -> Self {
        self.push(Op::Rx(angle, qubit)).ok();
        self
    }

    pub fn ry(mut self, angle: Param, qubit: usize) -> Self {
        self.push(Op::Ry(angle, qubit)).ok();
        self
    }

    pub fn rz(mut self, angle: Param, qubit: usize) -> Self {
        self.push(Op::Rz(angle, qubit)).ok();
        self
    }

    pub fn cx(mut self, control: usize, target: usize) -> Self {
        self.push(Op::Cx(control, target)).ok();
        self
    }

    pub fn swap(mut self, a: usize, b: usize) -> Self {
        self.push(Op::Swap(a, b)).ok();
        self
    }

    /// Apply Hadamard to all qubits
    pub fn h_all(mut self) -> Self {
        for q in 0..self.num_qubits {
            self = self.h(q);
        }
        self
    }

    /// Measure every qubit into its classical bit
    pub fn measure_all(mut self) -> Self {
        for q in 0..self.num_qubits {
            self.push(Op::Measure { qubit: q, clbit: q }).ok();
        }
        self
    }

    // ==================== Parameter binding ====================

    /// Bind the parameter vector, producing a fully numeric circuit
    ///
    /// The template is untouched; re-binding with a different vector always
    /// starts from the symbolic placeholders.
    pub fn bind(&self, params: &[f64]) -> Result<Circuit> {
        if params.len() != self.num_params {
            return Err(CircuitError::ParameterArityMismatch {
                expected: self.num_params,
                actual: params.len(),
            });
        }
        let ops = self
            .ops
            .iter()
            .map(|op| op.map_param(|p| p.bind(params)))
            .collect();
        Ok(Circuit {
            num_qubits: self.num_qubits,
            num_clbits: self.num_clbits,
            name: self.name.clone(),
            num_params: 0,
            ops,
        })
    }

    /// Whether any op still references a placeholder
    pub fn has_unbound_params(&self) -> bool {
        self.ops
            .iter()
            .any(|op| op.param().map(|p| !p.is_bound()).unwrap_or(false))
    }
}

impl std::fmt::Display for Circuit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Circuit '{}' ({} qubits, {} params, depth {})",
            self.name,
            self.num_qubits,
            self.num_params,
            self.depth()
        )?;
        for (i, op) in self.ops.iter().enumerate() {
            writeln!(f, "  {}: {} on {:?}", i, op.name(), op.qubits())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_check() {
        let mut circuit = Circuit::new(2);
        assert!(circuit.push(Op::H(1)).is_ok());
        assert!(matches!(
            circuit.push(Op::H(2)),
            Err(CircuitError::InvalidQubitIndex(2, 2))
        ));
    }

    #[test]
    fn test_param_counting() {
        let circuit = Circuit::new(2)
            .ry(Param::theta(0), 0)
            .rz(Param::theta(3), 1);
        assert_eq!(circuit.num_params(), 4);
    }

    #[test]
    fn test_bind_arity() {
        let circuit = Circuit::new(1).rx(Param::theta(0), 0).rz(Param::theta(1), 0);
        assert!(circuit.bind(&[0.1, 0.2]).is_ok());
        assert!(matches!(
            circuit.bind(&[0.1]),
            Err(CircuitError::ParameterArityMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_bind_from_template() {
        // Re-binding always starts from the template: bind(a) then bind(b)
        // on the template equals a single bind(b).
        let template = Circuit::new(1).rz(Param::scaled(2.0, 0), 0);
        let first = template.bind(&[0.5]).unwrap();
        let second = template.bind(&[0.25]).unwrap();
        assert_eq!(first.ops()[0], Op::Rz(Param::Value(1.0), 0));
        assert_eq!(second.ops()[0], Op::Rz(Param::Value(0.5), 0));
        assert!(!second.has_unbound_params());
    }

    #[test]
    fn test_depth() {
        let circuit = Circuit::new(2).h(0).h(1).cx(0, 1);
        assert_eq!(circuit.depth(), 2);
    }

    #[test]
    fn test_measure_all() {
        let circuit = Circuit::new(3).h_all().measure_all();
        assert_eq!(circuit.gate_counts()["measure"], 3);
        assert_eq!(circuit.gate_counts()["h"], 3);
    }
}
