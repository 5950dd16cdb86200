//! Circuit-to-backend transpilation
//!
//! Lowers a circuit to the device's native gate set and applies cheap
//! peephole cleanups by optimization level: level 1 drops identity
//! rotations, level 2 also cancels adjacent self-inverse `cx` pairs.

use crate::device::QuantumDevice;
use crate::error::{Result, SolverError};
use vqo_circuits::{Circuit, Op, Param};

/// Transpile a circuit for a device at the given optimization level
pub fn transpile(
    circuit: &Circuit,
    device: &dyn QuantumDevice,
    optimization_level: u8,
) -> Result<Circuit> {
    if circuit.num_qubits > device.num_qubits() {
        return Err(SolverError::BackendExecutionError(format!(
            "circuit needs {} qubits but {} has {}",
            circuit.num_qubits,
            device.name(),
            device.num_qubits()
        )));
    }

    let native = device.native_gates();
    let mut ops: Vec<Op> = Vec::with_capacity(circuit.gate_count());
    for op in circuit.ops() {
        match *op {
            Op::Swap(a, b) if !native.contains(&"swap") => {
                ops.extend([Op::Cx(a, b), Op::Cx(b, a), Op::Cx(a, b)]);
            }
            op => {
                if !native.contains(&op.name()) {
                    return Err(SolverError::BackendExecutionError(format!(
                        "{} does not implement '{}'",
                        device.name(),
                        op.name()
                    )));
                }
                ops.push(op);
            }
        }
    }

    if optimization_level >= 1 {
        ops.retain(|op| match op.param() {
            Some(Param::Value(v)) => v.abs() > 1e-12,
            _ => true,
        });
    }
    if optimization_level >= 2 {
        ops = cancel_adjacent_cx(ops);
    }

    let mut out = Circuit::with_name(circuit.num_qubits, &circuit.name);
    out.num_clbits = circuit.num_clbits;
    out.extend(ops)?;
    out.declare_params(circuit.num_params());
    Ok(out)
}

fn cancel_adjacent_cx(ops: Vec<Op>) -> Vec<Op> {
    let mut out: Vec<Op> = Vec::with_capacity(ops.len());
    for op in ops {
        match (out.last(), &op) {
            (Some(Op::Cx(a, b)), Op::Cx(c, d)) if a == c && b == d => {
                out.pop();
            }
            _ => out.push(op),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::LocalSimulator;

    struct NoSwapDevice;

    impl QuantumDevice for NoSwapDevice {
        fn name(&self) -> &str {
            "no-swap"
        }
        fn num_qubits(&self) -> usize {
            8
        }
        fn native_gates(&self) -> &[&'static str] {
            &["h", "rz", "cx", "measure"]
        }
        fn run(&self, _circuit: &Circuit, _shots: u64) -> Result<crate::Counts> {
            Ok(crate::Counts::new())
        }
    }

    #[test]
    fn test_swap_decomposition() {
        let circuit = Circuit::new(2).swap(0, 1);
        let out = transpile(&circuit, &NoSwapDevice, 0).unwrap();
        assert_eq!(out.ops(), &[Op::Cx(0, 1), Op::Cx(1, 0), Op::Cx(0, 1)]);
    }

    #[test]
    fn test_identity_rotation_dropped() {
        let circuit = Circuit::new(1)
            .rz(Param::Value(0.0), 0)
            .rz(Param::Value(1.5), 0);
        let sim = LocalSimulator::with_seed(1);
        assert_eq!(transpile(&circuit, &sim, 0).unwrap().gate_count(), 2);
        assert_eq!(transpile(&circuit, &sim, 1).unwrap().gate_count(), 1);
    }

    #[test]
    fn test_cx_cancellation() {
        let circuit = Circuit::new(2).cx(0, 1).cx(0, 1).h(0);
        let sim = LocalSimulator::with_seed(1);
        assert_eq!(transpile(&circuit, &sim, 2).unwrap().gate_count(), 1);
    }

    #[test]
    fn test_capacity_check() {
        let circuit = Circuit::new(9).h(0);
        assert!(transpile(&circuit, &NoSwapDevice, 0).is_err());
    }

    #[test]
    fn test_placeholders_survive() {
        let circuit = Circuit::new(1).rz(Param::theta(0), 0);
        let sim = LocalSimulator::with_seed(1);
        let out = transpile(&circuit, &sim, 2).unwrap();
        assert_eq!(out.num_params(), 1);
        assert!(out.has_unbound_params());
    }
}
