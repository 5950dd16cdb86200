//! IBM-style gate adapter
//!
//! Parses the dialect text with the standard header, selects a backend by
//! name (or the least-busy device when none is given), transpiles at the
//! configured optimization level and reverses the vendor bit order. Session
//! mode is provided through [`crate::session::SamplerSession`].

use crate::device::{DeviceRegistry, LocalRegistry, QuantumDevice};
use crate::error::{Result, SolverError};
use crate::session::SamplerSession;
use crate::solver::{reverse_bit_order, Solver};
use crate::Counts;
use std::sync::Arc;
use vqo_circuits::{qasm, Circuit};

/// Adapter for an IBM-style gate provider
pub struct IbmqSolver {
    #[allow(dead_code)]
    token: String,
    shots: u64,
    backend: String,
    optimization_level: u8,
    registry: Arc<dyn DeviceRegistry>,
}

impl IbmqSolver {
    pub fn new(token: String, shots: u64, backend: String, optimization_level: u8) -> Self {
        Self::with_registry(
            token,
            shots,
            backend,
            optimization_level,
            Arc::new(LocalRegistry::default()),
        )
    }

    /// Inject a device catalogue (remote clients, test doubles)
    pub fn with_registry(
        token: String,
        shots: u64,
        backend: String,
        optimization_level: u8,
        registry: Arc<dyn DeviceRegistry>,
    ) -> Self {
        Self {
            token,
            shots,
            backend,
            optimization_level,
            registry,
        }
    }

    pub fn backend(&self) -> &str {
        &self.backend
    }

    /// Open a sampling session bound to an already-selected backend
    pub fn open_session(&self, backend: Arc<dyn QuantumDevice>) -> SamplerSession {
        SamplerSession::open(backend, self.shots)
    }

    /// Transpile a (possibly parameterized) circuit for a backend
    pub fn transpile(
        &self,
        circuit: &Circuit,
        backend: &dyn QuantumDevice,
    ) -> Result<Circuit> {
        crate::transpile::transpile(circuit, backend, self.optimization_level)
    }
}

impl Solver for IbmqSolver {
    fn shots(&self) -> u64 {
        self.shots
    }

    fn optimization_level(&self) -> u8 {
        self.optimization_level
    }

    fn parse_input(&self, program: &str) -> Result<Circuit> {
        Ok(qasm::parse(&qasm::with_header(program))?)
    }

    fn parse_response(&self, counts: Counts) -> Counts {
        reverse_bit_order(counts)
    }

    fn select_backend(&self, num_qubits: usize) -> Result<Arc<dyn QuantumDevice>> {
        match self.backend.as_str() {
            "" => self
                .registry
                .least_busy(num_qubits)
                .ok_or_else(|| {
                    SolverError::UnknownBackend(format!(
                        "no device with at least {} qubits",
                        num_qubits
                    ))
                }),
            name => self
                .registry
                .lookup(name)
                .ok_or_else(|| SolverError::UnknownBackend(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::LocalRegistry;

    fn solver() -> IbmqSolver {
        IbmqSolver::with_registry(
            "token".into(),
            256,
            "simulator".into(),
            1,
            Arc::new(LocalRegistry::with_simulator(7)),
        )
    }

    #[test]
    fn test_solve_pipeline() {
        // |1> on qubit 0: little-endian keys put c[0] first
        let program = "qreg q[2];\ncreg c[2];\nx q[0];\nmeasure q[0] -> c[0];\nmeasure q[1] -> c[1];\n";
        let counts = solver().solve(program).unwrap();
        assert_eq!(counts.get("10"), Some(&256));
    }

    #[test]
    fn test_unknown_backend() {
        let solver = IbmqSolver::with_registry(
            "token".into(),
            16,
            "ibm_sherbrooke".into(),
            1,
            Arc::new(LocalRegistry::with_simulator(1)),
        );
        assert!(matches!(
            solver.select_backend(2),
            Err(SolverError::UnknownBackend(_))
        ));
    }

    #[test]
    fn test_empty_backend_picks_least_busy() {
        let solver = IbmqSolver::with_registry(
            "token".into(),
            16,
            String::new(),
            1,
            Arc::new(LocalRegistry::with_simulator(1)),
        );
        let device = solver.select_backend(4).unwrap();
        assert_eq!(device.name(), "simulator");
        assert!(solver.select_backend(100).is_err());
    }

    #[test]
    fn test_parse_input_accepts_headerless_text() {
        let circuit = solver()
            .parse_input("qreg q[1];\ncreg c[1];\nh q[0];\nmeasure q[0] -> c[0];\n")
            .unwrap();
        assert_eq!(circuit.num_qubits, 1);
    }
}
