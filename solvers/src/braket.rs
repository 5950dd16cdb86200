//! Braket-style gate adapter
//!
//! The Braket dialect spells `cx` as `cnot`; the parser accepts both, so
//! `parse_input` only needs the header. Backends are either the local
//! simulator or a device addressed by its ARN through the registry.

use crate::device::{DeviceRegistry, LocalRegistry, QuantumDevice};
use crate::error::{Result, SolverError};
use crate::solver::{reverse_bit_order, Solver};
use crate::Counts;
use std::collections::HashMap;
use std::sync::Arc;
use vqo_circuits::{qasm, Circuit};

/// Adapter for a Braket-style gate provider
pub struct BraketSolver {
    shots: u64,
    backend: String,
    /// Provider-specific execution parameters, passed through opaque
    #[allow(dead_code)]
    device_parameters: HashMap<String, serde_json::Value>,
    registry: Arc<dyn DeviceRegistry>,
}

impl BraketSolver {
    pub fn new(
        shots: u64,
        backend: String,
        device_parameters: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self::with_registry(
            shots,
            backend,
            device_parameters,
            Arc::new(LocalRegistry::default()),
        )
    }

    pub fn with_registry(
        shots: u64,
        backend: String,
        device_parameters: HashMap<String, serde_json::Value>,
        registry: Arc<dyn DeviceRegistry>,
    ) -> Self {
        Self {
            shots,
            backend,
            device_parameters,
            registry,
        }
    }

    /// Serialize a circuit in the Braket spelling (`cnot` for `cx`)
    pub fn program_source(circuit: &Circuit) -> String {
        qasm::with_header(&qasm::serialize(circuit, qasm::ParamDecls::Omit))
            .replace("cx ", "cnot ")
    }
}

impl Solver for BraketSolver {
    fn shots(&self) -> u64 {
        self.shots
    }

    fn parse_input(&self, program: &str) -> Result<Circuit> {
        Ok(qasm::parse(&qasm::with_header(program))?)
    }

    fn parse_response(&self, counts: Counts) -> Counts {
        reverse_bit_order(counts)
    }

    fn select_backend(&self, _num_qubits: usize) -> Result<Arc<dyn QuantumDevice>> {
        if self.backend == "simulator" {
            return self
                .registry
                .lookup("simulator")
                .ok_or_else(|| SolverError::UnknownBackend("simulator".to_string()));
        }
        // Device ARNs are looked up verbatim
        self.registry
            .lookup(&self.backend)
            .ok_or_else(|| SolverError::UnknownBackend(self.backend.clone()))
    }
}
