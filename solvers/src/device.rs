//! Backend device abstraction
//!
//! Remote QPU clients live outside this crate; they enter through
//! [`QuantumDevice`] and are discovered through a [`DeviceRegistry`]. The
//! local simulator is one such device.

use crate::error::Result;
use crate::simulator::LocalSimulator;
use crate::Counts;
use std::sync::Arc;
use vqo_circuits::Circuit;

/// A gate-based execution backend
///
/// `run` returns counts keyed most-significant classical bit first; the
/// adapters normalize to the little-endian convention.
pub trait QuantumDevice: Send + Sync {
    fn name(&self) -> &str;

    /// Qubit capacity of the device
    fn num_qubits(&self) -> usize;

    /// Queue depth, used for least-busy selection
    fn pending_jobs(&self) -> usize {
        0
    }

    /// Gate names the device executes natively
    fn native_gates(&self) -> &[&'static str];

    /// Execute a fully bound circuit for `shots` repetitions
    fn run(&self, circuit: &Circuit, shots: u64) -> Result<Counts>;
}

/// A catalogue of available devices for one provider
pub trait DeviceRegistry: Send + Sync {
    fn devices(&self) -> Vec<Arc<dyn QuantumDevice>>;

    /// Look a device up by name
    fn lookup(&self, name: &str) -> Option<Arc<dyn QuantumDevice>> {
        self.devices().into_iter().find(|d| d.name() == name)
    }

    /// Least-busy device with at least `min_qubits` qubits
    fn least_busy(&self, min_qubits: usize) -> Option<Arc<dyn QuantumDevice>> {
        self.devices()
            .into_iter()
            .filter(|d| d.num_qubits() >= min_qubits)
            .min_by_key(|d| d.pending_jobs())
    }
}

/// Registry holding locally constructed devices
///
/// The default catalogue contains only the state-vector simulator.
pub struct LocalRegistry {
    devices: Vec<Arc<dyn QuantumDevice>>,
}

impl LocalRegistry {
    pub fn new(devices: Vec<Arc<dyn QuantumDevice>>) -> Self {
        Self { devices }
    }

    /// Registry with a seeded local simulator
    pub fn with_simulator(seed: u64) -> Self {
        Self::new(vec![Arc::new(LocalSimulator::with_seed(seed))])
    }
}

impl Default for LocalRegistry {
    fn default() -> Self {
        Self::new(vec![Arc::new(LocalSimulator::new())])
    }
}

impl DeviceRegistry for LocalRegistry {
    fn devices(&self) -> Vec<Arc<dyn QuantumDevice>> {
        self.devices.clone()
    }
}
