//! Backend sampling sessions
//!
//! A session pins one backend for a whole optimization run: the
//! parameterized circuit is transpiled once, and each iteration binds a
//! numeric parameter vector through the backend's parameter-bind API. The
//! transpiled circuit is never mutated; binding produces a fresh circuit
//! per call.

use crate::device::QuantumDevice;
use crate::error::Result;
use crate::Counts;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;
use vqo_circuits::Circuit;

/// A sampling session bound to one backend
pub struct SamplerSession {
    id: Uuid,
    backend: Arc<dyn QuantumDevice>,
    shots: u64,
    opened_at: DateTime<Utc>,
}

impl SamplerSession {
    pub fn open(backend: Arc<dyn QuantumDevice>, shots: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            backend,
            shots,
            opened_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn backend(&self) -> &dyn QuantumDevice {
        self.backend.as_ref()
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Bind numeric parameters to the transpiled circuit and run it
    ///
    /// The template stays untouched; the bound circuit is dropped after the
    /// run. Counts come back in vendor order.
    pub fn bind_and_run(&self, transpiled: &Circuit, params: &[f64]) -> Result<Counts> {
        let bound = transpiled.bind(params)?;
        self.backend.run(&bound, self.shots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::LocalSimulator;
    use vqo_circuits::Param;

    #[test]
    fn test_bind_and_run_leaves_template_parameterized() {
        let template = Circuit::new(1).ry(Param::theta(0), 0).measure_all();
        let session = SamplerSession::open(Arc::new(LocalSimulator::with_seed(5)), 32);

        let counts = session
            .bind_and_run(&template, &[std::f64::consts::PI])
            .unwrap();
        assert_eq!(counts.get("1"), Some(&32));
        assert!(template.has_unbound_params());

        // Different parameters, same template
        let counts = session.bind_and_run(&template, &[0.0]).unwrap();
        assert_eq!(counts.get("0"), Some(&32));
    }

    #[test]
    fn test_session_identity() {
        let backend: Arc<dyn QuantumDevice> = Arc::new(LocalSimulator::with_seed(1));
        let a = SamplerSession::open(backend.clone(), 8);
        let b = SamplerSession::open(backend, 8);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.backend().name(), "simulator");
    }
}
