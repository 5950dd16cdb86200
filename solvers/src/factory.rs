//! Provider selection and solver construction

use crate::braket::BraketSolver;
use crate::credentials::Credentials;
use crate::dwave::{DwaveConfig, DwaveSolver};
use crate::error::{Result, SolverError};
use crate::ibm::IbmqSolver;
use crate::solver::Solver;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Supported quantum providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderType {
    Dwave,
    Ibmq,
    Braket,
}

impl std::str::FromStr for ProviderType {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "dwave" | "d-wave" => Ok(ProviderType::Dwave),
            "ibmq" => Ok(ProviderType::Ibmq),
            "braket" => Ok(ProviderType::Braket),
            other => Err(SolverError::UnknownBackend(format!(
                "unknown provider '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ProviderType::Dwave => "d-wave",
            ProviderType::Ibmq => "ibmq",
            ProviderType::Braket => "braket",
        };
        f.write_str(s)
    }
}

/// Provider-specific execution options
///
/// One typed record instead of an untyped option blob; each provider reads
/// the fields it understands.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderOptions {
    /// Annealer: per-call time limit in seconds
    #[serde(default)]
    pub time_limit: Option<u64>,
    /// Annealer: QPU reads per sample call
    #[serde(default)]
    pub num_reads: Option<usize>,
    /// Annealer: QPU topology family
    #[serde(default)]
    pub topology: Option<String>,
    /// Annealer: fixed minor embedding
    #[serde(default)]
    pub embedding: Option<HashMap<String, Vec<usize>>>,
    /// Gate providers: transpiler optimization level
    #[serde(default)]
    pub optimization_level: Option<u8>,
    /// Braket: opaque device parameters
    #[serde(default)]
    pub device_parameters: HashMap<String, serde_json::Value>,
}

/// Common provider configuration handed to the factory
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    pub backend: String,
    pub shots: u64,
    pub provider_options: ProviderOptions,
}

/// A constructed provider adapter
///
/// Gate providers speak circuit text; the annealer consumes the model
/// directly. The IBM adapter stays concrete so callers can reach its
/// session API.
pub enum AnySolver {
    Annealer(DwaveSolver),
    Ibmq(IbmqSolver),
    Braket(BraketSolver),
}

impl AnySolver {
    /// The gate-based view of this adapter, when it has one
    pub fn as_gate(&self) -> Option<&dyn Solver> {
        match self {
            AnySolver::Annealer(_) => None,
            AnySolver::Ibmq(solver) => Some(solver),
            AnySolver::Braket(solver) => Some(solver),
        }
    }
}

/// Factory creating the adapter for a provider
pub struct SolverFactory;

impl SolverFactory {
    pub fn get_solver(
        provider: ProviderType,
        credentials: &Credentials,
        config: ProviderConfig,
    ) -> Result<AnySolver> {
        let options = config.provider_options;
        match provider {
            ProviderType::Dwave => {
                let token = credentials
                    .dwave_token
                    .clone()
                    .ok_or_else(|| SolverError::MissingCredentials("d-wave".to_string()))?;
                let defaults = DwaveConfig::default();
                let dwave_config = DwaveConfig {
                    backend: config.backend,
                    time_limit: options.time_limit,
                    num_reads: options.num_reads.unwrap_or(defaults.num_reads),
                    topology: options.topology.unwrap_or(defaults.topology),
                    embedding: options.embedding,
                };
                Ok(AnySolver::Annealer(DwaveSolver::new(token, dwave_config)))
            }
            ProviderType::Ibmq => {
                let token = credentials
                    .ibmq_token
                    .clone()
                    .ok_or_else(|| SolverError::MissingCredentials("ibmq".to_string()))?;
                Ok(AnySolver::Ibmq(IbmqSolver::new(
                    token,
                    config.shots,
                    config.backend,
                    options.optimization_level.unwrap_or(1),
                )))
            }
            ProviderType::Braket => Ok(AnySolver::Braket(BraketSolver::new(
                config.shots,
                config.backend,
                options.device_parameters,
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials::new(Some("dw".to_string()), Some("ib".to_string()))
    }

    fn config(backend: &str) -> ProviderConfig {
        ProviderConfig {
            backend: backend.to_string(),
            shots: 1024,
            provider_options: ProviderOptions::default(),
        }
    }

    #[test]
    fn test_provider_parsing() {
        assert_eq!("dwave".parse::<ProviderType>().unwrap(), ProviderType::Dwave);
        assert_eq!("d-wave".parse::<ProviderType>().unwrap(), ProviderType::Dwave);
        assert_eq!("ibmq".parse::<ProviderType>().unwrap(), ProviderType::Ibmq);
        assert!("rigetti".parse::<ProviderType>().is_err());
    }

    #[test]
    fn test_missing_credentials() {
        let empty = Credentials::default();
        assert!(matches!(
            SolverFactory::get_solver(ProviderType::Dwave, &empty, config("hybrid_solver")),
            Err(SolverError::MissingCredentials(_))
        ));
        assert!(matches!(
            SolverFactory::get_solver(ProviderType::Ibmq, &empty, config("simulator")),
            Err(SolverError::MissingCredentials(_))
        ));
        // Braket authenticates through the ambient AWS config, not a token
        assert!(SolverFactory::get_solver(ProviderType::Braket, &empty, config("simulator")).is_ok());
    }

    #[test]
    fn test_dwave_options_flow_through() {
        let mut cfg = config("hybrid_solver");
        cfg.provider_options.time_limit = Some(30);
        cfg.provider_options.num_reads = Some(500);
        let AnySolver::Annealer(solver) =
            SolverFactory::get_solver(ProviderType::Dwave, &credentials(), cfg).unwrap()
        else {
            panic!("expected annealer");
        };
        assert_eq!(solver.config().time_limit, Some(30));
        assert_eq!(solver.config().num_reads, 500);
        assert_eq!(solver.config().topology, "pegasus");
    }

    #[test]
    fn test_gate_solver_shots() {
        let solver =
            SolverFactory::get_solver(ProviderType::Ibmq, &credentials(), config("simulator"))
                .unwrap();
        assert!(matches!(solver, AnySolver::Ibmq(_)));
        assert_eq!(solver.as_gate().unwrap().shots(), 1024);
    }
}
