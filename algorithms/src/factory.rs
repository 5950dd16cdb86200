//! Algorithm selection and construction

use crate::error::AlgorithmError;
use crate::mixers::{Mixer, MixerFactory, StandardMixer};
use crate::vqe::AnsatzKind;
use crate::{Algorithm, Qaoa, Result, Vqe};
use serde::{Deserialize, Serialize};
use vqo_model::{analyze, Model};

/// Supported gate-based variational algorithms
///
/// `QaoAnsatz` is QAOA under the quantum alternating operator ansatz: the
/// mixer is chosen from the model's constraint pattern instead of the
/// transverse-field default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlgorithmType {
    Qaoa,
    QaoAnsatz,
    Vqe,
}

impl std::str::FromStr for AlgorithmType {
    type Err = AlgorithmError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "qaoa" => Ok(AlgorithmType::Qaoa),
            "qao-ansatz" => Ok(AlgorithmType::QaoAnsatz),
            "vqe" => Ok(AlgorithmType::Vqe),
            other => Err(AlgorithmError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

impl std::fmt::Display for AlgorithmType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AlgorithmType::Qaoa => "qaoa",
            AlgorithmType::QaoAnsatz => "qao-ansatz",
            AlgorithmType::Vqe => "vqe",
        };
        f.write_str(s)
    }
}

/// Configuration for building an algorithm instance
pub struct AlgorithmConfig {
    pub algorithm: AlgorithmType,
    pub penalty: Option<f64>,
    pub seed: u64,
    /// QAOA depth
    pub p: usize,
    /// VQE depth
    pub layers: usize,
    /// Mixer override for the QAOA framework
    pub mixer: Option<Box<dyn Mixer>>,
    /// Ansatz override for VQE
    pub ansatz: Option<AnsatzKind>,
}

impl Default for AlgorithmConfig {
    fn default() -> Self {
        Self {
            algorithm: AlgorithmType::Qaoa,
            penalty: None,
            seed: 1,
            p: 2,
            layers: 2,
            mixer: None,
            ansatz: None,
        }
    }
}

/// Factory creating algorithm instances from a model and configuration
pub struct AlgorithmFactory;

impl AlgorithmFactory {
    pub fn build(model: &Model, config: AlgorithmConfig) -> Result<Box<dyn Algorithm>> {
        match config.algorithm {
            AlgorithmType::Qaoa => {
                let mixer = config.mixer.unwrap_or_else(|| Box::new(StandardMixer));
                Ok(Box::new(Qaoa::new(
                    model,
                    config.p,
                    config.seed,
                    config.penalty,
                    mixer,
                )?))
            }
            AlgorithmType::QaoAnsatz => {
                let mixer = config
                    .mixer
                    .unwrap_or_else(|| MixerFactory::for_constraints(&analyze(model)));
                Ok(Box::new(Qaoa::new(
                    model,
                    config.p,
                    config.seed,
                    config.penalty,
                    mixer,
                )?))
            }
            AlgorithmType::Vqe => Ok(Box::new(Vqe::new(
                model,
                config.layers,
                config.seed,
                config.penalty,
                config.ansatz,
            )?)),
        }
    }
}
