//! Execution configuration
//!
//! TOML-serializable configuration for a solve. Non-serializable
//! collaborators (custom optimizer, mixer override, callback, classical
//! backend) ride along behind `#[serde(skip)]` and are injected by the
//! embedding application.

use crate::error::{EngineError, Result};
use crate::optimize::{Optimizer, OptimizerKind};
use serde::{Deserialize, Serialize};
use vqo_algorithms::mixers::Mixer;
use vqo_algorithms::{AlgorithmType, AnsatzKind};
use vqo_model::ClassicalSolve;
use vqo_solvers::{ProviderOptions, ProviderType};

/// Solve method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Classical,
    Quantum,
}

impl Default for Method {
    fn default() -> Self {
        Method::Classical
    }
}

/// Execution workflow for gate providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Workflow {
    Default,
    Session,
}

impl Default for Workflow {
    fn default() -> Self {
        Workflow::Default
    }
}

/// Per-iteration parameter callback
pub type Callback = Box<dyn FnMut(&[f64]) + Send>;

/// Configuration for a solve
#[derive(Serialize, Deserialize)]
pub struct ExecutionConfig {
    #[serde(default)]
    pub method: Method,

    #[serde(default)]
    pub verbose: bool,

    /// Quantum provider ("dwave", "ibmq", "braket")
    #[serde(default)]
    pub provider: Option<String>,

    #[serde(default)]
    pub workflow: Workflow,

    /// Backend name ("simulator", a device name, "hybrid_solver", an ARN)
    #[serde(default)]
    pub backend: String,

    /// Algorithm name ("qaoa", "qao-ansatz", "vqe")
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// VQE ansatz name
    #[serde(default)]
    pub ansatz: Option<String>,

    /// QAOA depth
    #[serde(default = "default_depth")]
    pub p: usize,

    /// VQE depth
    #[serde(default = "default_depth")]
    pub layers: usize,

    /// Named classical optimizer
    #[serde(default = "default_optimizer")]
    pub optimizer: String,

    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    #[serde(default = "default_max_iter")]
    pub max_iter: usize,

    /// Penalty factor for the QUBO conversion; engine-chosen when unset
    #[serde(default)]
    pub penalty: Option<f64>,

    #[serde(default = "default_shots")]
    pub shots: u64,

    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default)]
    pub provider_options: ProviderOptions,

    /// User-supplied minimizer; overrides `optimizer` when present
    #[serde(skip)]
    pub custom_optimizer: Option<Box<dyn Optimizer>>,

    /// Mixer override for the QAOA framework
    #[serde(skip)]
    pub mixer: Option<Box<dyn Mixer>>,

    /// Per-iteration callback on the current parameter vector
    #[serde(skip)]
    pub callback: Option<Callback>,

    /// Classical backend used when `method = classical`
    #[serde(skip)]
    pub classical: Option<Box<dyn ClassicalSolve>>,
}

fn default_algorithm() -> String {
    "qaoa".to_string()
}

fn default_depth() -> usize {
    2
}

fn default_optimizer() -> String {
    "cobyla".to_string()
}

fn default_tolerance() -> f64 {
    1e-10
}

fn default_max_iter() -> usize {
    1000
}

fn default_shots() -> u64 {
    1024
}

fn default_seed() -> u64 {
    1
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            method: Method::default(),
            verbose: false,
            provider: None,
            workflow: Workflow::default(),
            backend: String::new(),
            algorithm: default_algorithm(),
            ansatz: None,
            p: default_depth(),
            layers: default_depth(),
            optimizer: default_optimizer(),
            tolerance: default_tolerance(),
            max_iter: default_max_iter(),
            penalty: None,
            shots: default_shots(),
            seed: default_seed(),
            provider_options: ProviderOptions::default(),
            custom_optimizer: None,
            mixer: None,
            callback: None,
            classical: None,
        }
    }
}

impl std::fmt::Debug for ExecutionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionConfig")
            .field("method", &self.method)
            .field("provider", &self.provider)
            .field("workflow", &self.workflow)
            .field("backend", &self.backend)
            .field("algorithm", &self.algorithm)
            .field("p", &self.p)
            .field("layers", &self.layers)
            .field("optimizer", &self.optimizer)
            .field("max_iter", &self.max_iter)
            .field("shots", &self.shots)
            .field("seed", &self.seed)
            .field("custom_optimizer", &self.custom_optimizer.is_some())
            .field("mixer", &self.mixer.is_some())
            .finish()
    }
}

impl ExecutionConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        let config: ExecutionConfig =
            toml::from_str(&content).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save the serializable part to a TOML file
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.custom_optimizer.is_none() {
            self.optimizer.parse::<OptimizerKind>()?;
        }
        self.algorithm
            .parse::<AlgorithmType>()
            .map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        if let Some(ansatz) = &self.ansatz {
            ansatz
                .parse::<AnsatzKind>()
                .map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        }
        if let Some(provider) = &self.provider {
            provider
                .parse::<ProviderType>()
                .map_err(|_| EngineError::InvalidConfig(format!("unknown provider '{}'", provider)))?;
        }
        if self.p == 0 || self.layers == 0 {
            return Err(EngineError::InvalidConfig(
                "p and layers must be at least 1".to_string(),
            ));
        }
        if self.shots == 0 {
            return Err(EngineError::InvalidConfig("shots must be positive".to_string()));
        }
        Ok(())
    }

    /// Resolve the optimizer: custom takes precedence over the named one
    pub fn take_optimizer(&mut self) -> Result<Box<dyn Optimizer>> {
        if let Some(custom) = self.custom_optimizer.take() {
            return Ok(custom);
        }
        Ok(self.optimizer.parse::<OptimizerKind>()?.build(self.seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExecutionConfig::default();
        assert_eq!(config.method, Method::Classical);
        assert_eq!(config.algorithm, "qaoa");
        assert_eq!(config.p, 2);
        assert_eq!(config.shots, 1024);
        assert_eq!(config.seed, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_optimizer_rejected() {
        let config = ExecutionConfig {
            optimizer: "bfgs".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_custom_optimizer_bypasses_name_check() {
        use crate::optimize::NelderMead;
        let config = ExecutionConfig {
            optimizer: "whatever".to_string(),
            custom_optimizer: Some(Box::new(NelderMead::default())),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_provider_rejected() {
        let config = ExecutionConfig {
            provider: Some("rigetti".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_text = r#"
            method = "quantum"
            provider = "ibmq"
            backend = "simulator"
            algorithm = "qao-ansatz"
            p = 3
            shots = 5000

            [provider_options]
            optimization_level = 2
        "#;
        let config: ExecutionConfig = toml::from_str(toml_text).unwrap();
        assert_eq!(config.method, Method::Quantum);
        assert_eq!(config.p, 3);
        assert_eq!(config.shots, 5000);
        assert_eq!(config.provider_options.optimization_level, Some(2));
        // Unset fields take their defaults
        assert_eq!(config.max_iter, 1000);
        config.validate().unwrap();
    }
}
