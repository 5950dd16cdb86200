//! Solve entry point
//!
//! Dispatches on method and provider, runs the matching workflow, decodes
//! the result and attaches a single [`ModelSolution`] to the model.
//! Credentials are read from the environment once per solve and passed in;
//! adapters never touch globals.

use crate::config::{ExecutionConfig, Method, Workflow};
use crate::error::{EngineError, Result};
use crate::extract::extract_solution;
use crate::ggaem::run_ggaem;
use crate::session::run_ibm_session;
use std::time::Instant;
use vqo_model::{Model, ModelSolution, SolveMethod};
use vqo_solvers::{
    AnySolver, Credentials, ProviderConfig, ProviderType, SolverFactory,
};

/// Solve a model per the configuration, reading credentials from the
/// environment
pub fn solve(model: &mut Model, config: ExecutionConfig) -> Result<ModelSolution> {
    let credentials = Credentials::from_env();
    solve_with_credentials(model, config, credentials)
}

/// Solve with explicitly provided credentials
pub fn solve_with_credentials(
    model: &mut Model,
    mut config: ExecutionConfig,
    credentials: Credentials,
) -> Result<ModelSolution> {
    config.validate()?;
    let start = Instant::now();

    let solution = match config.method {
        Method::Classical => {
            let backend = config.classical.take().ok_or_else(|| {
                EngineError::InvalidConfig(
                    "method 'classical' requires a classical backend".to_string(),
                )
            })?;
            let (values, objective) = backend.solve(model)?;
            ModelSolution {
                values,
                objective,
                execution_time: start.elapsed().as_secs_f64(),
                method: SolveMethod::Classical,
                provider: None,
                backend: None,
                algorithm: "N/A".to_string(),
            }
        }
        Method::Quantum => {
            let provider_name = config.provider.clone().ok_or_else(|| {
                EngineError::InvalidConfig("method 'quantum' requires a provider".to_string())
            })?;
            let provider: ProviderType = provider_name
                .parse()
                .map_err(|_| EngineError::InvalidConfig(format!("unknown provider '{}'", provider_name)))?;
            let solver = SolverFactory::get_solver(
                provider,
                &credentials,
                ProviderConfig {
                    backend: config.backend.clone(),
                    shots: config.shots,
                    provider_options: config.provider_options.clone(),
                },
            )?;
            let mut solution = solve_quantum(model, solver, &mut config)?;
            solution.execution_time = start.elapsed().as_secs_f64();
            solution
        }
    };

    model.attach_solution(solution.clone());
    Ok(solution)
}

/// Run the quantum path against an already-constructed adapter
///
/// Exposed so embedders and tests can inject adapters with custom device
/// registries or samplers.
pub fn solve_quantum(
    model: &Model,
    solver: AnySolver,
    config: &mut ExecutionConfig,
) -> Result<ModelSolution> {
    let provider = config.provider.clone();
    let backend = (!config.backend.is_empty()).then(|| config.backend.clone());

    match solver {
        AnySolver::Annealer(annealer) => {
            // The annealing path never touches the circuit compiler
            let best = annealer.solve(model)?;
            let values: Vec<f64> = model
                .variables()
                .iter()
                .map(|v| best.assignment.get(&v.name).copied().unwrap_or(0.0))
                .collect();
            let objective = model.evaluate_objective(&values);
            Ok(ModelSolution {
                values: model
                    .variables()
                    .iter()
                    .zip(&values)
                    .map(|(v, &x)| (v.name.clone(), x))
                    .collect(),
                objective,
                execution_time: 0.0,
                method: SolveMethod::Quantum,
                provider,
                backend,
                algorithm: "annealing".to_string(),
            })
        }
        AnySolver::Ibmq(ibmq) => {
            let run = if config.workflow == Workflow::Session {
                run_ibm_session(model, &ibmq, config)?
            } else {
                run_ggaem(model, &ibmq, config)?
            };
            let extracted = extract_solution(model, &run.counts, Some(&run.interpreter))?;
            Ok(ModelSolution {
                values: extracted.values,
                objective: extracted.objective,
                execution_time: 0.0,
                method: SolveMethod::Quantum,
                provider,
                backend,
                algorithm: run.algorithm,
            })
        }
        AnySolver::Braket(braket) => {
            let run = run_ggaem(model, &braket, config)?;
            let extracted = extract_solution(model, &run.counts, Some(&run.interpreter))?;
            Ok(ModelSolution {
                values: extracted.values,
                objective: extracted.objective,
                execution_time: 0.0,
                method: SolveMethod::Quantum,
                provider,
                backend,
                algorithm: run.algorithm,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use vqo_model::{problems, ClassicalSolve};

    struct FixedClassical;

    impl ClassicalSolve for FixedClassical {
        fn solve(
            &self,
            model: &Model,
        ) -> vqo_model::Result<(HashMap<String, f64>, f64)> {
            let values: HashMap<String, f64> = model
                .variables()
                .iter()
                .map(|v| (v.name.clone(), 0.0))
                .collect();
            Ok((values, 0.0))
        }
    }

    #[test]
    fn test_classical_requires_backend() {
        let mut model = problems::knapsack("k", &[1.0], &[1.0], 1.0).unwrap();
        let result = solve_with_credentials(
            &mut model,
            ExecutionConfig::default(),
            Credentials::default(),
        );
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_classical_delegates() {
        let mut model = problems::knapsack("k", &[1.0], &[1.0], 1.0).unwrap();
        let config = ExecutionConfig {
            classical: Some(Box::new(FixedClassical)),
            ..Default::default()
        };
        let solution =
            solve_with_credentials(&mut model, config, Credentials::default()).unwrap();
        assert_eq!(solution.method, SolveMethod::Classical);
        assert_eq!(solution.algorithm, "N/A");
        assert!(model.solution().is_some());
    }

    #[test]
    fn test_quantum_requires_provider() {
        let mut model = problems::knapsack("k", &[1.0], &[1.0], 1.0).unwrap();
        let config = ExecutionConfig {
            method: Method::Quantum,
            ..Default::default()
        };
        let result = solve_with_credentials(&mut model, config, Credentials::default());
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_quantum_missing_credentials() {
        let mut model = problems::knapsack("k", &[1.0], &[1.0], 1.0).unwrap();
        let config = ExecutionConfig {
            method: Method::Quantum,
            provider: Some("ibmq".to_string()),
            backend: "simulator".to_string(),
            ..Default::default()
        };
        let result = solve_with_credentials(&mut model, config, Credentials::default());
        assert!(matches!(
            result,
            Err(EngineError::Solver(
                vqo_solvers::SolverError::MissingCredentials(_)
            ))
        ));
    }
}
