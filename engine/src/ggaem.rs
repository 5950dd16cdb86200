//! Generalized Gate-based Algorithm Execution Manager
//!
//! The outer loop coupling a classical optimizer to a backend sampler:
//! build the algorithm, strip the parameter declarations (parameters are
//! outer-loop variables in the default workflow), iterate cost evaluations
//! over the adapter, then submit the optimum once more for the final
//! histogram.

use crate::config::ExecutionConfig;
use crate::energy::calculate_energy;
use crate::error::{EngineError, Result};
use tracing::info;
use vqo_algorithms::{AlgorithmConfig, AlgorithmFactory};
use vqo_circuits::qasm::{self, ParamDecls};
use vqo_model::{Model, QuboInterpreter};
use vqo_solvers::{Counts, Solver};

/// Outcome of a gate-based workflow: the optimal histogram plus what is
/// needed to decode it
pub struct WorkflowRun {
    pub counts: Counts,
    pub interpreter: QuboInterpreter,
    pub algorithm: String,
}

/// Translate the execution config into an algorithm build config
pub(crate) fn algorithm_config(config: &mut ExecutionConfig) -> Result<AlgorithmConfig> {
    Ok(AlgorithmConfig {
        algorithm: config
            .algorithm
            .parse::<vqo_algorithms::AlgorithmType>()
            .map_err(|e| EngineError::InvalidConfig(e.to_string()))?,
        penalty: config.penalty,
        seed: config.seed,
        p: config.p,
        layers: config.layers,
        mixer: config.mixer.take(),
        ansatz: config
            .ansatz
            .as_deref()
            .map(str::parse::<vqo_algorithms::AnsatzKind>)
            .transpose()
            .map_err(|e| EngineError::InvalidConfig(e.to_string()))?,
    })
}

/// Run the default gate-based workflow against a solver adapter
pub fn run_ggaem(
    model: &Model,
    solver: &dyn Solver,
    config: &mut ExecutionConfig,
) -> Result<WorkflowRun> {
    let mut algorithm = AlgorithmFactory::build(model, algorithm_config(config)?)?;
    let starting_point = algorithm.starting_point();
    let optimizer = config.take_optimizer()?;
    let mut callback = config.callback.take();
    let shots = config.shots;
    let verbose = config.verbose;

    let mut iteration = 0usize;
    let mut cost = |params: &[f64]| -> Result<f64> {
        let bound = algorithm.update_params(params)?;
        let program = qasm::serialize(&bound, ParamDecls::Omit);
        let counts = solver.solve(&program)?;
        let cost = calculate_energy(&counts, shots, algorithm.qubo());
        iteration += 1;
        if let Some(callback) = callback.as_mut() {
            callback(params);
        }
        if verbose {
            info!(iteration, cost, "cost evaluation");
        }
        Ok(cost)
    };

    let result = optimizer.minimize(&mut cost, &starting_point, config.tolerance, config.max_iter)?;
    drop(cost);

    // Final submission at the optimum, same shot count
    let bound = algorithm.update_params(&result.x)?;
    let program = qasm::serialize(&bound, ParamDecls::Omit);
    let counts = solver.solve(&program)?;

    Ok(WorkflowRun {
        counts,
        interpreter: algorithm.interpreter().clone(),
        algorithm: algorithm.name().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use vqo_model::problems;
    use vqo_solvers::IbmqSolver;

    #[test]
    fn test_ggaem_returns_decodable_counts() {
        let model = problems::knapsack("k", &[3.0, 5.0], &[2.0, 3.0], 4.0).unwrap();
        let solver = IbmqSolver::new("token".into(), 128, "simulator".into(), 1);
        let mut config = ExecutionConfig {
            max_iter: 12,
            shots: 128,
            ..Default::default()
        };

        let run = run_ggaem(&model, &solver, &mut config).unwrap();
        assert_eq!(run.algorithm, "qaoa");
        // 2 items + 3 slack bits
        assert_eq!(run.interpreter.num_bits(), 5);
        let total: u64 = run.counts.values().sum();
        assert_eq!(total, 128);
        for bits in run.counts.keys() {
            assert_eq!(bits.len(), 5);
        }
    }

    #[test]
    fn test_adapter_failure_propagates_without_retry() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;
        use vqo_circuits::Circuit;
        use vqo_solvers::{Counts, SolverError};

        struct FailingSolver {
            calls: Arc<AtomicUsize>,
        }

        impl Solver for FailingSolver {
            fn shots(&self) -> u64 {
                1
            }
            fn parse_input(&self, _program: &str) -> vqo_solvers::Result<Circuit> {
                Ok(Circuit::new(1))
            }
            fn parse_response(&self, counts: Counts) -> Counts {
                counts
            }
            fn select_backend(
                &self,
                _num_qubits: usize,
            ) -> vqo_solvers::Result<std::sync::Arc<dyn vqo_solvers::QuantumDevice>> {
                Err(SolverError::UnknownBackend("none".into()))
            }
            fn solve(&self, _program: &str) -> vqo_solvers::Result<Counts> {
                self.calls.fetch_add(1, Ordering::SeqCst);
                Err(SolverError::BackendExecutionError("device offline".into()))
            }
        }

        let model = problems::knapsack("k", &[1.0], &[1.0], 1.0).unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let solver = FailingSolver { calls: calls.clone() };
        let mut config = ExecutionConfig {
            max_iter: 20,
            ..Default::default()
        };

        let result = run_ggaem(&model, &solver, &mut config);
        assert!(matches!(
            result,
            Err(EngineError::Solver(
                vqo_solvers::SolverError::BackendExecutionError(_)
            ))
        ));
        // One call, no retries: the engine aborts on the first failure
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_callback_sees_each_iteration() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let model = problems::knapsack("k", &[1.0, 2.0], &[1.0, 1.0], 1.0).unwrap();
        let solver = IbmqSolver::new("token".into(), 64, "simulator".into(), 1);
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_in_callback = hits.clone();
        let mut config = ExecutionConfig {
            max_iter: 8,
            shots: 64,
            callback: Some(Box::new(move |_params| {
                hits_in_callback.fetch_add(1, Ordering::SeqCst);
            })),
            ..Default::default()
        };

        run_ggaem(&model, &solver, &mut config).unwrap();
        assert!(hits.load(Ordering::SeqCst) > 0);
    }
}
