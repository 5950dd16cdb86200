//! IBM-session workflow
//!
//! Same outer loop as the default workflow, but the parameterized circuit
//! keeps its declarations, is transpiled against the backend exactly once,
//! and every iteration binds numeric parameters through the session's
//! parameter-bind API. The transpiled circuit is shared, never mutated.

use crate::config::ExecutionConfig;
use crate::energy::calculate_energy;
use crate::error::Result;
use crate::ggaem::{algorithm_config, WorkflowRun};
use tracing::info;
use vqo_algorithms::AlgorithmFactory;
use vqo_circuits::qasm::{self, ParamDecls};
use vqo_model::Model;
use vqo_solvers::{IbmqSolver, Solver};

/// Run the session workflow against an IBM-style adapter
pub fn run_ibm_session(
    model: &Model,
    solver: &IbmqSolver,
    config: &mut ExecutionConfig,
) -> Result<WorkflowRun> {
    let mut algorithm = AlgorithmFactory::build(model, algorithm_config(config)?)?;

    // Parameter declarations stay in: binding happens backend-side
    let program = qasm::serialize(algorithm.circuit(), ParamDecls::Include);
    let vqc = solver.parse_input(&program)?;
    let backend = solver.select_backend(vqc.num_qubits)?;
    let transpiled = solver.transpile(&vqc, backend.as_ref())?;

    let starting_point = algorithm.starting_point();
    let optimizer = config.take_optimizer()?;
    let mut callback = config.callback.take();
    let shots = config.shots;
    let verbose = config.verbose;

    let session = solver.open_session(backend);

    let mut iteration = 0usize;
    let mut cost = |params: &[f64]| -> Result<f64> {
        let raw = session.bind_and_run(&transpiled, params)?;
        let counts = solver.parse_response(raw);
        let cost = calculate_energy(&counts, shots, algorithm.qubo());
        iteration += 1;
        if let Some(callback) = callback.as_mut() {
            callback(params);
        }
        if verbose {
            info!(iteration, cost, session = %session.id(), "cost evaluation");
        }
        Ok(cost)
    };

    let result = optimizer.minimize(&mut cost, &starting_point, config.tolerance, config.max_iter)?;
    drop(cost);

    // Final submission through the same session
    let raw = session.bind_and_run(&transpiled, &result.x)?;
    let counts = solver.parse_response(raw);

    Ok(WorkflowRun {
        counts,
        interpreter: algorithm.interpreter().clone(),
        algorithm: algorithm.name().to_string(),
    })
}
