//! D-Wave-style annealing adapter
//!
//! Translates the model directly into a native quadratic form (no circuit
//! compiler involved): a constrained quadratic model when constraints
//! exist, a discrete quadratic model for integer variables, a binary
//! quadratic model otherwise. A maximizing objective is negated before
//! submission; the sampler minimizes energy.

use crate::annealer::{AnnealingSampler, LocalAnnealingSampler, SampleParams};
use crate::error::{Result, SolverError};
use crate::quadratic::{
    BinaryQuadraticModel, ConstrainedQuadraticModel, DiscreteQuadraticModel, QuadraticModel,
    SampleSet, Vartype,
};
use std::collections::HashMap;
use tracing::warn;
use vqo_model::{Expression, Model, ModelError, Sense, VarKind};

/// Configuration of the annealing adapter
#[derive(Debug, Clone)]
pub struct DwaveConfig {
    /// "hybrid_solver" or "d-wave_sampler"
    pub backend: String,
    pub time_limit: Option<u64>,
    pub num_reads: usize,
    /// QPU topology family the embedding targets
    pub topology: String,
    /// Fixed minor embedding (variable name to physical qubit chain)
    pub embedding: Option<HashMap<String, Vec<usize>>>,
}

impl Default for DwaveConfig {
    fn default() -> Self {
        Self {
            backend: "hybrid_solver".to_string(),
            time_limit: None,
            num_reads: 100,
            topology: "pegasus".to_string(),
            embedding: None,
        }
    }
}

/// Model translated for the annealer
#[derive(Debug, Clone)]
pub enum ParsedModel {
    Cqm(ConstrainedQuadraticModel),
    Dqm(DiscreteQuadraticModel),
    Bqm(BinaryQuadraticModel),
}

/// Best sample returned by the annealing path
#[derive(Debug, Clone)]
pub struct AnnealerSolution {
    pub assignment: HashMap<String, f64>,
    /// Energy under the (sense-inverted) submission objective
    pub energy: f64,
}

/// Adapter for a D-Wave-style annealing provider
pub struct DwaveSolver {
    #[allow(dead_code)]
    token: String,
    config: DwaveConfig,
    hybrid: Box<dyn AnnealingSampler>,
    qpu: Box<dyn AnnealingSampler>,
}

impl DwaveSolver {
    pub fn new(token: String, config: DwaveConfig) -> Self {
        Self::with_samplers(
            token,
            config,
            Box::new(LocalAnnealingSampler::default()),
            Box::new(LocalAnnealingSampler::default()),
        )
    }

    /// Inject hybrid and QPU samplers (remote clients, test doubles)
    pub fn with_samplers(
        token: String,
        config: DwaveConfig,
        hybrid: Box<dyn AnnealingSampler>,
        qpu: Box<dyn AnnealingSampler>,
    ) -> Self {
        Self { token, config, hybrid, qpu }
    }

    pub fn config(&self) -> &DwaveConfig {
        &self.config
    }

    fn sample_params(&self) -> SampleParams {
        SampleParams {
            num_reads: self.config.num_reads,
            time_limit: self.config.time_limit,
            seed: None,
        }
    }

    /// Translate a model into its native quadratic form
    ///
    /// Constraints keep their original coefficients; only the objective is
    /// sense-inverted.
    pub fn parse_input(&self, model: &Model) -> Result<ParsedModel> {
        if model.has_continuous_vars() {
            return Err(SolverError::Model(ModelError::UnsupportedVariableKind(
                "continuous variables are not sampleable".to_string(),
            )));
        }

        if model.has_constraints() {
            let mut cqm = ConstrainedQuadraticModel::new();
            cqm.set_objective(self.parse_objective(model)?);
            for constraint in model.constraints() {
                let mut lhs = self.declare_variables(model);
                add_expression(&mut lhs, &constraint.lhs, model, 1.0)?;
                cqm.add_constraint(&constraint.label, lhs, constraint.comparator, constraint.rhs);
            }
            return Ok(ParsedModel::Cqm(cqm));
        }

        if model.has_integer_vars() {
            let mut dqm = DiscreteQuadraticModel::new();
            dqm.qm = self.parse_objective(model)?;
            return Ok(ParsedModel::Dqm(dqm));
        }

        let mut bqm = BinaryQuadraticModel::new();
        bqm.qm = self.parse_objective(model)?;
        Ok(ParsedModel::Bqm(bqm))
    }

    fn declare_variables(&self, model: &Model) -> QuadraticModel {
        let mut qm = QuadraticModel::new();
        for var in model.variables() {
            let vartype = match var.kind {
                VarKind::Binary => Vartype::Binary,
                VarKind::Integer { lower, upper } => Vartype::Integer {
                    lower,
                    upper: upper.unwrap_or(i64::MAX),
                },
                VarKind::Continuous { .. } => unreachable!("rejected in parse_input"),
            };
            qm.add_variable(&var.name, vartype);
        }
        qm
    }

    fn parse_objective(&self, model: &Model) -> Result<QuadraticModel> {
        let mut qm = self.declare_variables(model);
        let sense_multiplier = match model.sense() {
            Sense::Minimize => 1.0,
            Sense::Maximize => -1.0,
        };
        add_expression(&mut qm, model.objective(), model, sense_multiplier)?;
        Ok(qm)
    }

    /// Resolve the embedding for the QPU path
    ///
    /// A fixed embedding must cover every variable; with none given, each
    /// variable is assigned a single-qubit chain.
    fn resolve_embedding(&self, bqm: &BinaryQuadraticModel) -> Result<HashMap<String, Vec<usize>>> {
        match &self.config.embedding {
            Some(fixed) => {
                for (name, _) in bqm.qm.variables() {
                    if !fixed.contains_key(name) {
                        return Err(SolverError::BackendExecutionError(format!(
                            "embedding does not cover variable '{}'",
                            name
                        )));
                    }
                }
                Ok(fixed.clone())
            }
            None => Ok(bqm
                .qm
                .variables()
                .enumerate()
                .map(|(i, (name, _))| (name.to_string(), vec![i]))
                .collect()),
        }
    }

    /// Sample the model and return the best (feasible) assignment
    pub fn solve(&self, model: &Model) -> Result<AnnealerSolution> {
        let parsed = self.parse_input(model)?;
        let params = self.sample_params();

        let sampleset = match (&parsed, self.config.backend.as_str()) {
            (ParsedModel::Bqm(bqm), "d-wave_sampler") => {
                let _embedding = self.resolve_embedding(bqm)?;
                self.qpu.sample_bqm(bqm, model.name(), &params)?
            }
            (_, "d-wave_sampler") => {
                warn!(
                    model = model.name(),
                    "QPU cannot sample constrained or discrete models; falling back to the hybrid sampler"
                );
                self.sample_hybrid(&parsed, model.name(), &params)?
            }
            (_, "hybrid_solver") | (_, "") => {
                self.sample_hybrid(&parsed, model.name(), &params)?
            }
            (_, other) => return Err(SolverError::UnknownBackend(other.to_string())),
        };

        let sampleset = match &parsed {
            ParsedModel::Cqm(_) => sampleset.filter_feasible(),
            _ => sampleset,
        };
        self.parse_response(sampleset)
    }

    fn sample_hybrid(
        &self,
        parsed: &ParsedModel,
        label: &str,
        params: &SampleParams,
    ) -> Result<SampleSet> {
        match parsed {
            ParsedModel::Cqm(cqm) => self.hybrid.sample_cqm(cqm, label, params),
            ParsedModel::Dqm(dqm) => self.hybrid.sample_dqm(dqm, label, params),
            ParsedModel::Bqm(bqm) => self.hybrid.sample_bqm(bqm, label, params),
        }
    }

    /// Extract the best row; an empty (feasible) set is an error
    pub fn parse_response(&self, sampleset: SampleSet) -> Result<AnnealerSolution> {
        let best = sampleset.first().ok_or(SolverError::InfeasibleResult)?;
        Ok(AnnealerSolution {
            assignment: best.assignment.clone(),
            energy: best.energy,
        })
    }
}

fn add_expression(
    qm: &mut QuadraticModel,
    expr: &Expression,
    model: &Model,
    multiplier: f64,
) -> Result<()> {
    let name = |i: usize| model.variable(i).map(|v| v.name.as_str()).unwrap_or("");
    for (var, coeff) in expr.linear_terms() {
        qm.set_linear(name(var), multiplier * coeff)?;
    }
    for (i, j, coeff) in expr.quadratic_terms() {
        qm.set_quadratic(name(i), name(j), multiplier * coeff)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vqo_model::problems;

    fn config(backend: &str) -> DwaveConfig {
        DwaveConfig {
            backend: backend.to_string(),
            num_reads: 30,
            ..Default::default()
        }
    }

    fn knapsack() -> Model {
        problems::knapsack(
            "knap",
            &[10.0, 5.0, 18.0, 12.0, 15.0, 1.0, 2.0, 8.0],
            &[4.0, 2.0, 5.0, 4.0, 5.0, 1.0, 3.0, 5.0],
            15.0,
        )
        .unwrap()
    }

    #[test]
    fn test_constrained_model_becomes_cqm_with_negated_objective() {
        let solver = DwaveSolver::new("token".into(), config("hybrid_solver"));
        let parsed = solver.parse_input(&knapsack()).unwrap();
        let ParsedModel::Cqm(cqm) = parsed else {
            panic!("expected CQM");
        };
        // Maximize 10 x0 + ... becomes minimize -10 x0 - ...
        assert_eq!(cqm.objective.linear_coeff("x0").unwrap(), -10.0);
        // Constraint coefficients keep their sign
        assert_eq!(cqm.constraints.len(), 1);
        assert_eq!(cqm.constraints[0].lhs.linear_coeff("x0").unwrap(), 4.0);
    }

    #[test]
    fn test_unconstrained_binary_becomes_bqm() {
        let mut model = Model::new("m");
        let x = model.binary_var("x");
        model.minimize(vqo_model::linear_sum([(x, 2.0)]));
        let solver = DwaveSolver::new("token".into(), config("hybrid_solver"));
        assert!(matches!(
            solver.parse_input(&model).unwrap(),
            ParsedModel::Bqm(_)
        ));
    }

    #[test]
    fn test_integer_unconstrained_becomes_dqm() {
        let mut model = Model::new("m");
        let x = model.integer_var("x", 0, 3);
        model.minimize(vqo_model::linear_sum([(x, 1.0)]));
        let solver = DwaveSolver::new("token".into(), config("hybrid_solver"));
        assert!(matches!(
            solver.parse_input(&model).unwrap(),
            ParsedModel::Dqm(_)
        ));
    }

    #[test]
    fn test_hybrid_solves_knapsack_feasibly() {
        let model = knapsack();
        let solver = DwaveSolver::new("token".into(), config("hybrid_solver"));
        let solution = solver.solve(&model).unwrap();
        let values: Vec<f64> = model
            .variables()
            .iter()
            .map(|v| solution.assignment[&v.name])
            .collect();
        assert!(model.is_feasible(&values));
    }

    #[test]
    fn test_qpu_with_cqm_falls_back_to_hybrid() {
        let model = knapsack();
        let solver = DwaveSolver::new("token".into(), config("d-wave_sampler"));
        // Falls back with a warning instead of failing
        assert!(solver.solve(&model).is_ok());
    }

    #[test]
    fn test_fixed_embedding_must_cover_all_variables() {
        let mut model = Model::new("m");
        let x = model.binary_var("x");
        let y = model.binary_var("y");
        model.minimize(vqo_model::linear_sum([(x, 1.0), (y, 1.0)]));

        let mut cfg = config("d-wave_sampler");
        cfg.embedding = Some(HashMap::from([("x".to_string(), vec![0])]));
        let solver = DwaveSolver::new("token".into(), cfg);
        assert!(matches!(
            solver.solve(&model),
            Err(SolverError::BackendExecutionError(_))
        ));
    }

    #[test]
    fn test_unknown_backend() {
        let solver = DwaveSolver::new("token".into(), config("quantum_toaster"));
        assert!(matches!(
            solver.solve(&knapsack()),
            Err(SolverError::UnknownBackend(_))
        ));
    }
}
