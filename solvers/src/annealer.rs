//! Annealing sampler interface and local implementation
//!
//! Remote hybrid and QPU samplers enter through [`AnnealingSampler`]; the
//! local implementation runs Metropolis sweeps under a geometric cooling
//! schedule with random restarts, which is enough to stand in for the
//! hybrid service on small models.

use crate::error::Result;
use crate::quadratic::{
    BinaryQuadraticModel, ConstrainedQuadraticModel, DiscreteQuadraticModel, SampleRow,
    SampleSet, Vartype,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// Sampler-side execution parameters
#[derive(Debug, Clone)]
pub struct SampleParams {
    /// Independent restarts; each produces one sample row
    pub num_reads: usize,
    /// Per-call time limit in seconds, honored by remote samplers
    pub time_limit: Option<u64>,
    pub seed: Option<u64>,
}

impl Default for SampleParams {
    fn default() -> Self {
        Self {
            num_reads: 100,
            time_limit: None,
            seed: None,
        }
    }
}

/// A sampler of low-energy states of quadratic models
pub trait AnnealingSampler: Send + Sync {
    fn sample_bqm(
        &self,
        model: &BinaryQuadraticModel,
        label: &str,
        params: &SampleParams,
    ) -> Result<SampleSet>;

    fn sample_dqm(
        &self,
        model: &DiscreteQuadraticModel,
        label: &str,
        params: &SampleParams,
    ) -> Result<SampleSet>;

    fn sample_cqm(
        &self,
        model: &ConstrainedQuadraticModel,
        label: &str,
        params: &SampleParams,
    ) -> Result<SampleSet>;
}

/// Local Metropolis annealer with geometric cooling
pub struct LocalAnnealingSampler {
    /// Sweeps per read; one sweep proposes one move per variable
    pub sweeps: usize,
    /// Initial temperature of the schedule
    pub initial_temp: f64,
    /// Geometric decay per sweep
    pub decay: f64,
}

impl Default for LocalAnnealingSampler {
    fn default() -> Self {
        Self {
            sweeps: 600,
            initial_temp: 10.0,
            decay: 0.99,
        }
    }
}

/// A generic annealing target: energy plus move proposals
struct Target<'a> {
    variables: Vec<(String, Vartype)>,
    energy: Box<dyn Fn(&HashMap<String, f64>) -> f64 + 'a>,
}

impl LocalAnnealingSampler {
    fn anneal(&self, target: &Target<'_>, params: &SampleParams) -> Vec<HashMap<String, f64>> {
        let mut rng = StdRng::seed_from_u64(params.seed.unwrap_or_else(rand::random));
        let mut results = Vec::with_capacity(params.num_reads);

        for _ in 0..params.num_reads {
            let mut assignment: HashMap<String, f64> = target
                .variables
                .iter()
                .map(|(name, vartype)| {
                    let value = match *vartype {
                        Vartype::Binary => f64::from(rng.gen_range(0..=1u8)),
                        Vartype::Integer { lower, upper } => rng.gen_range(lower..=upper) as f64,
                    };
                    (name.clone(), value)
                })
                .collect();
            let mut energy = (target.energy)(&assignment);
            let mut temp = self.initial_temp;

            for _ in 0..self.sweeps {
                for (name, vartype) in &target.variables {
                    let current = assignment[name];
                    let proposal = match *vartype {
                        Vartype::Binary => 1.0 - current,
                        Vartype::Integer { lower, upper } => {
                            let step = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
                            (current + step).clamp(lower as f64, upper as f64)
                        }
                    };
                    if proposal == current {
                        continue;
                    }
                    assignment.insert(name.clone(), proposal);
                    let proposed_energy = (target.energy)(&assignment);
                    let delta = proposed_energy - energy;
                    if delta <= 0.0 || rng.gen::<f64>() < (-delta / temp).exp() {
                        energy = proposed_energy;
                    } else {
                        assignment.insert(name.clone(), current);
                    }
                }
                temp = (temp * self.decay).max(1e-3);
            }

            results.push(assignment);
        }
        results
    }
}

impl AnnealingSampler for LocalAnnealingSampler {
    fn sample_bqm(
        &self,
        model: &BinaryQuadraticModel,
        _label: &str,
        params: &SampleParams,
    ) -> Result<SampleSet> {
        let target = Target {
            variables: model.qm.variables().map(|(n, t)| (n.to_string(), t)).collect(),
            energy: Box::new(|a| model.qm.energy(a)),
        };
        let rows = self
            .anneal(&target, params)
            .into_iter()
            .map(|assignment| {
                let energy = model.qm.energy(&assignment);
                SampleRow { assignment, energy, is_feasible: true }
            })
            .collect();
        Ok(SampleSet::from_rows(rows))
    }

    fn sample_dqm(
        &self,
        model: &DiscreteQuadraticModel,
        _label: &str,
        params: &SampleParams,
    ) -> Result<SampleSet> {
        let target = Target {
            variables: model.qm.variables().map(|(n, t)| (n.to_string(), t)).collect(),
            energy: Box::new(|a| model.qm.energy(a)),
        };
        let rows = self
            .anneal(&target, params)
            .into_iter()
            .map(|assignment| {
                let energy = model.qm.energy(&assignment);
                SampleRow { assignment, energy, is_feasible: true }
            })
            .collect();
        Ok(SampleSet::from_rows(rows))
    }

    fn sample_cqm(
        &self,
        model: &ConstrainedQuadraticModel,
        _label: &str,
        params: &SampleParams,
    ) -> Result<SampleSet> {
        // Violations are annealed away through a quadratic penalty scaled
        // to dominate the objective coefficients.
        let scale = model
            .objective
            .variables()
            .map(|(n, _)| model.objective.linear_coeff(n).unwrap_or(0.0).abs())
            .fold(1.0_f64, f64::max);
        let weight = 10.0 * scale;
        let target = Target {
            variables: model
                .objective
                .variables()
                .map(|(n, t)| (n.to_string(), t))
                .collect(),
            energy: Box::new(move |a| {
                let violation = model.total_violation(a);
                model.objective.energy(a) + weight * violation * violation
            }),
        };
        let rows = self
            .anneal(&target, params)
            .into_iter()
            .map(|assignment| {
                let energy = model.objective.energy(&assignment);
                let is_feasible = model.is_feasible(&assignment);
                SampleRow { assignment, energy, is_feasible }
            })
            .collect();
        Ok(SampleSet::from_rows(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quadratic::QuadraticModel;
    use vqo_model::Comparator;

    fn seeded() -> SampleParams {
        SampleParams {
            num_reads: 20,
            time_limit: None,
            seed: Some(42),
        }
    }

    #[test]
    fn test_bqm_finds_ground_state() {
        // E = -x0 - x1 + 2 x0 x1: ground states are 10 and 01 at -1
        let mut bqm = BinaryQuadraticModel::new();
        bqm.add_variable("x0");
        bqm.add_variable("x1");
        bqm.qm.set_linear("x0", -1.0).unwrap();
        bqm.qm.set_linear("x1", -1.0).unwrap();
        bqm.qm.set_quadratic("x0", "x1", 2.0).unwrap();

        let sampler = LocalAnnealingSampler::default();
        let set = sampler.sample_bqm(&bqm, "test", &seeded()).unwrap();
        assert_eq!(set.first().unwrap().energy, -1.0);
    }

    #[test]
    fn test_cqm_marks_feasibility() {
        // Minimize -x0 - x1 subject to x0 + x1 <= 1
        let mut cqm = ConstrainedQuadraticModel::new();
        let mut obj = QuadraticModel::new();
        obj.add_variable("x0", Vartype::Binary);
        obj.add_variable("x1", Vartype::Binary);
        obj.set_linear("x0", -1.0).unwrap();
        obj.set_linear("x1", -1.0).unwrap();
        cqm.set_objective(obj);

        let mut lhs = QuadraticModel::new();
        lhs.add_variable("x0", Vartype::Binary);
        lhs.add_variable("x1", Vartype::Binary);
        lhs.set_linear("x0", 1.0).unwrap();
        lhs.set_linear("x1", 1.0).unwrap();
        cqm.add_constraint("cap", lhs, Comparator::LessEqual, 1.0);

        let sampler = LocalAnnealingSampler::default();
        let set = sampler
            .sample_cqm(&cqm, "test", &seeded())
            .unwrap()
            .filter_feasible();
        assert!(!set.is_empty());
        let best = set.first().unwrap();
        assert_eq!(best.energy, -1.0);
        assert!(cqm.is_feasible(&best.assignment));
    }

    #[test]
    fn test_dqm_integer_moves_stay_in_bounds() {
        let mut dqm = DiscreteQuadraticModel::new();
        dqm.add_variable("y", 0, 3);
        dqm.qm.set_linear("y", 1.0).unwrap();

        let sampler = LocalAnnealingSampler::default();
        let set = sampler.sample_dqm(&dqm, "test", &seeded()).unwrap();
        for row in set.rows() {
            let y = row.assignment["y"];
            assert!((0.0..=3.0).contains(&y));
        }
        assert_eq!(set.first().unwrap().energy, 0.0);
    }
}
