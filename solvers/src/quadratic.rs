//! Native quadratic models for annealing backends
//!
//! The annealing path bypasses the circuit compiler entirely: a model is
//! translated into a constrained, discrete or binary quadratic model and
//! handed to a sampler.

use crate::error::{Result, SolverError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use vqo_model::Comparator;

/// Variable kind within a quadratic model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Vartype {
    Binary,
    Integer { lower: i64, upper: i64 },
}

/// A quadratic form over named variables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuadraticModel {
    variables: Vec<(String, Vartype)>,
    #[serde(skip)]
    index: HashMap<String, usize>,
    linear: Vec<f64>,
    quadratic: HashMap<(usize, usize), f64>,
}

impl QuadraticModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_variable(&mut self, name: impl Into<String>, vartype: Vartype) -> usize {
        let name = name.into();
        if let Some(&i) = self.index.get(&name) {
            return i;
        }
        let i = self.variables.len();
        self.index.insert(name.clone(), i);
        self.variables.push((name, vartype));
        self.linear.push(0.0);
        i
    }

    pub fn variables(&self) -> impl Iterator<Item = (&str, Vartype)> {
        self.variables.iter().map(|(n, t)| (n.as_str(), *t))
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    fn lookup(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| SolverError::UnknownVariable(name.to_string()))
    }

    pub fn set_linear(&mut self, name: &str, value: f64) -> Result<()> {
        let i = self.lookup(name)?;
        self.linear[i] = value;
        Ok(())
    }

    pub fn set_quadratic(&mut self, a: &str, b: &str, value: f64) -> Result<()> {
        let (i, j) = (self.lookup(a)?, self.lookup(b)?);
        let key = if i <= j { (i, j) } else { (j, i) };
        self.quadratic.insert(key, value);
        Ok(())
    }

    pub fn linear_coeff(&self, name: &str) -> Result<f64> {
        Ok(self.linear[self.lookup(name)?])
    }

    /// Energy of an assignment (variable name to value)
    pub fn energy(&self, assignment: &HashMap<String, f64>) -> f64 {
        let value = |i: usize| {
            assignment
                .get(&self.variables[i].0)
                .copied()
                .unwrap_or(0.0)
        };
        let mut total = 0.0;
        for i in 0..self.variables.len() {
            total += self.linear[i] * value(i);
        }
        for (&(i, j), &c) in &self.quadratic {
            total += c * value(i) * value(j);
        }
        total
    }

    /// Rebuild the name index (after deserialization)
    pub fn reindex(&mut self) {
        self.index = self
            .variables
            .iter()
            .enumerate()
            .map(|(i, (n, _))| (n.clone(), i))
            .collect();
    }
}

/// Quadratic model over binary variables only
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BinaryQuadraticModel {
    pub qm: QuadraticModel,
}

impl BinaryQuadraticModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_variable(&mut self, name: impl Into<String>) -> usize {
        self.qm.add_variable(name, Vartype::Binary)
    }
}

/// Quadratic model over bounded integer variables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscreteQuadraticModel {
    pub qm: QuadraticModel,
}

impl DiscreteQuadraticModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_variable(&mut self, name: impl Into<String>, lower: i64, upper: i64) -> usize {
        self.qm.add_variable(name, Vartype::Integer { lower, upper })
    }
}

/// One constraint of a constrained quadratic model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuadraticConstraint {
    pub label: String,
    pub lhs: QuadraticModel,
    pub sense: Comparator,
    pub rhs: f64,
}

impl QuadraticConstraint {
    pub fn is_satisfied(&self, assignment: &HashMap<String, f64>) -> bool {
        self.sense.holds(self.lhs.energy(assignment), self.rhs)
    }

    /// Signed violation magnitude; zero when satisfied
    pub fn violation(&self, assignment: &HashMap<String, f64>) -> f64 {
        let lhs = self.lhs.energy(assignment);
        match self.sense {
            Comparator::LessEqual => (lhs - self.rhs).max(0.0),
            Comparator::GreaterEqual => (self.rhs - lhs).max(0.0),
            Comparator::Equal => (lhs - self.rhs).abs(),
        }
    }
}

/// Objective plus labeled constraints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConstrainedQuadraticModel {
    pub objective: QuadraticModel,
    pub constraints: Vec<QuadraticConstraint>,
}

impl ConstrainedQuadraticModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_objective(&mut self, objective: QuadraticModel) {
        self.objective = objective;
    }

    pub fn add_constraint(
        &mut self,
        label: impl Into<String>,
        lhs: QuadraticModel,
        sense: Comparator,
        rhs: f64,
    ) {
        self.constraints.push(QuadraticConstraint {
            label: label.into(),
            lhs,
            sense,
            rhs,
        });
    }

    pub fn is_feasible(&self, assignment: &HashMap<String, f64>) -> bool {
        self.constraints.iter().all(|c| c.is_satisfied(assignment))
    }

    /// Sum of constraint violations
    pub fn total_violation(&self, assignment: &HashMap<String, f64>) -> f64 {
        self.constraints.iter().map(|c| c.violation(assignment)).sum()
    }
}

/// One sampled assignment with its energy and feasibility
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleRow {
    pub assignment: HashMap<String, f64>,
    pub energy: f64,
    pub is_feasible: bool,
}

/// Collection of samples, ordered by ascending energy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SampleSet {
    rows: Vec<SampleRow>,
}

impl SampleSet {
    pub fn from_rows(mut rows: Vec<SampleRow>) -> Self {
        rows.sort_by(|a, b| a.energy.partial_cmp(&b.energy).expect("finite energies"));
        Self { rows }
    }

    pub fn rows(&self) -> &[SampleRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keep only feasible rows
    pub fn filter_feasible(self) -> Self {
        Self {
            rows: self.rows.into_iter().filter(|r| r.is_feasible).collect(),
        }
    }

    /// Lowest-energy row
    pub fn first(&self) -> Option<&SampleRow> {
        self.rows.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|&(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn test_energy() {
        let mut qm = QuadraticModel::new();
        qm.add_variable("a", Vartype::Binary);
        qm.add_variable("b", Vartype::Binary);
        qm.set_linear("a", 2.0).unwrap();
        qm.set_quadratic("a", "b", -3.0).unwrap();

        assert_eq!(qm.energy(&assignment(&[("a", 1.0), ("b", 1.0)])), -1.0);
        assert_eq!(qm.energy(&assignment(&[("a", 1.0), ("b", 0.0)])), 2.0);
        assert!(qm.set_linear("missing", 1.0).is_err());
    }

    #[test]
    fn test_cqm_feasibility() {
        let mut cqm = ConstrainedQuadraticModel::new();
        let mut obj = QuadraticModel::new();
        obj.add_variable("x", Vartype::Binary);
        obj.set_linear("x", -1.0).unwrap();
        cqm.set_objective(obj);

        let mut lhs = QuadraticModel::new();
        lhs.add_variable("x", Vartype::Binary);
        lhs.set_linear("x", 1.0).unwrap();
        cqm.add_constraint("cap", lhs, Comparator::LessEqual, 0.0);

        assert!(cqm.is_feasible(&assignment(&[("x", 0.0)])));
        assert!(!cqm.is_feasible(&assignment(&[("x", 1.0)])));
        assert_eq!(cqm.total_violation(&assignment(&[("x", 1.0)])), 1.0);
    }

    #[test]
    fn test_sampleset_ordering_and_filter() {
        let rows = vec![
            SampleRow { assignment: assignment(&[]), energy: 3.0, is_feasible: true },
            SampleRow { assignment: assignment(&[]), energy: -1.0, is_feasible: false },
            SampleRow { assignment: assignment(&[]), energy: 0.5, is_feasible: true },
        ];
        let set = SampleSet::from_rows(rows);
        assert_eq!(set.first().unwrap().energy, -1.0);

        let feasible = set.filter_feasible();
        assert_eq!(feasible.first().unwrap().energy, 0.5);
        assert_eq!(feasible.rows().len(), 2);
    }
}
