//! Optimization model - variables, constraints, objective

use crate::error::{ModelError, Result};
use crate::solution::ModelSolution;
use crate::{Comparator, Constraint, Expression, Variable};
use serde::{Deserialize, Serialize};

/// Optimization sense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sense {
    Minimize,
    Maximize,
}

/// An algebraic optimization model
///
/// Variables are ordered; the index returned by the `*_var` constructors is
/// the handle used in expressions. Constraint labels are unique. The model is
/// immutable across a solve and receives exactly one [`ModelSolution`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    name: String,
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    objective: Expression,
    sense: Sense,
    solution: Option<ModelSolution>,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
            constraints: Vec::new(),
            objective: Expression::new(),
            sense: Sense::Minimize,
            solution: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ==================== Variables ====================

    /// Add a binary variable, returning its index
    pub fn binary_var(&mut self, name: impl Into<String>) -> usize {
        self.push_var(Variable::binary(name))
    }

    /// Add `n` binary variables named `prefix0..prefix{n-1}`
    pub fn binary_var_list(&mut self, n: usize, prefix: &str) -> Vec<usize> {
        (0..n).map(|i| self.binary_var(format!("{}{}", prefix, i))).collect()
    }

    /// Add a bounded integer variable, returning its index
    pub fn integer_var(&mut self, name: impl Into<String>, lower: i64, upper: i64) -> usize {
        self.push_var(Variable::integer(name, lower, upper))
    }

    /// Add a continuous variable, returning its index
    pub fn continuous_var(&mut self, name: impl Into<String>, lower: f64, upper: f64) -> usize {
        self.push_var(Variable::continuous(name, lower, upper))
    }

    /// Add a pre-built variable, returning its index
    pub fn add_variable(&mut self, var: Variable) -> usize {
        self.push_var(var)
    }

    fn push_var(&mut self, var: Variable) -> usize {
        self.variables.push(var);
        self.variables.len() - 1
    }

    pub fn num_vars(&self) -> usize {
        self.variables.len()
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, index: usize) -> Option<&Variable> {
        self.variables.get(index)
    }

    /// Index of a variable by name
    pub fn var_index(&self, name: &str) -> Result<usize> {
        self.variables
            .iter()
            .position(|v| v.name == name)
            .ok_or_else(|| ModelError::UnknownVariable(name.to_string()))
    }

    pub fn has_integer_vars(&self) -> bool {
        self.variables.iter().any(|v| v.kind.is_integer())
    }

    pub fn has_continuous_vars(&self) -> bool {
        self.variables.iter().any(|v| v.kind.is_continuous())
    }

    // ==================== Constraints ====================

    /// Add a labeled constraint; labels must be unique
    pub fn add_constraint(&mut self, constraint: Constraint) -> Result<()> {
        if self.constraints.iter().any(|c| c.label == constraint.label) {
            return Err(ModelError::DuplicateConstraintLabel(constraint.label));
        }
        self.constraints.push(constraint);
        Ok(())
    }

    /// Shorthand for building and adding a constraint
    pub fn constrain(
        &mut self,
        label: impl Into<String>,
        lhs: Expression,
        comparator: Comparator,
        rhs: f64,
    ) -> Result<()> {
        self.add_constraint(Constraint::new(label, lhs, comparator, rhs))
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn has_constraints(&self) -> bool {
        !self.constraints.is_empty()
    }

    // ==================== Objective ====================

    pub fn set_objective(&mut self, sense: Sense, objective: Expression) {
        self.sense = sense;
        self.objective = objective;
    }

    pub fn minimize(&mut self, objective: Expression) {
        self.set_objective(Sense::Minimize, objective);
    }

    pub fn maximize(&mut self, objective: Expression) {
        self.set_objective(Sense::Maximize, objective);
    }

    pub fn objective(&self) -> &Expression {
        &self.objective
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    /// Evaluate the original-sense objective against an assignment
    pub fn evaluate_objective(&self, values: &[f64]) -> f64 {
        self.objective.evaluate(values)
    }

    /// Whether every constraint is satisfied by the assignment
    pub fn is_feasible(&self, values: &[f64]) -> bool {
        self.constraints.iter().all(|c| c.is_satisfied(values))
    }

    // ==================== Solution ====================

    /// Attach the solve result. A model holds at most one solution.
    pub fn attach_solution(&mut self, solution: ModelSolution) {
        self.solution = Some(solution);
    }

    pub fn solution(&self) -> Option<&ModelSolution> {
        self.solution.as_ref()
    }

    /// Validate structural invariants of the model
    pub fn validate(&self) -> Result<()> {
        let n = self.num_vars();
        let check = |expr: &Expression| -> Result<()> {
            if let Some(max) = expr.max_var() {
                if max >= n {
                    return Err(ModelError::InvalidModel(format!(
                        "expression references variable {} but model has {}",
                        max, n
                    )));
                }
            }
            Ok(())
        };
        check(&self.objective)?;
        for c in &self.constraints {
            check(&c.lhs)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::linear_sum;

    #[test]
    fn test_variable_ordering() {
        let mut model = Model::new("m");
        let x = model.binary_var("x");
        let y = model.integer_var("y", 0, 3);
        assert_eq!(x, 0);
        assert_eq!(y, 1);
        assert_eq!(model.var_index("y").unwrap(), 1);
        assert!(model.var_index("z").is_err());
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let mut model = Model::new("m");
        let x = model.binary_var("x");
        model
            .constrain("c0", linear_sum([(x, 1.0)]), Comparator::Equal, 1.0)
            .unwrap();
        let err = model.constrain("c0", linear_sum([(x, 1.0)]), Comparator::Equal, 0.0);
        assert!(matches!(err, Err(ModelError::DuplicateConstraintLabel(_))));
    }

    #[test]
    fn test_feasibility() {
        let mut model = Model::new("m");
        let vars = model.binary_var_list(3, "x");
        let sum = linear_sum(vars.iter().map(|&v| (v, 1.0)));
        model.constrain("card", sum, Comparator::Equal, 2.0).unwrap();
        assert!(model.is_feasible(&[1.0, 1.0, 0.0]));
        assert!(!model.is_feasible(&[1.0, 1.0, 1.0]));
    }

    #[test]
    fn test_validate_rejects_dangling_reference() {
        let mut model = Model::new("m");
        model.binary_var("x");
        model.maximize(linear_sum([(5, 1.0)]));
        assert!(model.validate().is_err());
    }
}
