//! Linear/quadratic expressions over model variables
//!
//! An expression is a sum of linear terms, quadratic terms and a constant.
//! Variables are referenced by their index in the owning model; quadratic
//! keys are normalized so that `i <= j`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sum of (coefficient x variable) + (coefficient x variable x variable) + constant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    linear: BTreeMap<usize, f64>,
    quadratic: BTreeMap<(usize, usize), f64>,
    constant: f64,
}

impl Expression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expression consisting of a single constant
    pub fn constant(value: f64) -> Self {
        Self { constant: value, ..Self::default() }
    }

    /// Add `coeff * x_var` to the expression
    pub fn add_linear(&mut self, var: usize, coeff: f64) -> &mut Self {
        *self.linear.entry(var).or_insert(0.0) += coeff;
        self
    }

    /// Add `coeff * x_i * x_j` to the expression
    pub fn add_quadratic(&mut self, i: usize, j: usize, coeff: f64) -> &mut Self {
        let key = if i <= j { (i, j) } else { (j, i) };
        *self.quadratic.entry(key).or_insert(0.0) += coeff;
        self
    }

    /// Add a constant offset
    pub fn add_constant(&mut self, value: f64) -> &mut Self {
        self.constant += value;
        self
    }

    /// Linear terms as (variable index, coefficient), ordered by index
    pub fn linear_terms(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.linear.iter().map(|(&i, &c)| (i, c))
    }

    /// Quadratic terms as (i, j, coefficient) with `i <= j`, ordered
    pub fn quadratic_terms(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.quadratic.iter().map(|(&(i, j), &c)| (i, j, c))
    }

    pub fn constant_term(&self) -> f64 {
        self.constant
    }

    pub fn has_quadratic(&self) -> bool {
        self.quadratic.values().any(|&c| c != 0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.linear.is_empty() && self.quadratic.is_empty() && self.constant == 0.0
    }

    /// Highest variable index referenced, if any
    pub fn max_var(&self) -> Option<usize> {
        let lin = self.linear.keys().next_back().copied();
        // Keys are ordered by (i, j), so the largest j can sit anywhere
        let quad = self.quadratic.keys().map(|&(_, j)| j).max();
        match (lin, quad) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        }
    }

    /// Set of coefficients appearing in the linear part
    pub fn linear_coefficients(&self) -> Vec<f64> {
        self.linear.values().copied().collect()
    }

    /// Scale every coefficient (including the constant)
    pub fn scale(&mut self, factor: f64) -> &mut Self {
        for c in self.linear.values_mut() {
            *c *= factor;
        }
        for c in self.quadratic.values_mut() {
            *c *= factor;
        }
        self.constant *= factor;
        self
    }

    /// Evaluate against a full assignment, indexed by variable
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        let mut total = self.constant;
        for (&i, &c) in &self.linear {
            total += c * values[i];
        }
        for (&(i, j), &c) in &self.quadratic {
            total += c * values[i] * values[j];
        }
        total
    }
}

/// Convenience builder used by the problem library and tests
pub fn linear_sum(terms: impl IntoIterator<Item = (usize, f64)>) -> Expression {
    let mut expr = Expression::new();
    for (var, coeff) in terms {
        expr.add_linear(var, coeff);
    }
    expr
}
