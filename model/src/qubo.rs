//! QUBO encoding of an optimization model
//!
//! The encoder applies the standard penalty method: every linear equality is
//! added as `penalty * (lhs - rhs)^2`, every inequality becomes an equality
//! through a slack binary expansion sized to the integer range of
//! `rhs - lhs`, and integer variables are bit-expanded. The resulting QUBO
//! is always a minimization; a maximizing objective has its coefficients
//! negated on the way in.

use crate::error::{ModelError, Result};
use crate::{Expression, Model, Sense, VarKind};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// Quadratic Unconstrained Binary Optimization problem
///
/// `linear` is the dense vector `h`, `quadratic` the symmetric matrix `J`
/// (stored row-major, zero diagonal). `offset` carries the constant produced
/// by penalty expansion so that the energy of a feasible assignment equals
/// the (sign-adjusted) objective exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Qubo {
    num_vars: usize,
    linear: Vec<f64>,
    quadratic: Vec<f64>,
    offset: f64,
}

impl Qubo {
    pub fn new(num_vars: usize) -> Self {
        Self {
            num_vars,
            linear: vec![0.0; num_vars],
            quadratic: vec![0.0; num_vars * num_vars],
            offset: 0.0,
        }
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    pub fn linear(&self, i: usize) -> f64 {
        self.linear[i]
    }

    /// Coefficient of `x_i * x_j`; symmetric
    pub fn quadratic(&self, i: usize, j: usize) -> f64 {
        self.quadratic[i * self.num_vars + j]
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn add_linear(&mut self, i: usize, coeff: f64) {
        self.linear[i] += coeff;
    }

    /// Add `coeff * x_i * x_j`; the diagonal folds into the linear part
    pub fn add_quadratic(&mut self, i: usize, j: usize, coeff: f64) {
        if i == j {
            self.linear[i] += coeff;
            return;
        }
        self.quadratic[i * self.num_vars + j] += coeff;
        self.quadratic[j * self.num_vars + i] += coeff;
    }

    pub fn add_offset(&mut self, value: f64) {
        self.offset += value;
    }

    /// Linear angle adjustment used by the cost unitary: `h_i + sum_j J_ij`
    pub fn linear_plus_row_sum(&self, i: usize) -> f64 {
        let row = &self.quadratic[i * self.num_vars..(i + 1) * self.num_vars];
        self.linear[i] + row.iter().sum::<f64>()
    }

    /// Energy of a binary sample
    pub fn evaluate(&self, sample: &[u8]) -> f64 {
        let mut energy = self.offset;
        for i in 0..self.num_vars {
            if sample[i] != 0 {
                energy += self.linear[i];
                for j in (i + 1)..self.num_vars {
                    if sample[j] != 0 {
                        energy += self.quadratic(i, j);
                    }
                }
            }
        }
        energy
    }

    /// Quadratic part as a dense symmetric matrix
    pub fn quadratic_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_row_slice(self.num_vars, self.num_vars, &self.quadratic)
    }
}

/// One original variable's footprint in the expanded binary space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct VarSpan {
    name: String,
    /// Index of the first expansion bit
    start: usize,
    /// Bit weights; empty for a fixed variable
    weights: Vec<f64>,
    /// Constant offset (integer lower bound)
    offset: f64,
}

impl VarSpan {
    fn value(&self, bits: &[u8]) -> f64 {
        let mut value = self.offset;
        for (k, &w) in self.weights.iter().enumerate() {
            value += w * f64::from(bits[self.start + k]);
        }
        value
    }
}

/// Maps expanded binary assignments back to original variable values
///
/// Slack bits introduced by inequality penalization are not part of any
/// span; they are simply ignored on interpretation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuboInterpreter {
    spans: Vec<VarSpan>,
    num_bits: usize,
}

impl QuboInterpreter {
    /// Total number of QUBO bits, slack included
    pub fn num_bits(&self) -> usize {
        self.num_bits
    }

    /// Whether any variable occupies more than one bit
    pub fn has_expansion(&self) -> bool {
        self.num_bits > self.spans.len() || self.spans.iter().any(|s| s.weights.len() != 1)
    }

    /// Collapse an expanded binary assignment into original-variable values
    pub fn interpret(&self, bits: &[u8]) -> Vec<f64> {
        self.spans.iter().map(|span| span.value(bits)).collect()
    }
}

/// Number of bits needed to cover the integer range `0..=range`
fn bits_for_range(range: i64) -> usize {
    if range <= 0 {
        return 0;
    }
    (64 - (range as u64).leading_zeros()) as usize
}

/// A linear form over expanded bits: `sum coeff * b_i + constant`
#[derive(Debug, Clone, Default)]
struct BitLinear {
    terms: Vec<(usize, f64)>,
    constant: f64,
}

impl BitLinear {
    fn add(&mut self, bit: usize, coeff: f64) {
        self.terms.push((bit, coeff));
    }

    fn min_value(&self) -> f64 {
        self.constant + self.terms.iter().map(|&(_, c)| c.min(0.0)).sum::<f64>()
    }

    fn max_value(&self) -> f64 {
        self.constant + self.terms.iter().map(|&(_, c)| c.max(0.0)).sum::<f64>()
    }
}

/// Model to QUBO encoder
pub struct QuboEncoder {
    penalty: Option<f64>,
}

impl QuboEncoder {
    pub fn new() -> Self {
        Self { penalty: None }
    }

    /// Override the penalty factor; unset uses
    /// `1 + |largest objective coefficient|`
    pub fn with_penalty(penalty: Option<f64>) -> Self {
        Self { penalty }
    }

    /// Default penalty factor for a model
    pub fn default_penalty(model: &Model) -> f64 {
        let objective = model.objective();
        let max_coeff = objective
            .linear_terms()
            .map(|(_, c)| c.abs())
            .chain(objective.quadratic_terms().map(|(_, _, c)| c.abs()))
            .fold(0.0_f64, f64::max);
        1.0 + max_coeff
    }

    /// Encode a model into a QUBO and its interpreter
    pub fn encode(&self, model: &Model) -> Result<(Qubo, QuboInterpreter)> {
        model.validate()?;

        // Expansion table for the original variables
        let mut spans: Vec<VarSpan> = Vec::with_capacity(model.num_vars());
        let mut next_bit = 0usize;
        for var in model.variables() {
            let span = match var.kind {
                VarKind::Binary => VarSpan {
                    name: var.name.clone(),
                    start: next_bit,
                    weights: vec![1.0],
                    offset: 0.0,
                },
                VarKind::Integer { lower, upper } => {
                    let upper = upper.ok_or_else(|| {
                        ModelError::UnrepresentableModel(format!(
                            "integer variable '{}' has no upper bound",
                            var.name
                        ))
                    })?;
                    let bits = bits_for_range(upper - lower);
                    VarSpan {
                        name: var.name.clone(),
                        start: next_bit,
                        weights: (0..bits).map(|k| (1u64 << k) as f64).collect(),
                        offset: lower as f64,
                    }
                }
                VarKind::Continuous { .. } => {
                    return Err(ModelError::UnsupportedVariableKind(format!(
                        "continuous variable '{}' cannot be QUBO-encoded",
                        var.name
                    )))
                }
            };
            next_bit += span.weights.len();
            spans.push(span);
        }

        // Slack spans for inequality constraints
        let mut slacks: Vec<Option<(usize, Vec<f64>)>> = Vec::new();
        for constraint in model.constraints() {
            if constraint.lhs.has_quadratic() {
                return Err(ModelError::UnrepresentableModel(format!(
                    "constraint '{}' has quadratic terms",
                    constraint.label
                )));
            }
            let lhs = expand_linear(&constraint.lhs, &spans);
            let range = match constraint.comparator {
                crate::Comparator::Equal => None,
                crate::Comparator::LessEqual => Some(constraint.rhs - lhs.min_value()),
                crate::Comparator::GreaterEqual => Some(lhs.max_value() - constraint.rhs),
            };
            let slack = match range {
                None => None,
                Some(range) => {
                    if range < 0.0 {
                        return Err(ModelError::UnrepresentableModel(format!(
                            "constraint '{}' cannot be satisfied",
                            constraint.label
                        )));
                    }
                    let bits = bits_for_range(range.floor() as i64);
                    let weights: Vec<f64> = (0..bits).map(|k| (1u64 << k) as f64).collect();
                    let start = next_bit;
                    next_bit += bits;
                    Some((start, weights))
                }
            };
            slacks.push(slack);
        }

        let num_bits = next_bit;
        let mut qubo = Qubo::new(num_bits);

        // Objective, negated for maximization (the QUBO always minimizes)
        let sense_multiplier = match model.sense() {
            Sense::Minimize => 1.0,
            Sense::Maximize => -1.0,
        };
        add_expression(&mut qubo, model.objective(), &spans, sense_multiplier);

        // Penalized constraints
        let penalty = self.penalty.unwrap_or_else(|| Self::default_penalty(model));
        for (constraint, slack) in model.constraints().iter().zip(&slacks) {
            let mut residual = expand_linear(&constraint.lhs, &spans);
            residual.constant -= constraint.rhs;
            if let Some((start, weights)) = slack {
                let sign = match constraint.comparator {
                    crate::Comparator::LessEqual => 1.0,
                    crate::Comparator::GreaterEqual => -1.0,
                    crate::Comparator::Equal => unreachable!("no slack on equalities"),
                };
                for (k, &w) in weights.iter().enumerate() {
                    residual.add(start + k, sign * w);
                }
            }
            add_squared(&mut qubo, &residual, penalty);
        }

        let interpreter = QuboInterpreter { spans, num_bits };
        Ok((qubo, interpreter))
    }
}

impl Default for QuboEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Expand a linear expression over model variables into bit space
fn expand_linear(expr: &Expression, spans: &[VarSpan]) -> BitLinear {
    let mut out = BitLinear {
        terms: Vec::new(),
        constant: expr.constant_term(),
    };
    for (var, coeff) in expr.linear_terms() {
        let span = &spans[var];
        out.constant += coeff * span.offset;
        for (k, &w) in span.weights.iter().enumerate() {
            out.add(span.start + k, coeff * w);
        }
    }
    out
}

/// Add `multiplier * expr` (linear + quadratic + constant) to the QUBO
fn add_expression(qubo: &mut Qubo, expr: &Expression, spans: &[VarSpan], multiplier: f64) {
    qubo.add_offset(multiplier * expr.constant_term());

    for (var, coeff) in expr.linear_terms() {
        let span = &spans[var];
        qubo.add_offset(multiplier * coeff * span.offset);
        for (k, &w) in span.weights.iter().enumerate() {
            qubo.add_linear(span.start + k, multiplier * coeff * w);
        }
    }

    for (i, j, coeff) in expr.quadratic_terms() {
        let (a, b) = (&spans[i], &spans[j]);
        let c = multiplier * coeff;
        qubo.add_offset(c * a.offset * b.offset);
        for (k, &wa) in a.weights.iter().enumerate() {
            qubo.add_linear(a.start + k, c * wa * b.offset);
        }
        for (l, &wb) in b.weights.iter().enumerate() {
            qubo.add_linear(b.start + l, c * wb * a.offset);
        }
        for (k, &wa) in a.weights.iter().enumerate() {
            for (l, &wb) in b.weights.iter().enumerate() {
                qubo.add_quadratic(a.start + k, b.start + l, c * wa * wb);
            }
        }
    }
}

/// Add `penalty * (sum coeff * b_i + constant)^2` to the QUBO
fn add_squared(qubo: &mut Qubo, form: &BitLinear, penalty: f64) {
    qubo.add_offset(penalty * form.constant * form.constant);
    for idx in 0..form.terms.len() {
        let (bit_i, a) = form.terms[idx];
        // b^2 == b for binaries
        qubo.add_linear(bit_i, penalty * (a * a + 2.0 * form.constant * a));
        for &(bit_j, b) in &form.terms[idx + 1..] {
            qubo.add_quadratic(bit_i, bit_j, penalty * 2.0 * a * b);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::linear_sum;
    use crate::{Comparator, Model};
    use approx::assert_relative_eq;

    fn knapsack(values: &[f64], weights: &[f64], capacity: f64) -> Model {
        let mut model = Model::new("knapsack");
        let vars = model.binary_var_list(values.len(), "x");
        let weight_expr = linear_sum(vars.iter().zip(weights).map(|(&v, &w)| (v, w)));
        model
            .constrain("capacity", weight_expr, Comparator::LessEqual, capacity)
            .unwrap();
        model.maximize(linear_sum(vars.iter().zip(values).map(|(&v, &c)| (v, c))));
        model
    }

    #[test]
    fn test_knapsack_slack_sizing() {
        // n originals + ceil(log2(C + 1)) slack bits
        let model = knapsack(
            &[10.0, 5.0, 18.0, 12.0, 15.0, 1.0, 2.0, 8.0],
            &[4.0, 2.0, 5.0, 4.0, 5.0, 1.0, 3.0, 5.0],
            15.0,
        );
        let (qubo, interpreter) = QuboEncoder::new().encode(&model).unwrap();
        assert_eq!(qubo.num_vars(), 8 + 4);
        assert_eq!(interpreter.num_bits(), 12);
        assert!(interpreter.has_expansion());
    }

    #[test]
    fn test_max_sense_round_trip() {
        // On a feasible expanded assignment the penalty vanishes and the
        // QUBO energy is exactly -f.
        let model = knapsack(&[3.0, 5.0, 2.0], &[2.0, 3.0, 1.0], 4.0);
        let (qubo, _) = QuboEncoder::new().encode(&model).unwrap();
        // Select items 1 and 2: value 7, weight 4, slack 0
        let bits = [0, 1, 1, 0, 0, 0];
        assert_relative_eq!(qubo.evaluate(&bits), -7.0, epsilon = 1e-9);

        // Select item 0 only: weight 2, slack must absorb 2 (bit pattern 01)
        let bits = [1, 0, 0, 0, 1, 0];
        assert_relative_eq!(qubo.evaluate(&bits), -3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_penalty_applies_to_violations() {
        let model = knapsack(&[3.0, 5.0], &[2.0, 3.0], 3.0);
        let (qubo, _) = QuboEncoder::with_penalty(Some(10.0)).encode(&model).unwrap();
        // Both selected: weight 5 > 3, residual 2 with zero slack
        let bits = [1, 1, 0, 0];
        assert_relative_eq!(qubo.evaluate(&bits), -8.0 + 10.0 * 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_integer_expansion() {
        let mut model = Model::new("int");
        let x = model.integer_var("x", 0, 5);
        model.minimize(linear_sum([(x, 1.0)]));

        let (qubo, interpreter) = QuboEncoder::new().encode(&model).unwrap();
        // Range 5 needs 3 bits
        assert_eq!(qubo.num_vars(), 3);
        assert_eq!(interpreter.interpret(&[1, 0, 1]), vec![5.0]);
        assert_eq!(interpreter.interpret(&[0, 1, 0]), vec![2.0]);
    }

    #[test]
    fn test_integer_lower_bound_offset() {
        let mut model = Model::new("int");
        let x = model.integer_var("x", 2, 5);
        model.minimize(linear_sum([(x, 1.0)]));

        let (qubo, interpreter) = QuboEncoder::new().encode(&model).unwrap();
        assert_eq!(qubo.num_vars(), 2);
        assert_eq!(interpreter.interpret(&[0, 0]), vec![2.0]);
        assert_eq!(interpreter.interpret(&[1, 1]), vec![5.0]);
        // Objective includes the lower-bound offset
        assert_relative_eq!(qubo.evaluate(&[0, 0]), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_unbounded_integer_rejected() {
        let mut model = Model::new("open");
        model.add_variable(crate::Variable {
            name: "x".into(),
            kind: crate::VarKind::Integer { lower: 0, upper: None },
        });
        model.minimize(linear_sum([(0, 1.0)]));
        let err = QuboEncoder::new().encode(&model);
        assert!(matches!(err, Err(ModelError::UnrepresentableModel(_))));
    }

    #[test]
    fn test_continuous_rejected() {
        let mut model = Model::new("cont");
        let x = model.continuous_var("x", 0.0, 1.0);
        model.minimize(linear_sum([(x, 1.0)]));
        let err = QuboEncoder::new().encode(&model);
        assert!(matches!(err, Err(ModelError::UnsupportedVariableKind(_))));
    }

    #[test]
    fn test_default_penalty() {
        let model = knapsack(&[3.0, 18.0], &[1.0, 1.0], 1.0);
        assert_relative_eq!(QuboEncoder::default_penalty(&model), 19.0);
    }

    #[test]
    fn test_linear_plus_row_sum() {
        let mut qubo = Qubo::new(3);
        qubo.add_linear(0, 1.5);
        qubo.add_quadratic(0, 1, 2.0);
        qubo.add_quadratic(0, 2, -1.0);
        assert_relative_eq!(qubo.linear_plus_row_sum(0), 2.5);
    }
}
