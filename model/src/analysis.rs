//! Constraint-pattern analysis
//!
//! Classifies a model's constraint set into the patterns the mixer library
//! understands: cardinality, partition, inequality, multiple, or
//! unconstrained. Detection runs over the full constraint set; when more
//! than one pattern matches, the primary type is the first detected and the
//! rest go to `additional_constraints`.

use crate::{Comparator, Constraint, Model, VarKind};
use serde::{Deserialize, Serialize};

/// Constraint pattern recognized by the analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstraintType {
    Unconstrained,
    Cardinality,
    Partition,
    Inequality,
    Multiple,
}

impl std::fmt::Display for ConstraintType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConstraintType::Unconstrained => "unconstrained",
            ConstraintType::Cardinality => "cardinality",
            ConstraintType::Partition => "partition",
            ConstraintType::Inequality => "inequality",
            ConstraintType::Multiple => "multiple",
        };
        f.write_str(s)
    }
}

/// Outcome of the constraint analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintInfo {
    pub constraint_type: ConstraintType,
    /// Right side of the first cardinality constraint, when detected
    pub cardinality_k: Option<f64>,
    /// (comparator, rhs) of each detected inequality constraint
    pub inequality_bounds: Vec<(Comparator, f64)>,
    /// Secondary patterns when `constraint_type` is `Multiple`
    pub additional_constraints: Vec<ConstraintType>,
}

impl ConstraintInfo {
    pub fn unconstrained() -> Self {
        Self {
            constraint_type: ConstraintType::Unconstrained,
            cardinality_k: None,
            inequality_bounds: Vec::new(),
            additional_constraints: Vec::new(),
        }
    }

    /// All detected patterns, primary first
    pub fn all_types(&self) -> Vec<ConstraintType> {
        match self.constraint_type {
            ConstraintType::Multiple => self.additional_constraints.clone(),
            t => vec![t],
        }
    }
}

fn is_cardinality(constraint: &Constraint, model: &Model) -> bool {
    if constraint.comparator != Comparator::Equal || constraint.lhs.has_quadratic() {
        return false;
    }
    let unit_binary = constraint.lhs.linear_terms().all(|(var, coeff)| {
        coeff == 1.0
            && model
                .variable(var)
                .map(|v| v.kind == VarKind::Binary)
                .unwrap_or(false)
    });
    let rhs = constraint.rhs;
    unit_binary
        && constraint.lhs.linear_terms().next().is_some()
        && rhs >= 0.0
        && rhs.fract() == 0.0
}

fn is_partition(constraint: &Constraint) -> bool {
    if constraint.comparator != Comparator::Equal
        || constraint.rhs != 0.0
        || constraint.lhs.has_quadratic()
    {
        return false;
    }
    let mut coefs: Vec<f64> = constraint.lhs.linear_coefficients();
    coefs.sort_by(|a, b| a.partial_cmp(b).expect("finite coefficients"));
    coefs.dedup();
    coefs == [-1.0, 1.0]
}

fn is_inequality(constraint: &Constraint) -> bool {
    matches!(
        constraint.comparator,
        Comparator::LessEqual | Comparator::GreaterEqual
    ) && !constraint.lhs.linear_terms().all(|(_, c)| c == 1.0)
}

/// Classify the constraint set of a model
pub fn analyze(model: &Model) -> ConstraintInfo {
    if !model.has_constraints() {
        return ConstraintInfo::unconstrained();
    }

    let mut detected: Vec<ConstraintType> = Vec::new();
    let mut cardinality_k = None;
    let mut inequality_bounds = Vec::new();

    for constraint in model.constraints() {
        if is_cardinality(constraint, model) {
            if !detected.contains(&ConstraintType::Cardinality) {
                detected.push(ConstraintType::Cardinality);
                cardinality_k = Some(constraint.rhs);
            }
        }
    }

    if model.constraints().iter().any(is_partition) {
        detected.push(ConstraintType::Partition);
    }

    for constraint in model.constraints() {
        if is_inequality(constraint) {
            if !detected.contains(&ConstraintType::Inequality) {
                detected.push(ConstraintType::Inequality);
            }
            inequality_bounds.push((constraint.comparator, constraint.rhs));
        }
    }

    match detected.len() {
        0 => ConstraintInfo::unconstrained(),
        1 => ConstraintInfo {
            constraint_type: detected[0],
            cardinality_k,
            inequality_bounds,
            additional_constraints: Vec::new(),
        },
        _ => ConstraintInfo {
            constraint_type: ConstraintType::Multiple,
            cardinality_k,
            inequality_bounds,
            additional_constraints: detected,
        },
    }
}
