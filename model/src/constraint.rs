//! Linear constraints

use crate::Expression;
use serde::{Deserialize, Serialize};

/// Comparison operator of a constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparator {
    LessEqual,
    Equal,
    GreaterEqual,
}

impl Comparator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Comparator::LessEqual => "<=",
            Comparator::Equal => "==",
            Comparator::GreaterEqual => ">=",
        }
    }

    /// Whether `lhs (op) rhs` holds
    pub fn holds(&self, lhs: f64, rhs: f64) -> bool {
        const TOL: f64 = 1e-9;
        match self {
            Comparator::LessEqual => lhs <= rhs + TOL,
            Comparator::Equal => (lhs - rhs).abs() <= TOL,
            Comparator::GreaterEqual => lhs + TOL >= rhs,
        }
    }
}

/// A labeled constraint `lhs (op) rhs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub label: String,
    pub lhs: Expression,
    pub comparator: Comparator,
    pub rhs: f64,
}

impl Constraint {
    pub fn new(
        label: impl Into<String>,
        lhs: Expression,
        comparator: Comparator,
        rhs: f64,
    ) -> Self {
        Self { label: label.into(), lhs, comparator, rhs }
    }

    /// Whether the constraint is satisfied by the given assignment
    pub fn is_satisfied(&self, values: &[f64]) -> bool {
        self.comparator.holds(self.lhs.evaluate(values), self.rhs)
    }
}

impl std::fmt::Display for Comparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::linear_sum;

    #[test]
    fn test_satisfaction() {
        let c = Constraint::new(
            "cap",
            linear_sum([(0, 2.0), (1, 3.0)]),
            Comparator::LessEqual,
            5.0,
        );
        assert!(c.is_satisfied(&[1.0, 1.0]));
        assert!(!c.is_satisfied(&[1.0, 2.0]));
    }

    #[test]
    fn test_equality_tolerance() {
        assert!(Comparator::Equal.holds(1.0 + 1e-12, 1.0));
        assert!(!Comparator::Equal.holds(1.1, 1.0));
    }
}
