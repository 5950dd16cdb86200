//! Solve results attached to a model

use crate::Model;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How a model was solved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveMethod {
    Classical,
    Quantum,
}

impl std::fmt::Display for SolveMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveMethod::Classical => f.write_str("classical"),
            SolveMethod::Quantum => f.write_str("quantum"),
        }
    }
}

/// Result of a solve: per-variable values plus run metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSolution {
    /// Variable name to value
    pub values: HashMap<String, f64>,
    /// Objective in the model's original sense
    pub objective: f64,
    /// Wall-clock solve time in seconds
    pub execution_time: f64,
    pub method: SolveMethod,
    pub provider: Option<String>,
    pub backend: Option<String>,
    pub algorithm: String,
}

impl ModelSolution {
    /// Value of a variable by name
    pub fn value(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Formatted textual report, variables in model declaration order
    pub fn report(&self, model: &Model) -> String {
        let mut out = String::new();
        out.push_str("Results\n");
        out.push_str("----------\n");
        out.push_str(&format!("Method: {}\n", self.method));
        out.push_str(&format!("Algorithm: {}\n", self.algorithm));
        out.push_str(&format!(
            "Provider: {}\n",
            self.provider.as_deref().unwrap_or("N/A")
        ));
        out.push_str(&format!(
            "Backend: {}\n",
            self.backend.as_deref().unwrap_or("N/A")
        ));
        out.push_str(&format!(
            "Execution time: {:.2} seconds\n",
            self.execution_time
        ));
        out.push_str(&format!("Objective: {}\n", self.objective));
        for var in model.variables() {
            if let Some(v) = self.value(&var.name) {
                out.push_str(&format!("  {} = {}\n", var.name, v));
            }
        }
        out.push_str("----------\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::linear_sum;
    use crate::Model;

    #[test]
    fn test_report_ordering() {
        let mut model = Model::new("m");
        model.binary_var("a");
        model.binary_var("b");
        model.maximize(linear_sum([(0, 1.0), (1, 1.0)]));

        let solution = ModelSolution {
            values: HashMap::from([("b".to_string(), 1.0), ("a".to_string(), 0.0)]),
            objective: 1.0,
            execution_time: 0.01,
            method: SolveMethod::Quantum,
            provider: Some("ibmq".to_string()),
            backend: Some("simulator".to_string()),
            algorithm: "qaoa".to_string(),
        };

        let report = solution.report(&model);
        let a_pos = report.find("a = 0").unwrap();
        let b_pos = report.find("b = 1").unwrap();
        assert!(a_pos < b_pos);
        assert!(report.contains("Provider: ibmq"));
    }
}
