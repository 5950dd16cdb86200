//! Result extraction
//!
//! Picks the most frequent bitstring (ties broken by lexicographically
//! smallest, so extraction is deterministic), undoes the QUBO variable
//! expansion and evaluates the true objective in the model's original
//! sense.

use crate::energy::parse_bitstring;
use crate::error::{EngineError, Result};
use std::collections::HashMap;
use vqo_model::{Model, QuboInterpreter};
use vqo_solvers::Counts;

/// The decoded best sample
#[derive(Debug, Clone)]
pub struct ExtractedSolution {
    /// Variable name to value, in model terms
    pub values: HashMap<String, f64>,
    /// Objective of the original (non-penalized) expression
    pub objective: f64,
}

/// Most frequent bitstring, ties broken lexicographically
pub fn best_bitstring(counts: &Counts) -> Option<&str> {
    counts
        .iter()
        .max_by(|(a_bits, a_count), (b_bits, b_count)| {
            a_count
                .cmp(b_count)
                .then_with(|| b_bits.cmp(a_bits)) // prefer the smaller string
        })
        .map(|(bits, _)| bits.as_str())
}

/// Decode the best sample of a histogram into a model solution
///
/// With an interpreter the expanded bits collapse back to original
/// variables; without one, bits map onto binary variables in declaration
/// order.
pub fn extract_solution(
    model: &Model,
    counts: &Counts,
    interpreter: Option<&QuboInterpreter>,
) -> Result<ExtractedSolution> {
    let best = best_bitstring(counts).ok_or_else(|| {
        EngineError::Solver(vqo_solvers::SolverError::BackendExecutionError(
            "adapter returned an empty histogram".to_string(),
        ))
    })?;
    let bits = parse_bitstring(best);

    let values: Vec<f64> = match interpreter {
        Some(interpreter) => {
            if bits.len() != interpreter.num_bits() {
                return Err(EngineError::Solver(
                    vqo_solvers::SolverError::BackendExecutionError(format!(
                        "histogram bitstrings have {} bits but the encoding has {}",
                        bits.len(),
                        interpreter.num_bits()
                    )),
                ));
            }
            interpreter.interpret(&bits)
        }
        None => bits.iter().map(|&b| f64::from(b)).collect(),
    };

    if values.len() < model.num_vars() {
        return Err(EngineError::Solver(
            vqo_solvers::SolverError::BackendExecutionError(format!(
                "sample decodes {} values but the model has {} variables",
                values.len(),
                model.num_vars()
            )),
        ));
    }

    let objective = model.evaluate_objective(&values);
    let named = model
        .variables()
        .iter()
        .zip(&values)
        .map(|(var, &v)| (var.name.clone(), v))
        .collect();

    Ok(ExtractedSolution {
        values: named,
        objective,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use vqo_model::{linear_sum, QuboEncoder};

    #[test]
    fn test_tie_break_is_lexicographic() {
        let counts = Counts::from([
            ("10".to_string(), 5u64),
            ("01".to_string(), 5u64),
            ("11".to_string(), 3u64),
        ]);
        assert_eq!(best_bitstring(&counts), Some("01"));
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let counts = Counts::from([
            ("10".to_string(), 4u64),
            ("01".to_string(), 4u64),
        ]);
        let mut model = Model::new("m");
        let vars = model.binary_var_list(2, "x");
        model.maximize(linear_sum([(vars[0], 3.0), (vars[1], 1.0)]));

        let first = extract_solution(&model, &counts, None).unwrap();
        let second = extract_solution(&model, &counts, None).unwrap();
        assert_eq!(first.values, second.values);
        assert_eq!(first.objective, 1.0); // "01": x0=0, x1=1
    }

    #[test]
    fn test_integer_decoding() {
        let mut model = Model::new("m");
        let x = model.integer_var("x", 0, 5);
        model.maximize(linear_sum([(x, 2.0)]));
        let (_, interpreter) = QuboEncoder::new().encode(&model).unwrap();

        // Bits 101 -> x = 5
        let counts = Counts::from([("101".to_string(), 9u64)]);
        let solution = extract_solution(&model, &counts, Some(&interpreter)).unwrap();
        assert_eq!(solution.values["x"], 5.0);
        assert_eq!(solution.objective, 10.0);
    }

    #[test]
    fn test_empty_histogram_is_an_error() {
        let model = Model::new("m");
        assert!(extract_solution(&model, &Counts::new(), None).is_err());
    }
}
