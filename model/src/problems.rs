//! Ready-made model builders for common combinatorial problems

use crate::error::Result;
use crate::expr::linear_sum;
use crate::{Comparator, Expression, Model};
use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;

/// Binary knapsack: maximize total value under a single capacity constraint
///
/// `values` and `weights` must have the same length.
pub fn knapsack(name: &str, values: &[f64], weights: &[f64], capacity: f64) -> Result<Model> {
    if values.len() != weights.len() {
        return Err(crate::ModelError::InvalidModel(format!(
            "{} values but {} weights",
            values.len(),
            weights.len()
        )));
    }
    let mut model = Model::new(name);
    let vars = model.binary_var_list(values.len(), "x");

    let weight_expr = linear_sum(vars.iter().zip(weights).map(|(&v, &w)| (v, w)));
    model.constrain("capacity", weight_expr, Comparator::LessEqual, capacity)?;

    model.maximize(linear_sum(vars.iter().zip(values).map(|(&v, &c)| (v, c))));
    Ok(model)
}

/// Knapsack over integer item counts, each item bounded by `max_count`
pub fn integer_knapsack(
    name: &str,
    values: &[f64],
    weights: &[f64],
    capacity: f64,
    max_count: i64,
) -> Result<Model> {
    if values.len() != weights.len() {
        return Err(crate::ModelError::InvalidModel(format!(
            "{} values but {} weights",
            values.len(),
            weights.len()
        )));
    }
    let mut model = Model::new(name);
    let vars: Vec<usize> = (0..values.len())
        .map(|i| model.integer_var(format!("x{}", i), 0, max_count))
        .collect();

    let weight_expr = linear_sum(vars.iter().zip(weights).map(|(&v, &w)| (v, w)));
    model.constrain("capacity", weight_expr, Comparator::LessEqual, capacity)?;

    model.maximize(linear_sum(vars.iter().zip(values).map(|(&v, &c)| (v, c))));
    Ok(model)
}

/// Weighted max-cut over an undirected graph
///
/// The unconstrained QUBO-shaped objective counts cut edges:
/// `max sum_i (sum_j w_ij) x_i - sum_{i,j} w_ij x_i x_j`.
pub fn max_cut(name: &str, graph: &UnGraph<(), f64>) -> Model {
    let n = graph.node_count();
    let mut model = Model::new(name);
    let vars = model.binary_var_list(n, "x");

    let mut objective = Expression::new();
    for edge in graph.edge_references() {
        let (i, j) = (edge.source().index(), edge.target().index());
        let w = *edge.weight();
        objective.add_linear(vars[i], w);
        objective.add_linear(vars[j], w);
        objective.add_quadratic(vars[i], vars[j], -2.0 * w);
    }
    model.maximize(objective);
    model
}
