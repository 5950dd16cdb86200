//! COBYLA-style linear-approximation trust region

use super::{CostFn, OptimizeResult, Optimizer};
use crate::error::Result;
use nalgebra::{DMatrix, DVector};

/// Derivative-free trust-region minimizer
///
/// Maintains an interpolation simplex of n+1 points, fits a linear model of
/// the objective through it, and steps against the model gradient within
/// the trust radius. The radius halves when a step fails to improve and
/// the run stops once it drops below the tolerance.
pub struct Cobyla {
    /// Initial trust radius
    pub rho_beg: f64,
}

impl Default for Cobyla {
    fn default() -> Self {
        Self { rho_beg: 0.5 }
    }
}

impl Optimizer for Cobyla {
    fn minimize(
        &self,
        f: &mut CostFn<'_>,
        x0: &[f64],
        tol: f64,
        max_iter: usize,
    ) -> Result<OptimizeResult> {
        let n = x0.len();
        let rho_end = tol.max(1e-12);
        let mut rho = self.rho_beg;
        let mut evaluations = 0usize;

        let mut eval = |f: &mut CostFn<'_>, x: &[f64], evals: &mut usize| -> Result<f64> {
            *evals += 1;
            f(x)
        };

        let build_simplex = |base: &[f64], rho: f64| -> Vec<Vec<f64>> {
            let mut points = vec![base.to_vec()];
            for i in 0..n {
                let mut p = base.to_vec();
                p[i] += rho;
                points.push(p);
            }
            points
        };

        let mut simplex = build_simplex(x0, rho);
        let mut values = Vec::with_capacity(n + 1);
        for p in &simplex {
            if evaluations >= max_iter {
                break;
            }
            values.push(eval(f, p, &mut evaluations)?);
        }
        while values.len() < simplex.len() {
            // Budget exhausted during setup; pad with the last value
            values.push(*values.last().unwrap_or(&f64::INFINITY));
        }

        let mut converged = false;
        while evaluations < max_iter {
            if rho <= rho_end {
                converged = true;
                break;
            }

            // Best point first
            let mut order: Vec<usize> = (0..simplex.len()).collect();
            order.sort_by(|&a, &b| values[a].partial_cmp(&values[b]).expect("finite cost"));
            simplex = order.iter().map(|&i| simplex[i].clone()).collect();
            values = order.iter().map(|&i| values[i]).collect();

            // Linear model through the simplex: (p_i - p_0) . g = f_i - f_0
            let rows: Vec<f64> = (1..=n)
                .flat_map(|i| {
                    (0..n)
                        .map(|k| simplex[i][k] - simplex[0][k])
                        .collect::<Vec<_>>()
                })
                .collect();
            let a = DMatrix::from_row_slice(n, n, &rows);
            let b = DVector::from_iterator(n, (1..=n).map(|i| values[i] - values[0]));

            let gradient = match a.lu().solve(&b) {
                Some(g) if g.norm() > 1e-14 => g,
                _ => {
                    // Degenerate geometry: rebuild around the best point
                    rho *= 0.5;
                    simplex = build_simplex(&simplex[0].clone(), rho);
                    values.truncate(1);
                    for p in simplex.iter().skip(1) {
                        if evaluations >= max_iter {
                            break;
                        }
                        values.push(eval(f, p, &mut evaluations)?);
                    }
                    while values.len() < simplex.len() {
                        values.push(values[0]);
                    }
                    continue;
                }
            };

            let direction = &gradient / gradient.norm();
            let candidate: Vec<f64> = simplex[0]
                .iter()
                .zip(direction.iter())
                .map(|(&x, &d)| x - rho * d)
                .collect();
            let f_candidate = eval(f, &candidate, &mut evaluations)?;

            if f_candidate < values[0] {
                simplex[n] = candidate;
                values[n] = f_candidate;
            } else {
                rho *= 0.5;
            }
        }

        let best = values
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.partial_cmp(b.1).expect("finite cost"))
            .map(|(i, _)| i)
            .unwrap_or(0);
        Ok(OptimizeResult {
            x: simplex[best].clone(),
            fun: values[best],
            evaluations,
            converged,
        })
    }
}
