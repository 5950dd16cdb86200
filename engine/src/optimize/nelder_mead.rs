//! Nelder-Mead downhill simplex

use super::{CostFn, OptimizeResult, Optimizer};
use crate::error::Result;

/// Downhill simplex minimizer
///
/// Standard reflection/expansion/contraction/shrink coefficients; stops
/// when the objective spread over the simplex falls below the tolerance or
/// the evaluation budget runs out.
pub struct NelderMead {
    pub alpha: f64,
    pub gamma: f64,
    pub rho: f64,
    pub sigma: f64,
}

impl Default for NelderMead {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            gamma: 2.0,
            rho: 0.5,
            sigma: 0.5,
        }
    }
}

fn centroid(points: &[Vec<f64>], exclude: usize) -> Vec<f64> {
    let n = points[0].len();
    let mut center = vec![0.0; n];
    for (i, p) in points.iter().enumerate() {
        if i == exclude {
            continue;
        }
        for k in 0..n {
            center[k] += p[k];
        }
    }
    let m = (points.len() - 1) as f64;
    center.iter_mut().for_each(|v| *v /= m);
    center
}

fn blend(a: &[f64], b: &[f64], t: f64) -> Vec<f64> {
    a.iter().zip(b).map(|(&x, &y)| x + t * (y - x)).collect()
}

impl Optimizer for NelderMead {
    fn minimize(
        &self,
        f: &mut CostFn<'_>,
        x0: &[f64],
        tol: f64,
        max_iter: usize,
    ) -> Result<OptimizeResult> {
        let n = x0.len();
        let mut evaluations = 0usize;
        let mut eval = |f: &mut CostFn<'_>, x: &[f64], evals: &mut usize| -> Result<f64> {
            *evals += 1;
            f(x)
        };

        // Initial simplex: x0 plus a nudge along each axis
        let mut simplex: Vec<Vec<f64>> = vec![x0.to_vec()];
        for i in 0..n {
            let mut p = x0.to_vec();
            p[i] = if p[i] != 0.0 { p[i] * 1.05 } else { 0.00025 };
            simplex.push(p);
        }
        let mut values: Vec<f64> = Vec::with_capacity(n + 1);
        for p in &simplex {
            values.push(eval(f, p, &mut evaluations)?);
        }

        let mut converged = false;
        while evaluations < max_iter {
            // Order: best first
            let mut order: Vec<usize> = (0..simplex.len()).collect();
            order.sort_by(|&a, &b| values[a].partial_cmp(&values[b]).expect("finite cost"));
            simplex = order.iter().map(|&i| simplex[i].clone()).collect();
            values = order.iter().map(|&i| values[i]).collect();

            if values[n] - values[0] < tol {
                converged = true;
                break;
            }

            let center = centroid(&simplex, n);
            let reflected = blend(&center, &simplex[n], -self.alpha);
            let f_reflected = eval(f, &reflected, &mut evaluations)?;

            if f_reflected < values[0] {
                // Try expanding further
                let expanded = blend(&center, &simplex[n], -self.alpha * self.gamma);
                let f_expanded = eval(f, &expanded, &mut evaluations)?;
                if f_expanded < f_reflected {
                    simplex[n] = expanded;
                    values[n] = f_expanded;
                } else {
                    simplex[n] = reflected;
                    values[n] = f_reflected;
                }
            } else if f_reflected < values[n - 1] {
                simplex[n] = reflected;
                values[n] = f_reflected;
            } else {
                let contracted = blend(&center, &simplex[n], self.rho);
                let f_contracted = eval(f, &contracted, &mut evaluations)?;
                if f_contracted < values[n] {
                    simplex[n] = contracted;
                    values[n] = f_contracted;
                } else {
                    // Shrink toward the best point
                    for i in 1..=n {
                        simplex[i] = blend(&simplex[0], &simplex[i], self.sigma);
                        values[i] = eval(f, &simplex[i], &mut evaluations)?;
                    }
                }
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
