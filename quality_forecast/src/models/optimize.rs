//! Derivative-free minimisation used to estimate model parameters

/// Best point found by a minimiser
#[derive(Debug, Clone)]
pub struct Minimum {
    pub point: Vec<f64>,
    pub value: f64,
    pub iterations: usize,
}

/// Nelder-Mead downhill simplex
#[derive(Debug, Clone)]
pub struct NelderMead {
    max_iterations: usize,
    tolerance: f64,
}

impl Default for NelderMead {
    fn default() -> Self {
        Self {
            max_iterations: 5_000,
            tolerance: 1e-10,
        }
    }
}

impl NelderMead {
    pub fn new(max_iterations: usize, tolerance: f64) -> Self {
        Self {
            max_iterations,
            tolerance,
        }
    }

    /// Minimise `objective` starting from `start`
    ///
    /// `steps[i]` is the initial simplex offset along coordinate `i`.
    /// Non-finite objective values are treated as `+inf`.
    pub fn minimize<F>(&self, objective: F, start: &[f64], steps: &[f64]) -> Minimum
    where
        F: Fn(&[f64]) -> f64,
    {
        let eval = |x: &[f64]| {
            let v = objective(x);
            if v.is_finite() {
                v
            } else {
                f64::INFINITY
            }
        };

        let dim = start.len();
        let mut simplex: Vec<(Vec<f64>, f64)> = Vec::with_capacity(dim + 1);
        simplex.push((start.to_vec(), eval(start)));
        for i in 0..dim {
            let mut vertex = start.to_vec();
            vertex[i] += steps.get(i).copied().unwrap_or(0.1);
            let value = eval(&vertex);
            simplex.push((vertex, value));
        }

        let mut iterations = 0;
        while iterations < self.max_iterations && dim > 0 {
            simplex.sort_by(|a, b| a.1.total_cmp(&b.1));

            let best = simplex[0].1;
            let worst = simplex[dim].1;
            let anchor = &simplex[0].0;
            let size = simplex[1..]
                .iter()
                .flat_map(|(x, _)| x.iter().zip(anchor.iter()).map(|(a, b)| (a - b).abs()))
                .fold(0.0, f64::max);
            if (worst - best).abs() <= self.tolerance && size <= self.tolerance.sqrt() {
                break;
            }
            iterations += 1;

            let centroid: Vec<f64> = (0..dim)
                .map(|j| simplex[..dim].iter().map(|(x, _)| x[j]).sum::<f64>() / dim as f64)
                .collect();
            let toward = |from: &[f64], coeff: f64| -> Vec<f64> {
                centroid
                    .iter()
                    .zip(from.iter())
                    .map(|(c, x)| c + coeff * (x - c))
                    .collect()
            };

            let worst_point = simplex[dim].0.clone();
            let reflected = toward(&worst_point, -1.0);
            let f_reflected = eval(&reflected);

            if f_reflected < best {
                let expanded = toward(&worst_point, -2.0);
                let f_expanded = eval(&expanded);
                simplex[dim] = if f_expanded < f_reflected {
                    (expanded, f_expanded)
                } else {
                    (reflected, f_reflected)
                };
                continue;
            }

            if f_reflected < simplex[dim - 1].1 {
                simplex[dim] = (reflected, f_reflected);
                continue;
            }

            let (contracted, threshold) = if f_reflected < worst {
                (toward(&reflected, 0.5), f_reflected)
            } else {
                (toward(&worst_point, 0.5), worst)
            };
            let f_contracted = eval(&contracted);
            if f_contracted < threshold {
                simplex[dim] = (contracted, f_contracted);
                continue;
            }

            // shrink toward the best vertex
            let anchor = simplex[0].0.clone();
            for (vertex, value) in simplex.iter_mut().skip(1) {
                for (x, a) in vertex.iter_mut().zip(anchor.iter()) {
                    *x = a + 0.5 * (*x - a);
                }
                *value = eval(vertex);
            }
        }

        simplex.sort_by(|a, b| a.1.total_cmp(&b.1));
        let (point, value) = simplex.swap_remove(0);
        Minimum {
            point,
            value,
            iterations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn finds_the_minimum_of_a_quadratic_bowl() {
        let bowl = |x: &[f64]| (x[0] - 3.0).powi(2) + 2.0 * (x[1] + 1.0).powi(2);
        let result = NelderMead::default().minimize(bowl, &[0.0, 0.0], &[0.5, 0.5]);
        assert_abs_diff_eq!(result.point[0], 3.0, epsilon = 1e-4);
        assert_abs_diff_eq!(result.point[1], -1.0, epsilon = 1e-4);
        assert!(result.value < 1e-8);
    }

    #[test]
    fn rosenbrock_converges() {
        let rosenbrock = |x: &[f64]| (1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0] * x[0]).powi(2);
        let result = NelderMead::new(20_000, 1e-14).minimize(rosenbrock, &[-1.2, 1.0], &[0.1, 0.1]);
        assert_abs_diff_eq!(result.point[0], 1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(result.point[1], 1.0, epsilon = 1e-3);
    }

    #[test]
    fn non_finite_values_are_avoided() {
        let guarded = |x: &[f64]| if x[0] < 0.0 { f64::NAN } else { (x[0] - 1.0).powi(2) };
        let result = NelderMead::default().minimize(guarded, &[2.0], &[0.5]);
        assert_abs_diff_eq!(result.point[0], 1.0, epsilon = 1e-4);
    }
}
