// Least-squares polynomial regression

#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    /// Lowest order first.
    pub coefficients: Vec<f64>,
}

impl Polynomial {
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
    }

    /// Fits `ys[i] ≈ p(i)` for evenly spaced samples.
    ///
    /// Returns `None` when there are no more samples than the degree or the
    /// normal equations are singular.
    pub fn fit(ys: &[f64], degree: usize) -> Option<Self> {
        let n = ys.len();
        if n <= degree {
            return None;
        }
        // Sample positions are scaled into [0, 1] to keep the normal matrix well conditioned.
        let scale = if n > 1 { (n - 1) as f64 } else { 1.0 };
        let xs: Vec<f64> = (0..n).map(|i| i as f64 / scale).collect();

        let size = degree + 1;
        let mut power_sums = vec![0.0; 2 * degree + 1];
        let mut rhs = vec![0.0; size];
        for (x, y) in xs.iter().zip(ys) {
            let mut p = 1.0;
            for (k, sum) in power_sums.iter_mut().enumerate() {
                *sum += p;
                if k < size {
                    rhs[k] += p * y;
                }
                p *= x;
            }
        }
        let mut matrix: Vec<Vec<f64>> = (0..size)
            .map(|row| power_sums[row..row + size].to_vec())
            .collect();

        let scaled = solve(&mut matrix, &mut rhs)?;
        // Undo the x scaling: c_k applies to (i / scale)^k.
        let coefficients = scaled
            .iter()
            .enumerate()
            .map(|(k, c)| c / scale.powi(k as i32))
            .collect();
        Some(Self { coefficients })
    }

    /// Fitted values at every sample position of the input.
    pub fn fitted(&self, len: usize) -> Vec<f64> {
        (0..len).map(|i| self.evaluate(i as f64)).collect()
    }
}

fn solve(matrix: &mut [Vec<f64>], rhs: &mut [f64]) -> Option<Vec<f64>> {
    let size = rhs.len();
    for col in 0..size {
        let pivot = (col..size).max_by(|&a, &b| matrix[a][col].abs().total_cmp(&matrix[b][col].abs()))?;
        if matrix[pivot][col].abs() < 1e-12 {
            return None;
        }
        matrix.swap(col, pivot);
        rhs.swap(col, pivot);
        for row in col + 1..size {
            let factor = matrix[row][col] / matrix[col][col];
            for k in col..size {
                matrix[row][k] -= factor * matrix[col][k];
            }
            rhs[row] -= factor * rhs[col];
        }
    }
    let mut solution = vec![0.0; size];
    for row in (0..size).rev() {
        let tail: f64 = (row + 1..size).map(|k| matrix[row][k] * solution[k]).sum();
        solution[row] = (rhs[row] - tail) / matrix[row][row];
    }
    Some(solution)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovers_exact_cubic() {
        let cubic = |x: f64| 2.0 - 0.5 * x + 0.25 * x * x + 0.01 * x * x * x;
        let ys: Vec<f64> = (0..30).map(|i| cubic(i as f64)).collect();

        let fit = Polynomial::fit(&ys, 3).unwrap();
        for (i, y) in fit.fitted(ys.len()).iter().enumerate() {
            assert!((y - ys[i]).abs() < 1e-6, "index {}: {} vs {}", i, y, ys[i]);
        }
        assert!((fit.coefficients[3] - 0.01).abs() < 1e-8);
    }

    #[test]
    fn test_linear_fit_of_noisy_line() {
        let ys = [1.0, 3.0, 2.0, 4.0];
        let fit = Polynomial::fit(&ys, 1).unwrap();
        // least squares line through the points: y = 1.3 + 0.8x
        assert!((fit.coefficients[0] - 1.3).abs() < 1e-9);
        assert!((fit.coefficients[1] - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_too_few_points() {
        assert!(Polynomial::fit(&[1.0, 2.0, 3.0], 3).is_none());
        assert!(Polynomial::fit(&[], 3).is_none());
    }
}
