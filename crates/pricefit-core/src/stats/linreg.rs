use crate::dataset::Dataset;

use std::fmt;

/// The line `y = theta0 + theta1 * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinReg {
    pub theta0: f64,
    pub theta1: f64,
}

impl fmt::Display for LinReg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "theta0: {}, theta1: {}", self.theta0, self.theta1)
    }
}

impl Default for LinReg {
    fn default() -> Self {
        Self::new()
    }
}

impl LinReg {
    pub fn new() -> Self {
        Self { theta0: 0., theta1: 0. }
    }
    pub fn calculate(&self, x: f64) -> f64 {
        self.theta0 + self.theta1 * x
    }
    pub fn from_val(theta0: f64, theta1: f64) -> Self {
        Self { theta0, theta1 }
    }
}

/// Batch gradient descent on the squared error of a line.
///
/// Inputs are trusted: the learning rate is expected in `(0, 1]` and the
/// iteration count to be positive. Always runs exactly `iterations` steps.
#[derive(Debug, Clone, Copy)]
pub struct GradientDescent {
    pub learning_rate: f64,
    pub iterations: usize,
}

impl GradientDescent {
    pub fn new(learning_rate: f64, iterations: usize) -> Self {
        Self { learning_rate, iterations }
    }

    /// Fits from `(0, 0)`.
    pub fn fit(&self, data: &Dataset) -> LinReg {
        self.fit_with_progress(data, |_, _| {})
    }

    /// Like [`fit`](Self::fit), calling `on_step` with the 1-based step
    /// number and the coefficients after that step.
    pub fn fit_with_progress<F>(&self, data: &Dataset, mut on_step: F) -> LinReg
    where
        F: FnMut(usize, &LinReg),
    {
        let mut theta = LinReg::new();
        for i in 1..=self.iterations {
            theta = self.step(data, &theta);
            on_step(i, &theta);
        }
        theta
    }

    /// One simultaneous update: both deltas come from `theta` as passed in.
    pub fn step(&self, data: &Dataset, theta: &LinReg) -> LinReg {
        let m = data.len() as f64;
        let mut sum_err = 0.0;
        let mut sum_err_x = 0.0;
        for s in data.iter() {
            let error = theta.calculate(s.x) - s.y;
            sum_err += error;
            sum_err_x += error * s.x;
        }

        let delta_theta0 = self.learning_rate * sum_err / m;
        let delta_theta1 = self.learning_rate * sum_err_x / m;
        LinReg::from_val(theta.theta0 - delta_theta0, theta.theta1 - delta_theta1)
    }

    /// Half mean squared error of `theta` over `data`.
    pub fn cost(data: &Dataset, theta: &LinReg) -> f64 {
        let m = data.len() as f64;
        data.iter().map(|s| (theta.calculate(s.x) - s.y).powi(2)).sum::<f64>() / (2.0 * m)
    }
}

/// Fits `data` with `learning_rate` for exactly `iterations` steps.
pub fn fit(data: &Dataset, learning_rate: f64, iterations: usize) -> LinReg {
    GradientDescent::new(learning_rate, iterations).fit(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    // closed-form least squares, only used as a reference
    fn ols(x: &[f64], y: &[f64]) -> LinReg {
        let avg_x: f64 = x.iter().sum::<f64>() / x.len() as f64;
        let avg_y = y.iter().sum::<f64>() / y.len() as f64;
        let ss_xx: f64 = x.iter().map(|v| (v - avg_x).powi(2)).sum();
        let ss_xy: f64 = x.iter().zip(y).map(|(a, b)| (a - avg_x) * (b - avg_y)).sum();
        let theta1 = ss_xy / ss_xx;
        LinReg::from_val(avg_y - theta1 * avg_x, theta1)
    }

    #[test]
    fn two_step_trace_is_simultaneous() {
        let data = Dataset::from_pairs(&[(0.0, 0.0), (1.0, 1.0)]).unwrap();
        let theta = fit(&data, 0.1, 2);
        assert!((theta.theta0 - 0.0925).abs() < 1e-12, "{theta}");
        assert!((theta.theta1 - 0.095).abs() < 1e-12, "{theta}");
    }

    #[test]
    fn single_step_uses_pre_update_theta() {
        let data = Dataset::from_pairs(&[(0.0, 0.0), (1.0, 1.0)]).unwrap();
        let gd = GradientDescent::new(0.1, 1);
        let theta = gd.step(&data, &LinReg::from_val(0.05, 0.05));
        assert!((theta.theta0 - 0.0925).abs() < 1e-12);
        assert!((theta.theta1 - 0.095).abs() < 1e-12);
    }

    #[test]
    fn runs_exactly_the_requested_steps() {
        let data = Dataset::from_pairs(&[(0.0, 0.0), (1.0, 1.0)]).unwrap();
        let mut steps = Vec::new();
        GradientDescent::new(0.5, 7).fit_with_progress(&data, |i, _| steps.push(i));
        assert_eq!(steps, (1..=7).collect::<Vec<_>>());
    }

    #[test]
    fn converges_to_least_squares() {
        let mut x = vec![];
        let mut y = vec![];
        for i in 0..50 {
            let xi = i as f64 / 49.0;
            x.push(xi);
            y.push(0.8 - 0.6 * xi + rand::random::<f64>() * 0.05);
        }
        let pairs: Vec<(f64, f64)> = x.iter().copied().zip(y.iter().copied()).collect();
        let data = Dataset::from_pairs(&pairs).unwrap();

        let theta = fit(&data, 0.5, 20_000);
        let reference = ols(&x, &y);
        assert!((theta.theta0 - reference.theta0).abs() < 1e-6);
        assert!((theta.theta1 - reference.theta1).abs() < 1e-6);
    }

    #[test]
    fn cost_decreases() {
        let data = Dataset::from_pairs(&[(0.0, 0.2), (0.5, 0.5), (1.0, 0.9)]).unwrap();
        let before = GradientDescent::cost(&data, &LinReg::new());
        let after = GradientDescent::cost(&data, &fit(&data, 0.1, 100));
        assert!(after < before);
    }

    #[test]
    fn constant_x_leaves_slope_at_zero() {
        let data = Dataset::from_pairs(&[(0.0, 0.0), (0.0, 1.0)]).unwrap();
        let theta = fit(&data, 0.1, 500);
        assert_eq!(theta.theta1, 0.0);
        assert!((theta.theta0 - 0.5).abs() < 1e-6);
    }
}
