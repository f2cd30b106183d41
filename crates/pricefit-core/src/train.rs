//! Load → normalize → gradient descent → denormalize → save.

use crate::dataset::{load_dataset, Dataset};
use crate::error::{ConfigError, TrainError};
use crate::model::{save_model, PersistedModel};
use crate::stats::normalize::normalize_dataset;
use crate::stats::{compute_bounds, denormalize_coefficients, Bounds, GradientDescent, LinReg};

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    pub data_path: PathBuf,
    pub theta_path: PathBuf,
    pub learning_rate: f64,
    pub iterations: usize,
}

impl TrainConfig {
    pub const DEFAULT_DATA_PATH: &'static str = "data.csv";
    pub const DEFAULT_THETA_PATH: &'static str = "theta.json";
    pub const DEFAULT_LEARNING_RATE: f64 = 0.1;
    pub const DEFAULT_ITERATIONS: usize = 1000;

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_learning_rate(self.learning_rate)?;
        if self.iterations == 0 {
            return Err(ConfigError::Iterations);
        }
        Ok(())
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(Self::DEFAULT_DATA_PATH),
            theta_path: PathBuf::from(Self::DEFAULT_THETA_PATH),
            learning_rate: Self::DEFAULT_LEARNING_RATE,
            iterations: Self::DEFAULT_ITERATIONS,
        }
    }
}

pub fn validate_learning_rate(lr: f64) -> Result<(), ConfigError> {
    if lr > 0.0 && lr <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::LearningRate(lr))
    }
}

/// Outcome of one training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainReport {
    pub line: LinReg,
    pub bounds: Bounds,
    /// Half mean squared error on the normalized data after the last step.
    pub normalized_cost: f64,
    pub samples: usize,
}

/// Fits `dataset` without touching the file system.
pub fn fit_dataset(dataset: &Dataset, learning_rate: f64, iterations: usize) -> TrainReport {
    let bounds = compute_bounds(dataset);
    log::info!(
        "bounds: km [{}, {}], price [{}, {}]",
        bounds.min_x,
        bounds.max_x,
        bounds.min_y,
        bounds.max_y
    );

    let normalized = normalize_dataset(dataset, &bounds);
    let gd = GradientDescent::new(learning_rate, iterations);
    log::debug!("initial cost: {}", GradientDescent::cost(&normalized, &LinReg::new()));

    let every = (iterations / 10).max(1);
    let theta_n = gd.fit_with_progress(&normalized, |i, theta| {
        if i % every == 0 {
            let cost = GradientDescent::cost(&normalized, theta);
            log::debug!("step {i}/{iterations}: cost {cost}");
        }
    });
    let normalized_cost = GradientDescent::cost(&normalized, &theta_n);

    let line = denormalize_coefficients(theta_n.theta0, theta_n.theta1, &bounds);
    log::info!("fitted {line} after {iterations} iterations (cost {normalized_cost})");

    TrainReport { line, bounds, normalized_cost, samples: dataset.len() }
}

/// Runs the whole pipeline and writes the coefficient file.
pub fn train(config: &TrainConfig) -> Result<TrainReport, TrainError> {
    config.validate()?;
    let dataset = load_dataset(&config.data_path)?;
    let report = fit_dataset(&dataset, config.learning_rate, config.iterations);
    save_model(&config.theta_path, &PersistedModel::new(report.line, report.bounds.into()))?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::fit;

    #[test]
    fn default_config_is_valid() {
        let cfg = TrainConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.theta_path, PathBuf::from("theta.json"));
    }

    #[test]
    fn rejects_bad_hyperparameters() {
        let cfg = TrainConfig { learning_rate: 0.0, ..Default::default() };
        assert_eq!(cfg.validate(), Err(ConfigError::LearningRate(0.0)));
        let cfg = TrainConfig { learning_rate: 1.5, ..Default::default() };
        assert!(cfg.validate().is_err());
        let cfg = TrainConfig { learning_rate: 1.0, iterations: 0, ..Default::default() };
        assert_eq!(cfg.validate(), Err(ConfigError::Iterations));
        assert!(validate_learning_rate(f64::NAN).is_err());
    }

    #[test]
    fn normalized_fit_matches_raw_fit() {
        let pairs: Vec<(f64, f64)> = (0..5).map(|i| (i as f64, 2.0 * i as f64 + 1.0)).collect();
        let data = Dataset::from_pairs(&pairs).unwrap();

        let via_normalized = fit_dataset(&data, 0.5, 10_000).line;
        let raw = fit(&data, 0.05, 20_000);

        for x in [0.0, 1.5, 4.0, 10.0] {
            assert!((via_normalized.calculate(x) - raw.calculate(x)).abs() < 1e-6, "x = {x}");
        }
        assert!((via_normalized.theta1 - 2.0).abs() < 1e-6);
        assert!((via_normalized.theta0 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_columns_do_not_divide_by_zero() {
        let same_x = Dataset::from_pairs(&[(3.0, 1.0), (3.0, 5.0)]).unwrap();
        let report = fit_dataset(&same_x, 0.1, 1000);
        assert!(report.line.theta0.is_finite() && report.line.theta1.is_finite());
        assert_eq!(report.line.theta1, 0.0);
        assert!((report.line.calculate(3.0) - 3.0).abs() < 1e-6);

        let same_y = Dataset::from_pairs(&[(1.0, 7.0), (9.0, 7.0)]).unwrap();
        let report = fit_dataset(&same_y, 0.1, 10);
        assert_eq!(report.line, LinReg::from_val(7.0, 0.0));
    }
}
