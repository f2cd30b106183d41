use crate::dataset::Dataset;
use crate::model::PersistedModel;
use crate::stats::{r2_from_predictions, rmse};

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub rmse: f64,
    pub r2: f64,
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "rmse: {}, r2: {}", self.rmse, self.r2)
    }
}

/// RMSE and R² of `model` over `dataset`. Predictions use the raw line, so
/// an untrained model predicts `0.0` everywhere.
pub fn evaluate(dataset: &Dataset, model: &PersistedModel) -> Metrics {
    let line = model.line();
    let actual = dataset.ys();
    let predicted: Vec<f64> = dataset.iter().map(|s| line.calculate(s.x)).collect();

    // `Dataset` is never empty and `predicted` has one entry per sample
    let rmse = rmse(&actual, &predicted).expect("rmse over a non-empty dataset");
    let r2 = r2_from_predictions(&actual, &predicted).expect("r2 over a non-empty dataset");
    Metrics { rmse, r2 }
}
