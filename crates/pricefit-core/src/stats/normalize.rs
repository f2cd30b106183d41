//! Min/max scaling of the two columns to `[0, 1]` and the inverse mapping of
//! fitted coefficients back to original units.

use crate::dataset::{Dataset, Sample};
use crate::stats::LinReg;

use statrs::statistics::Statistics;

/// Observed ranges of mileage (`x`) and price (`y`) in one training run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn x_range(&self) -> f64 {
        range_or_one(self.min_x, self.max_x)
    }

    pub fn y_range(&self) -> f64 {
        range_or_one(self.min_y, self.max_y)
    }

    /// Maps a raw sample into the unit square.
    pub fn normalize_sample(&self, s: &Sample) -> Sample {
        Sample::new(normalize(s.x, self.min_x, self.max_x), normalize(s.y, self.min_y, self.max_y))
    }
}

pub fn compute_bounds(dataset: &Dataset) -> Bounds {
    let xs = dataset.xs();
    let ys = dataset.ys();
    Bounds {
        min_x: Statistics::min(xs.iter()),
        max_x: Statistics::max(xs.iter()),
        min_y: Statistics::min(ys.iter()),
        max_y: Statistics::max(ys.iter()),
    }
}

/// `max - min`, or `1.0` when the column is constant.
pub fn range_or_one(min: f64, max: f64) -> f64 {
    let range = max - min;
    if range == 0.0 {
        1.0
    } else {
        range
    }
}

pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    (value - min) / range_or_one(min, max)
}

pub fn denormalize(value: f64, min: f64, max: f64) -> f64 {
    value * range_or_one(min, max) + min
}

pub fn normalize_dataset(dataset: &Dataset, bounds: &Bounds) -> Dataset {
    dataset.map(|s| bounds.normalize_sample(s))
}

/// Rewrites a line fitted on normalized data into original units:
///
/// `theta1 = theta1_n * y_range / x_range`
/// `theta0 = theta0_n * y_range + min_y - theta1 * min_x`
pub fn denormalize_coefficients(theta0_n: f64, theta1_n: f64, bounds: &Bounds) -> LinReg {
    let theta1 = theta1_n * bounds.y_range() / bounds.x_range();
    let theta0 = theta0_n * bounds.y_range() + bounds.min_y - theta1 * bounds.min_x;
    LinReg::from_val(theta0, theta1)
}
