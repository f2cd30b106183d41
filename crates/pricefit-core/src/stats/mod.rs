pub mod linreg;
pub mod normalize;
pub mod stats;

pub use linreg::{fit, GradientDescent, LinReg};
pub use normalize::{compute_bounds, denormalize_coefficients, normalize, Bounds};
pub use stats::{mean, r2_from_predictions, rmse};
