//! Single-feature linear regression of car price on mileage.
//!
//! Training loads a `km,price` CSV, scales both columns to `[0, 1]`, runs
//! batch gradient descent and stores the line in original units together
//! with the observed ranges. Prediction and evaluation read that file back.

pub mod dataset;
pub mod error;
pub mod evaluate;
pub mod model;
pub mod predict;
pub mod processevent;
pub mod stats;
pub mod train;

pub use dataset::{load_dataset, read_dataset, Dataset, Sample};
pub use error::{ConfigError, DataError, ModelError, TrainError};
pub use evaluate::{evaluate, Metrics};
pub use model::{load_model, save_model, ModelBounds, PersistedModel};
pub use predict::predict;
pub use processevent::{LogSink, ProcessEvent, ProcessEventSink, RangeWarning};
pub use train::{fit_dataset, train, TrainConfig, TrainReport};
