use std::path::PathBuf;

/// Failure while reading the training dataset. Row numbers are 1-based and
/// count the header, so the first data row is row 2.
#[derive(thiserror::Error, Debug)]
pub enum DataError {
    #[error("cannot open dataset '{}': {source}", path.display())]
    Open { path: PathBuf, source: std::io::Error },
    #[error("CSV read error at row {row}: {source}")]
    Csv { row: usize, source: csv::Error },
    #[error("expected columns [{expected}], found [{found}]")]
    Header { expected: String, found: String },
    #[error("expected 2 fields at row {row}, found {found}")]
    ExtraFields { row: usize, found: usize },
    #[error("missing {column} at row {row}")]
    MissingField { row: usize, column: &'static str },
    #[error("invalid {column} at row {row}: '{value}' is not a number")]
    NotNumeric { row: usize, column: &'static str, value: String },
    #[error("invalid {column} at row {row}: NaN is not allowed")]
    NotANumber { row: usize, column: &'static str },
    #[error("invalid {column} at row {row}: {value} is not finite")]
    NonFinite { row: usize, column: &'static str, value: f64 },
    #[error("invalid {column} at row {row}: {value} is negative")]
    Negative { row: usize, column: &'static str, value: f64 },
    #[error("dataset contains no data rows")]
    Empty,
}

impl DataError {
    /// Row the error points at, when it concerns a single row.
    pub fn row(&self) -> Option<usize> {
        match self {
            DataError::Csv { row, .. }
            | DataError::ExtraFields { row, .. }
            | DataError::MissingField { row, .. }
            | DataError::NotNumeric { row, .. }
            | DataError::NotANumber { row, .. }
            | DataError::NonFinite { row, .. }
            | DataError::Negative { row, .. } => Some(*row),
            DataError::Open { .. } | DataError::Header { .. } | DataError::Empty => None,
        }
    }
}

/// Failure while reading or writing the coefficient file.
#[derive(thiserror::Error, Debug)]
pub enum ModelError {
    #[error("cannot read model file '{}': {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("cannot write model file '{}': {source}", path.display())]
    Write { path: PathBuf, source: std::io::Error },
    #[error("model file is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("model file must contain a JSON object")]
    NotAnObject,
    #[error("model field '{key}' must be a number")]
    NonNumeric { key: String },
    #[error("cannot encode model: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Hyperparameters outside the range the optimizer accepts.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("learning rate must be in (0, 1], got {0}")]
    LearningRate(f64),
    #[error("iterations must be a positive integer")]
    Iterations,
}

/// Anything the training pipeline can fail with.
#[derive(thiserror::Error, Debug)]
pub enum TrainError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Model(#[from] ModelError),
}
