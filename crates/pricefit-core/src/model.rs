//! Coefficient file: a JSON object with `theta0`, `theta1` and whichever of
//! `min_km`, `max_km`, `min_price`, `max_price` are known.

use crate::error::ModelError;
use crate::stats::{Bounds, LinReg};

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Training ranges as stored on disk. Each field is independently optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelBounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
}

impl ModelBounds {
    pub fn is_empty(&self) -> bool {
        self.min_km.is_none()
            && self.max_km.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
    }
}

impl From<Bounds> for ModelBounds {
    fn from(b: Bounds) -> Self {
        Self {
            min_km: Some(b.min_x),
            max_km: Some(b.max_x),
            min_price: Some(b.min_y),
            max_price: Some(b.max_y),
        }
    }
}

/// Coefficients in original units plus the ranges they were fitted on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedModel {
    #[serde(default)]
    pub theta0: f64,
    #[serde(default)]
    pub theta1: f64,
    #[serde(flatten)]
    pub bounds: ModelBounds,
}

impl PersistedModel {
    pub fn new(line: LinReg, bounds: ModelBounds) -> Self {
        Self { theta0: line.theta0, theta1: line.theta1, bounds }
    }

    /// `(0, 0)` with no bounds: nothing has been trained yet.
    pub fn untrained() -> Self {
        Self::default()
    }

    /// Exact zero on both coefficients. A real fit that lands on `(0, 0)`
    /// is indistinguishable from an untrained model.
    pub fn is_untrained(&self) -> bool {
        self.theta0 == 0.0 && self.theta1 == 0.0
    }

    pub fn line(&self) -> LinReg {
        LinReg::from_val(self.theta0, self.theta1)
    }
}

/// Writes the model as pretty JSON, creating parent directories if needed.
pub fn save_model<P: AsRef<Path>>(path: P, model: &PersistedModel) -> Result<(), ModelError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| ModelError::Write { path: parent.to_path_buf(), source: e })?;
    }

    let json = serde_json::to_string_pretty(model).map_err(ModelError::Encode)?;
    fs::write(path, json).map_err(|e| ModelError::Write { path: path.to_path_buf(), source: e })?;

    log::info!("saved model to {}", path.display());
    Ok(())
}

/// Reads the model at `path`. A missing file yields the untrained model.
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<PersistedModel, ModelError> {
    let path = path.as_ref();
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::info!("no model at {}, using untrained coefficients", path.display());
            return Ok(PersistedModel::untrained());
        },
        Err(e) => return Err(ModelError::Read { path: path.to_path_buf(), source: e }),
    };
    parse_model(&content)
}

/// Parses a model document. Missing coefficients default to `0.0`, missing
/// or `null` bounds stay absent; any present field must be numeric.
pub fn parse_model(content: &str) -> Result<PersistedModel, ModelError> {
    let value: serde_json::Value = serde_json::from_str(content).map_err(ModelError::Parse)?;
    let object = value.as_object().ok_or(ModelError::NotAnObject)?;

    for key in ["theta0", "theta1"] {
        if let Some(v) = object.get(key) {
            if !v.is_number() {
                return Err(ModelError::NonNumeric { key: key.to_owned() });
            }
        }
    }
    for key in ["min_km", "max_km", "min_price", "max_price"] {
        if let Some(v) = object.get(key) {
            if !(v.is_number() || v.is_null()) {
                return Err(ModelError::NonNumeric { key: key.to_owned() });
            }
        }
    }

    serde_json::from_value(value).map_err(ModelError::Parse)
}
