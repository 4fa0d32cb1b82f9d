//! Pre-trained next-day close model.

use gold_core::error::ForecastError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Inputs of the next-day close model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Features {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub volume: f64,
}

impl Features {
    /// Names accepted in a model's coefficient table.
    pub const NAMES: [&'static str; 4] = ["open", "high", "low", "volume"];

    /// Look up a feature by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<f64> {
        match name.to_ascii_lowercase().as_str() {
            "open" => Some(self.open),
            "high" => Some(self.high),
            "low" => Some(self.low),
            "volume" => Some(self.volume),
            _ => None,
        }
    }
}

/// Anything that turns features into a price.
pub trait Forecaster: Send + Sync {
    /// Predict the next close.
    fn predict(&self, features: &Features) -> Result<f64, ForecastError>;

    /// Get the model name.
    fn name(&self) -> &str;
}

/// Serialized linear regression: `intercept + sum(coef * feature)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: BTreeMap<String, f64>,
}

impl LinearModel {
    /// Load a model from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ForecastError> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ForecastError::ModelNotFound(path.display().to_string()),
            _ => ForecastError::InvalidModel(format!("{}: {}", path.display(), e)),
        })?;
        let model = Self::from_json(&content)?;
        debug!(path = %path.display(), features = model.coefficients.len(), "Loaded linear model");
        Ok(model)
    }

    /// Parse and validate a model.
    pub fn from_json(json: &str) -> Result<Self, ForecastError> {
        let model: LinearModel =
            serde_json::from_str(json).map_err(|e| ForecastError::InvalidModel(e.to_string()))?;

        if model.coefficients.is_empty() {
            return Err(ForecastError::InvalidModel("no coefficients".to_string()));
        }
        if let Some(unknown) = model
            .coefficients
            .keys()
            .find(|k| !Features::NAMES.iter().any(|n| n.eq_ignore_ascii_case(k)))
        {
            return Err(ForecastError::InvalidModel(format!(
                "unknown feature '{}'",
                unknown
            )));
        }

        Ok(model)
    }
}

impl Forecaster for LinearModel {
    fn predict(&self, features: &Features) -> Result<f64, ForecastError> {
        let mut value = self.intercept;
        for (name, coef) in &self.coefficients {
            let x = features
                .get(name)
                .ok_or_else(|| ForecastError::MissingFeature(name.clone()))?;
            value += coef * x;
        }

        if !value.is_finite() {
            return Err(ForecastError::InvalidModel(format!(
                "non-finite prediction {}",
                value
            )));
        }
        Ok(value)
    }

    fn name(&self) -> &str {
        "linear"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MODEL: &str = r#"{
        "intercept": 2.5,
        "coefficients": {"open": -0.5, "high": 0.75, "low": 0.75, "volume": 0.0001}
    }"#;

    fn features() -> Features {
        Features {
            open: 1800.0,
            high: 1810.0,
            low: 1790.0,
            volume: 10000.0,
        }
    }

    #[test]
    fn test_linear_prediction() {
        let model = LinearModel::from_json(MODEL).unwrap();

        let predicted = model.predict(&features()).unwrap();

        // 2.5 - 900 + 1357.5 + 1342.5 + 1
        assert!((predicted - 1803.5).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_feature_is_invalid_model() {
        let json = r#"{"intercept": 0.0, "coefficients": {"open": 1.0, "sentiment": 2.0}}"#;

        match LinearModel::from_json(json) {
            Err(ForecastError::InvalidModel(msg)) => assert!(msg.contains("sentiment")),
            other => panic!("expected InvalidModel, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_or_malformed_model_is_invalid() {
        let empty = r#"{"intercept": 1.0, "coefficients": {}}"#;
        assert!(matches!(
            LinearModel::from_json(empty),
            Err(ForecastError::InvalidModel(_))
        ));
        assert!(matches!(
            LinearModel::from_json("not json"),
            Err(ForecastError::InvalidModel(_))
        ));
    }

    #[test]
    fn test_load_missing_file_is_model_not_found() {
        let dir = TempDir::new().unwrap();

        let result = LinearModel::load(&dir.path().join("linear_model.json"));

        assert!(matches!(result, Err(ForecastError::ModelNotFound(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("linear_model.json");
        fs::write(&path, MODEL).unwrap();

        let model = LinearModel::load(&path).unwrap();

        assert_eq!(model.coefficients.len(), 4);
        assert_eq!(model.name(), "linear");
    }
}
