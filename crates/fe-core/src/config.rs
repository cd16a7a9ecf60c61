//! Calculator configuration

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FoodEmissionError, Result};

/// Session defaults and dataset location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Year used until the user enters one
    pub default_year: i32,
    /// Urban share before a country is selected
    pub default_urban_percent: f64,
    /// Dataset file
    pub dataset_path: Option<PathBuf>,
    /// Whether the dataset is keyed by emission-source category
    pub scenario: bool,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            default_year: 2025,
            default_urban_percent: 50.0,
            dataset_path: None,
            scenario: false,
        }
    }
}

impl CalculatorConfig {
    /// Load a configuration from a JSON file. Missing fields take their
    /// default values.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| FoodEmissionError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|e| FoodEmissionError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate().map_err(|message| FoodEmissionError::Config {
            path: path.to_path_buf(),
            message,
        })?;

        debug!(path = %path.display(), "loaded calculator config");
        Ok(config)
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if !(0.0..=100.0).contains(&self.default_urban_percent) {
            return Err(format!(
                "default_urban_percent must be within [0, 100], got {}",
                self.default_urban_percent
            ));
        }
        Ok(())
    }
}
