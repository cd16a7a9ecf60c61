//! Linear regression models
//!
//! This module provides:
//! - prediction from stored standardized regressions ([`StandardizedRegression`])
//! - batch gradient descent fitting on z-scored features
//!   ([`GradientDescentRegressor`]), which produces such regressions
//! - hold-out metrics (R-squared, MSE, MAPE)

pub mod gradient;
pub mod metrics;
pub mod result;
pub mod standardized;


// Re-exports
pub use gradient::{
    calc_linreg, compute_cost, gradient_descent, normalize_z, prepare_feature, split_data,
    GradientDescentRegressor, TrainTestSplit,
};
pub use result::GradientDescentResult;
pub use standardized::{predict, StandardizedRegression};

// Common types
use crate::base::{ModelError, Result};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Matrix type alias for 2D arrays
pub type Matrix = Array2<f64>;

/// Vector type alias for 1D arrays
pub type Vector = Array1<f64>;

/// Gradient descent fitting configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    /// Number of gradient descent iterations
    pub iterations: usize,
    /// Learning rate
    pub alpha: f64,
    /// Share of rows held out for scoring
    pub test_size: f64,
    /// Seed for the train/test split; `None` draws one from the OS
    pub random_state: Option<u64>,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            alpha: 0.01,
            test_size: 0.5,
            random_state: Some(69),
        }
    }
}

impl FitConfig {
    /// Check the configuration before fitting
    pub fn validate(&self) -> Result<()> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(ModelError::InvalidConfig {
                message: format!("test_size must be within (0, 1), got {}", self.test_size),
            });
        }
        if !(self.alpha.is_finite() && self.alpha > 0.0) {
            return Err(ModelError::InvalidConfig {
                message: format!("alpha must be positive, got {}", self.alpha),
            });
        }
        Ok(())
    }
}

/// Convenience function: split, standardize and fit in one call
pub fn fit(features: &Matrix, target: &Vector, config: FitConfig) -> Result<GradientDescentRegressor> {
    GradientDescentRegressor::new(features, target, config)?.fit()
}
