//! Hold-out statistics for fitted models

use serde::{Deserialize, Serialize};

/// Scores of a fitted model on its test split
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FitStatistics {
    /// R-squared
    pub r_squared: Option<f64>,
    /// Mean squared error
    pub mse: Option<f64>,
    /// Mean absolute percentage error, as a fraction
    pub mape: Option<f64>,
    /// Training rows
    pub n_train: usize,
    /// Test rows
    pub n_test: usize,
    /// Gradient descent iterations
    pub iterations: Option<usize>,
    /// Cost after the last iteration
    pub final_cost: Option<f64>,
}
