//! Gradient descent fit result
//!
//! This module defines what a finished fit keeps: the coefficients, the cost
//! recorded at every iteration and the sizes of the two splits.

use serde::{Deserialize, Serialize};

use crate::lm::Vector;

/// Result of a gradient descent fit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientDescentResult {
    /// Coefficients (β), intercept first
    pub coefficients: Vector,
    /// Cost before each iteration
    pub cost_history: Vec<f64>,
    /// Training rows
    pub n_train: usize,
    /// Test rows
    pub n_test: usize,
}

impl GradientDescentResult {
    /// Cost recorded for the last iteration
    pub fn final_cost(&self) -> Option<f64> {
        self.cost_history.last().copied()
    }

    pub fn iterations(&self) -> usize {
        self.cost_history.len()
    }
}
