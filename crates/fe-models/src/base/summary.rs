//! Model summary structures

use super::coefficient::Coefficient;
use super::statistics::FitStatistics;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Model summary: coefficient table plus accuracy figures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSummary {
    /// Model type
    pub model_type: ModelType,
    /// What the model is for, e.g. a country or "country / category"
    pub label: String,
    /// Number of raw features
    pub n_features: usize,
    /// Coefficients table
    pub coefficients: Vec<Coefficient>,
    /// Held-out mean absolute percentage error
    pub mape: f64,
    /// Fit statistics, when the model was fitted in-process
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fit_statistics: Option<FitStatistics>,
}

impl fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model Summary")?;
        writeln!(f, "=============")?;
        writeln!(f, "Model Type: {}", self.model_type)?;
        if !self.label.is_empty() {
            writeln!(f, "Model: {}", self.label)?;
        }
        writeln!(f, "Features: {}", self.n_features)?;
        writeln!(f)?;

        // Coefficients
        writeln!(f, "Coefficients:")?;
        writeln!(
            f,
            "{:<20} {:>14} {:>16} {:>16}",
            "Term", "Estimate", "Mean", "Std Dev"
        )?;
        writeln!(f, "{:-<20} {:-<14} {:-<16} {:-<16}", "", "", "", "")?;

        for coeff in &self.coefficients {
            writeln!(
                f,
                "{:<20} {:>14.6} {:>16.6} {:>16.6}",
                coeff.name,
                coeff.estimate,
                coeff.mean.unwrap_or(f64::NAN),
                coeff.std_dev.unwrap_or(f64::NAN)
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Accuracy:")?;
        writeln!(f, "  MAPE: {:.2}%", self.mape * 100.0)?;
        if let Some(stats) = &self.fit_statistics {
            if let Some(r2) = stats.r_squared {
                writeln!(f, "  R-squared: {:.4}", r2)?;
            }
            if let Some(mse) = stats.mse {
                writeln!(f, "  MSE: {:.4}", mse)?;
            }
            writeln!(f, "  Train/Test rows: {}/{}", stats.n_train, stats.n_test)?;
            if let Some(iterations) = stats.iterations {
                writeln!(f, "  Iterations: {}", iterations)?;
            }
            if let Some(cost) = stats.final_cost {
                writeln!(f, "  Final cost: {:.6}", cost)?;
            }
        }

        Ok(())
    }
}

/// Model type enumeration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelType {
    /// Stored regression on z-scored features
    StandardizedRegression,
    /// Regression fitted by batch gradient descent
    GradientDescent,
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelType::StandardizedRegression => write!(f, "Standardized Linear Regression"),
            ModelType::GradientDescent => write!(f, "Linear Regression (Gradient Descent)"),
        }
    }
}
