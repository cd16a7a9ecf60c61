//! Core traits and types for emission models
//!
//! This module defines the interface shared by stored (pre-trained) models
//! and freshly fitted ones.

use fe_core::data::FeatureVector;

// Re-export core types
pub use coefficient::Coefficient;
pub use statistics::FitStatistics;
pub use summary::ModelSummary;
pub use summary::ModelType;

pub use crate::error::ModelError;

pub mod coefficient;
pub mod statistics;
pub mod summary;

/// Result type for model operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// A model that turns raw features into an emissions estimate (kgCO2eq)
pub trait EmissionModel: Send + Sync {
    /// Predict from raw features in the model's feature order.
    ///
    /// Never fails; unusable input yields a non-finite value.
    fn predict(&self, features: &[f64]) -> f64;

    /// Predict from user inputs, or `None` when the prediction is unavailable
    fn predict_features(&self, features: &FeatureVector) -> Option<f64>;

    /// Number of raw input features
    fn n_features(&self) -> usize;

    /// Held-out mean absolute percentage error
    fn mape(&self) -> f64;

    /// Generate model summary
    fn summary(&self) -> ModelSummary;
}
