//! Core data structures for the calculator
//!
//! Regression records are loaded once and stay immutable for the lifetime of
//! the process. Feature vectors are the user-owned side of a prediction.

use std::path::PathBuf;

mod builder;
mod dataset;
mod features;
mod record;

#[cfg(test)]
mod tests;

// Re-exports
pub use builder::{DatasetBuilder, ScenarioDatasetBuilder};
pub use dataset::{Dataset, ScenarioDataset};
pub use features::{FeatureLayout, FeatureVector};
pub use record::RegressionRecord;

/// Category name -> record, in dataset order
pub type CategoryMap = indexmap::IndexMap<String, RegressionRecord>;

/// Error types specific to dataset handling
#[derive(thiserror::Error, Debug)]
pub enum DataError {
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    #[error("Country '{0}' not found")]
    CountryNotFound(String),

    #[error("Category '{category}' not found for country '{country}'")]
    CategoryNotFound { country: String, category: String },

    #[error("Duplicate country: {0}")]
    DuplicateCountry(String),

    #[error("Duplicate category '{category}' for country '{country}'")]
    DuplicateCategory { country: String, category: String },

    #[error("Country '{0}' has no emission categories")]
    EmptyCountry(String),

    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed dataset JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for data operations
pub type Result<T> = std::result::Result<T, DataError>;
