//! fe-core: data layer for the food emission calculator
//!
//! Regression records, per-country datasets, raw feature vectors, user input
//! parsing and the number formatting used when reporting predictions.

pub mod config;
pub mod data;
pub mod error;
pub mod format;
pub mod input;

pub use config::CalculatorConfig;
pub use data::{
    Dataset, DatasetBuilder, FeatureLayout, FeatureVector, RegressionRecord, ScenarioDataset,
    ScenarioDatasetBuilder,
};
pub use error::FoodEmissionError;
pub use format::{format_percentage, human_readable_magnitude};
