//! fe-models: emission models for the food emission calculator
//!
//! - [`lm`]: standardized linear regression prediction and gradient-descent fitting
//! - [`compare`]: baseline vs. scenario deltas across emission categories
//! - [`session`]: per-session input state that recomputes on demand

pub mod base;
pub mod compare;
pub mod error;
pub mod lm;
pub mod session;

pub use base::{EmissionModel, ModelError, ModelSummary, Result};
pub use compare::{compare_categories, delta_percent, ComparisonRow, Delta};
pub use lm::{predict, FitConfig, GradientDescentRegressor, StandardizedRegression};
pub use session::{CalculatorSession, PopulationInputs, PredictionView, ScenarioSession};
