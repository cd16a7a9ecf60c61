//! Baseline vs. scenario comparison across emission-source categories

use std::fmt;

use serde::{Deserialize, Serialize};

use fe_core::data::{CategoryMap, FeatureVector};

use crate::base::EmissionModel;
use crate::lm::StandardizedRegression;

/// Relative change of a new prediction against a baseline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Delta {
    /// Change in percent of the baseline
    Percent(f64),
    /// No comparison possible: zero or missing baseline
    Undefined,
}

impl Delta {
    pub fn percent(self) -> Option<f64> {
        match self {
            Delta::Percent(p) => Some(p),
            Delta::Undefined => None,
        }
    }

    pub fn is_defined(self) -> bool {
        matches!(self, Delta::Percent(_))
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delta::Percent(p) => write!(f, "{:+.2}%", p),
            Delta::Undefined => write!(f, "n/a"),
        }
    }
}

/// `(new - baseline) / baseline * 100`, or [`Delta::Undefined`] for a zero
/// baseline or any non-finite value.
pub fn delta_percent(baseline: f64, new: f64) -> Delta {
    if baseline == 0.0 || !baseline.is_finite() || !new.is_finite() {
        return Delta::Undefined;
    }
    Delta::Percent((new - baseline) / baseline * 100.0)
}

/// One row of the comparison table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    /// Emission-source category
    pub category: String,
    /// Prediction for the baseline inputs
    pub baseline: Option<f64>,
    /// Prediction for the new inputs
    pub new: Option<f64>,
    pub delta: Delta,
    /// Held-out error of the category model
    pub mape: f64,
}

/// Predict every category for both feature vectors, in dataset order
pub fn compare_categories(
    categories: &CategoryMap,
    baseline: &FeatureVector,
    new: &FeatureVector,
) -> Vec<ComparisonRow> {
    categories
        .iter()
        .map(|(category, record)| {
            let model = StandardizedRegression::new(record).with_label(category.as_str());
            let before = model.predict_features(baseline);
            let after = model.predict_features(new);
            let delta = match (before, after) {
                (Some(b), Some(a)) => delta_percent(b, a),
                _ => Delta::Undefined,
            };

            ComparisonRow {
                category: category.clone(),
                baseline: before,
                new: after,
                delta,
                mape: record.mape(),
            }
        })
        .collect()
}
