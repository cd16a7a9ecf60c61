//! Prediction with stored standardized regressions
//!
//! A record holds the intercept, one coefficient per z-scored feature and the
//! training means and standard deviations used for the z-scores.

use tracing::warn;

use fe_core::data::{FeatureLayout, FeatureVector, RegressionRecord};

use crate::base::coefficient::standardized_terms;
use crate::base::{EmissionModel, ModelSummary, ModelType};

/// Evaluate `record` on raw features.
///
/// `intercept + Σ coefficients[i + 1] * (features[i] - means[i]) / stds[i]`.
/// The urban feature must already be a fraction. A feature count that does
/// not match the record, a zero standard deviation or a NaN input all give a
/// non-finite result.
pub fn predict(record: &RegressionRecord, features: &[f64]) -> f64 {
    if features.len() != record.n_features() {
        return f64::NAN;
    }

    record
        .feature_coefficients()
        .iter()
        .zip(features)
        .zip(record.means().iter().zip(record.stds()))
        .fold(record.intercept(), |acc, ((&beta, &x), (&mean, &std))| {
            acc + beta * ((x - mean) / std)
        })
}

/// A stored regression record used as an [`EmissionModel`]
#[derive(Debug, Clone)]
pub struct StandardizedRegression<'a> {
    record: &'a RegressionRecord,
    label: String,
}

impl<'a> StandardizedRegression<'a> {
    pub fn new(record: &'a RegressionRecord) -> Self {
        Self {
            record,
            label: String::new(),
        }
    }

    /// Name the model, e.g. after its country
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn record(&self) -> &'a RegressionRecord {
        self.record
    }

    pub fn layout(&self) -> Option<FeatureLayout> {
        self.record.layout()
    }
}

impl EmissionModel for StandardizedRegression<'_> {
    fn predict(&self, features: &[f64]) -> f64 {
        predict(self.record, features)
    }

    fn predict_features(&self, features: &FeatureVector) -> Option<f64> {
        let raw = features.raw(self.layout()?)?;
        let value = predict(self.record, &raw);

        if value.is_finite() {
            Some(value)
        } else {
            warn!(model = %self.label, ?raw, "prediction is not finite");
            None
        }
    }

    fn n_features(&self) -> usize {
        self.record.n_features()
    }

    fn mape(&self) -> f64 {
        self.record.mape()
    }

    fn summary(&self) -> ModelSummary {
        ModelSummary {
            model_type: ModelType::StandardizedRegression,
            label: self.label.clone(),
            n_features: self.record.n_features(),
            coefficients: standardized_terms(
                self.record.coefficients(),
                self.record.means(),
                self.record.stds(),
                self.layout().map(FeatureLayout::names),
            ),
            mape: self.record.mape(),
            fit_statistics: None,
        }
    }
}
