//! Coefficient definition

use serde::{Deserialize, Serialize};

/// Coefficient of a standardized regression term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coefficient {
    /// Term name
    pub name: String,
    /// Coefficient estimate (per standard deviation of the feature)
    pub estimate: f64,
    /// Training mean of the raw feature
    pub mean: Option<f64>,
    /// Training standard deviation of the raw feature
    pub std_dev: Option<f64>,
    /// Is this the intercept?
    pub is_intercept: bool,
}

impl Coefficient {
    /// Create a new coefficient
    pub fn new(name: impl Into<String>, estimate: f64) -> Self {
        Self {
            name: name.into(),
            estimate,
            mean: None,
            std_dev: None,
            is_intercept: false,
        }
    }

    /// Set the standardization of the raw feature
    pub fn with_scaling(mut self, mean: f64, std_dev: f64) -> Self {
        self.mean = Some(mean);
        self.std_dev = Some(std_dev);
        self
    }

    /// Mark as intercept
    pub fn as_intercept(mut self) -> Self {
        self.is_intercept = true;
        self
    }

    /// Change in prediction per unit of the raw feature
    pub fn raw_slope(&self) -> Option<f64> {
        self.std_dev.map(|s| self.estimate / s)
    }
}

/// Build coefficient rows for an intercept-first coefficient vector
pub(crate) fn standardized_terms(
    coefficients: &[f64],
    means: &[f64],
    stds: &[f64],
    names: Option<&[&str]>,
) -> Vec<Coefficient> {
    let mut terms = Vec::with_capacity(coefficients.len());

    if let Some(&intercept) = coefficients.first() {
        terms.push(Coefficient::new("(Intercept)", intercept).as_intercept());
    }

    for (i, &estimate) in coefficients.iter().skip(1).enumerate() {
        let name = names
            .and_then(|n| n.get(i))
            .map_or_else(|| format!("x{}", i), |n| n.to_string());
        let mut term = Coefficient::new(name, estimate);
        if let (Some(&mean), Some(&std_dev)) = (means.get(i), stds.get(i)) {
            term = term.with_scaling(mean, std_dev);
        }
        terms.push(term);
    }

    terms
}
