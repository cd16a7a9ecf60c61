//! Regression record definition

use serde::{Deserialize, Serialize};

use super::*;

/// Pre-trained standardized linear regression for one country (and, in the
/// scenario dataset, one emission-source category).
///
/// `coefficients[0]` is the intercept; `coefficients[i + 1]` is paired with
/// `means[i]` and `stds[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRecord", into = "RawRecord")]
pub struct RegressionRecord {
    coefficients: Vec<f64>,
    means: Vec<f64>,
    stds: Vec<f64>,
    mape: f64,
}

impl RegressionRecord {
    /// Create a record, checking that the coefficient vector has exactly one
    /// more entry than the means and standard deviations.
    pub fn new(coefficients: Vec<f64>, means: Vec<f64>, stds: Vec<f64>, mape: f64) -> Result<Self> {
        if means.len() != stds.len() {
            return Err(DataError::DimensionMismatch {
                expected: format!("{} stds", means.len()),
                actual: format!("{} stds", stds.len()),
            });
        }
        if coefficients.len() != means.len() + 1 {
            return Err(DataError::DimensionMismatch {
                expected: format!("{} coefficients", means.len() + 1),
                actual: format!("{} coefficients", coefficients.len()),
            });
        }

        Ok(Self {
            coefficients,
            means,
            stds,
            mape,
        })
    }

    /// Regression bias term
    pub fn intercept(&self) -> f64 {
        self.coefficients[0]
    }

    /// All coefficients, intercept first
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Coefficients of the standardized features (intercept excluded)
    pub fn feature_coefficients(&self) -> &[f64] {
        &self.coefficients[1..]
    }

    /// Training-set mean of each raw feature
    pub fn means(&self) -> &[f64] {
        &self.means
    }

    /// Training-set standard deviation of each raw feature
    pub fn stds(&self) -> &[f64] {
        &self.stds
    }

    /// Held-out mean absolute percentage error, as a fraction
    pub fn mape(&self) -> f64 {
        self.mape
    }

    /// Number of raw input features
    pub fn n_features(&self) -> usize {
        self.means.len()
    }

    /// Feature layout implied by the number of features, if it is one we know
    pub fn layout(&self) -> Option<FeatureLayout> {
        FeatureLayout::from_len(self.n_features())
    }
}

/// On-disk shape of a record. `betas` is stored as a column vector
/// (`[[b0], [b1], ...]`); a flat list is accepted as well.
#[derive(Serialize, Deserialize)]
struct RawRecord {
    #[serde(alias = "coefficients")]
    betas: Betas,
    means: Vec<f64>,
    stds: Vec<f64>,
    #[serde(default)]
    mape: f64,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum Betas {
    Column(Vec<Vec<f64>>),
    Flat(Vec<f64>),
}

impl TryFrom<RawRecord> for RegressionRecord {
    type Error = DataError;

    fn try_from(raw: RawRecord) -> Result<Self> {
        let coefficients = match raw.betas {
            Betas::Flat(values) => values,
            Betas::Column(rows) => rows
                .into_iter()
                .map(|row| match row.as_slice() {
                    [value] => Ok(*value),
                    _ => Err(DataError::DimensionMismatch {
                        expected: "1 value per beta row".to_string(),
                        actual: format!("{} values", row.len()),
                    }),
                })
                .collect::<Result<Vec<_>>>()?,
        };

        RegressionRecord::new(coefficients, raw.means, raw.stds, raw.mape)
    }
}

impl From<RegressionRecord> for RawRecord {
    fn from(record: RegressionRecord) -> Self {
        Self {
            betas: Betas::Column(record.coefficients.into_iter().map(|b| vec![b]).collect()),
            means: record.means,
            stds: record.stds,
            mape: record.mape,
        }
    }
}
