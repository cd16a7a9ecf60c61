//! Linear regression fitted by batch gradient descent
//!
//! Features are z-scored with the training split's means and population
//! standard deviations, a column of ones is prepended for the intercept and
//! the coefficients start at zero. The result is a [`RegressionRecord`] the
//! standardized predictor can evaluate directly.

use std::collections::HashSet;

use ndarray::{s, Axis};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use fe_core::data::{FeatureLayout, RegressionRecord};

use crate::base::coefficient::standardized_terms;
use crate::base::{FitStatistics, ModelError, ModelSummary, ModelType, Result};
use crate::lm::metrics::{mean_absolute_percentage_error, mean_squared_error, r2_score};
use crate::lm::result::GradientDescentResult;
use crate::lm::{FitConfig, Matrix, Vector};

// ==================== Building Blocks ====================

/// Z-score the columns of `x`.
///
/// Means and standard deviations are computed from `x` (population standard
/// deviation) unless given. Returns the standardized matrix together with the
/// means and standard deviations used.
pub fn normalize_z(x: &Matrix, means: Option<&Vector>, stds: Option<&Vector>) -> (Matrix, Vector, Vector) {
    let means = means
        .cloned()
        .or_else(|| x.mean_axis(Axis(0)))
        .unwrap_or_else(|| Vector::zeros(x.ncols()));
    let stds = stds.cloned().unwrap_or_else(|| x.std_axis(Axis(0), 0.0));

    let z = (x - &means) / &stds;
    (z, means, stds)
}

/// Prepend a column of ones for the intercept
pub fn prepare_feature(z: &Matrix) -> Matrix {
    let mut x = Matrix::ones((z.nrows(), z.ncols() + 1));
    x.slice_mut(s![.., 1..]).assign(z);
    x
}

/// `X β`
pub fn calc_linreg(x: &Matrix, beta: &Vector) -> Vector {
    x.dot(beta)
}

/// Half mean squared error, `1/(2m) eᵀe`
pub fn compute_cost(x: &Matrix, y: &Vector, beta: &Vector) -> f64 {
    let e = calc_linreg(x, beta) - y;
    let m = e.len() as f64;
    e.dot(&e) / (2.0 * m)
}

/// Run `iterations` steps of batch gradient descent from `beta`.
///
/// Returns the final coefficients and the cost before every step.
pub fn gradient_descent(
    x: &Matrix,
    y: &Vector,
    mut beta: Vector,
    alpha: f64,
    iterations: usize,
) -> (Vector, Vec<f64>) {
    let m = x.nrows() as f64;
    let mut costs = Vec::with_capacity(iterations);

    for _ in 0..iterations {
        costs.push(compute_cost(x, y, &beta));
        let error = calc_linreg(x, &beta) - y;
        let gradient = x.t().dot(&error) * (alpha / m);
        beta -= &gradient;
    }

    (beta, costs)
}

/// Rows of a dataset divided into a training and a test part
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub x_train: Matrix,
    pub x_test: Matrix,
    pub y_train: Vector,
    pub y_test: Vector,
}

/// Hold out `floor(n * test_size)` randomly chosen rows for testing.
///
/// Test rows keep the order they were drawn in; training rows keep their
/// original order.
pub fn split_data(
    features: &Matrix,
    target: &Vector,
    random_state: Option<u64>,
    test_size: f64,
) -> Result<TrainTestSplit> {
    let n = features.nrows();
    if target.len() != n {
        return Err(ModelError::DimensionMismatch {
            expected: format!("{} target values", n),
            actual: format!("{} target values", target.len()),
        });
    }

    let n_test = ((n as f64 * test_size) as usize).min(n);
    let mut rng = match random_state {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let test_index = rand::seq::index::sample(&mut rng, n, n_test).into_vec();
    let held_out: HashSet<usize> = test_index.iter().copied().collect();
    let train_index: Vec<usize> = (0..n).filter(|i| !held_out.contains(i)).collect();

    Ok(TrainTestSplit {
        x_train: features.select(Axis(0), &train_index),
        x_test: features.select(Axis(0), &test_index),
        y_train: target.select(Axis(0), &train_index),
        y_test: target.select(Axis(0), &test_index),
    })
}

// ==================== Regressor ====================

/// Linear regression fitted by gradient descent on standardized features
#[derive(Debug, Clone)]
pub struct GradientDescentRegressor {
    /// Configuration
    config: FitConfig,
    /// Train/test rows
    split: TrainTestSplit,
    /// Standardized training features
    z_train: Matrix,
    /// Training means
    means: Vector,
    /// Training standard deviations
    stds: Vector,
    /// Fitted result
    result: Option<GradientDescentResult>,
}

impl GradientDescentRegressor {
    /// Split the data and standardize the training features
    pub fn new(features: &Matrix, target: &Vector, config: FitConfig) -> Result<Self> {
        config.validate()?;

        let (n, p) = features.dim();
        if n == 0 || p == 0 {
            return Err(ModelError::InsufficientData {
                n_samples: n,
                n_predictors: p,
            });
        }

        let split = split_data(features, target, config.random_state, config.test_size)?;
        if split.x_train.nrows() == 0 {
            return Err(ModelError::InsufficientData {
                n_samples: 0,
                n_predictors: p,
            });
        }

        let (z_train, means, stds) = normalize_z(&split.x_train, None, None);
        if let Some(column) = stds.iter().position(|&s| s == 0.0 || !s.is_finite()) {
            return Err(ModelError::NumericalError {
                message: format!("feature column {} has no spread in the training split", column),
                operation: "normalize_z".to_string(),
            });
        }

        Ok(Self {
            config,
            split,
            z_train,
            means,
            stds,
            result: None,
        })
    }

    /// Fit the model
    pub fn fit(mut self) -> Result<Self> {
        let x = prepare_feature(&self.z_train);
        let beta = Vector::zeros(x.ncols());

        let (coefficients, cost_history) = gradient_descent(
            &x,
            &self.split.y_train,
            beta,
            self.config.alpha,
            self.config.iterations,
        );

        if coefficients.iter().any(|b| !b.is_finite()) {
            return Err(ModelError::NumericalError {
                message: format!("coefficients diverged with alpha = {}", self.config.alpha),
                operation: "gradient_descent".to_string(),
            });
        }

        debug!(
            iterations = cost_history.len(),
            final_cost = cost_history.last().copied().unwrap_or(f64::NAN),
            "gradient descent finished"
        );

        self.result = Some(GradientDescentResult {
            coefficients,
            cost_history,
            n_train: self.split.x_train.nrows(),
            n_test: self.split.x_test.nrows(),
        });
        Ok(self)
    }

    /// Predict for raw feature rows using the training standardization
    pub fn predict(&self, features: &Matrix) -> Result<Vector> {
        let result = self.result.as_ref().ok_or(ModelError::NotFitted)?;

        if features.ncols() != self.means.len() {
            return Err(ModelError::DimensionMismatch {
                expected: format!("{} feature columns", self.means.len()),
                actual: format!("{} feature columns", features.ncols()),
            });
        }

        let (z, _, _) = normalize_z(features, Some(&self.means), Some(&self.stds));
        Ok(calc_linreg(&prepare_feature(&z), &result.coefficients))
    }

    /// Score the fitted model on the test split
    pub fn score(&self) -> Result<FitStatistics> {
        let result = self.result.as_ref().ok_or(ModelError::NotFitted)?;

        if self.split.x_test.nrows() == 0 {
            return Err(ModelError::InsufficientData {
                n_samples: 0,
                n_predictors: self.means.len(),
            });
        }

        let y_pred = self.predict(&self.split.x_test)?;
        let y = &self.split.y_test;

        Ok(FitStatistics {
            r_squared: Some(r2_score(y, &y_pred)),
            mse: Some(mean_squared_error(y, &y_pred)),
            mape: Some(mean_absolute_percentage_error(y, &y_pred)),
            n_train: result.n_train,
            n_test: result.n_test,
            iterations: Some(result.iterations()),
            final_cost: result.final_cost(),
        })
    }

    /// Export the fitted model as a record for the standardized predictor
    pub fn to_record(&self) -> Result<RegressionRecord> {
        let result = self.result.as_ref().ok_or(ModelError::NotFitted)?;
        let mape = self.score()?.mape.unwrap_or(f64::NAN);

        Ok(RegressionRecord::new(
            result.coefficients.to_vec(),
            self.means.to_vec(),
            self.stds.to_vec(),
            mape,
        )?)
    }

    /// Generate model summary
    pub fn summary(&self) -> Result<ModelSummary> {
        let result = self.result.as_ref().ok_or(ModelError::NotFitted)?;
        let statistics = self.score()?;
        let names = FeatureLayout::from_len(self.means.len()).map(FeatureLayout::names);

        Ok(ModelSummary {
            model_type: ModelType::GradientDescent,
            label: String::new(),
            n_features: self.means.len(),
            coefficients: standardized_terms(
                result.coefficients.as_slice().unwrap_or(&[]),
                self.means.as_slice().unwrap_or(&[]),
                self.stds.as_slice().unwrap_or(&[]),
                names,
            ),
            mape: statistics.mape.unwrap_or(f64::NAN),
            fit_statistics: Some(statistics),
        })
    }

    /// Fitted coefficients, intercept first
    pub fn coefficients(&self) -> Option<&Vector> {
        self.result.as_ref().map(|r| &r.coefficients)
    }

    /// Cost before each iteration
    pub fn cost_history(&self) -> Option<&[f64]> {
        self.result.as_ref().map(|r| r.cost_history.as_slice())
    }

    pub fn result(&self) -> Option<&GradientDescentResult> {
        self.result.as_ref()
    }

    /// Training means of the raw features
    pub fn means(&self) -> &Vector {
        &self.means
    }

    /// Training standard deviations of the raw features
    pub fn stds(&self) -> &Vector {
        &self.stds
    }

    pub fn split(&self) -> &TrainTestSplit {
        &self.split
    }

    pub fn is_fitted(&self) -> bool {
        self.result.is_some()
    }
}
