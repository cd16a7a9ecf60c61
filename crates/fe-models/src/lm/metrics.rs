//! Hold-out accuracy metrics
//!
//! All metrics return NaN for empty input.

use super::Vector;

/// Coefficient of determination
pub fn r2_score(y: &Vector, y_pred: &Vector) -> f64 {
    let mean = y.sum() / y.len() as f64;
    let tot: f64 = y.iter().map(|&yi| (yi - mean).powi(2)).sum();
    let res: f64 = y
        .iter()
        .zip(y_pred.iter())
        .map(|(&yi, &pi)| (yi - pi).powi(2))
        .sum();
    1.0 - res / tot
}

/// Mean of squared residuals
pub fn mean_squared_error(target: &Vector, pred: &Vector) -> f64 {
    let sum: f64 = target
        .iter()
        .zip(pred.iter())
        .map(|(&t, &p)| (t - p).powi(2))
        .sum();
    sum / target.len() as f64
}

/// Mean of `|target - pred| / target`, as a fraction.
///
/// The denominator keeps its sign, so negative targets pull the mean down.
pub fn mean_absolute_percentage_error(target: &Vector, pred: &Vector) -> f64 {
    let sum: f64 = target
        .iter()
        .zip(pred.iter())
        .map(|(&t, &p)| (t - p).abs() / t)
        .sum();
    sum / target.len() as f64
}
