//! Point-accuracy metrics for evaluating forecasts against held-out actuals

use crate::{MathError, Result};
use serde::Serialize;

/// Actual values at or below this magnitude are left out of MAPE
pub const MAPE_ZERO_TOLERANCE: f64 = 1e-12;

/// Point forecast accuracy over the overlap of forecast and actual values
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointMetrics {
    /// Mean Absolute Error
    pub mae: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error, NaN when every actual is zero
    pub mape: f64,
}

/// Compute MAE, RMSE and MAPE of `predicted` against `actual`
///
/// Both inputs are truncated to their common length before reduction.
/// MAPE only averages over actual values whose magnitude exceeds
/// [`MAPE_ZERO_TOLERANCE`]; when none do, it is NaN rather than an error.
pub fn point_metrics(actual: &[f64], predicted: &[f64]) -> Result<PointMetrics> {
    if actual.is_empty() || predicted.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot compute metrics on empty arrays".to_string(),
        ));
    }

    let n = actual.len().min(predicted.len());
    let actual = &actual[..n];
    let predicted = &predicted[..n];

    Ok(PointMetrics {
        mae: mean_absolute_error(actual, predicted),
        rmse: root_mean_squared_error(actual, predicted),
        mape: mean_absolute_percentage_error(actual, predicted),
    })
}

/// Mean absolute error over the common length, NaN when it is zero
pub fn mean_absolute_error(actual: &[f64], predicted: &[f64]) -> f64 {
    let errors = errors(actual, predicted);
    if errors.is_empty() {
        return f64::NAN;
    }

    errors.iter().map(|e| e.abs()).sum::<f64>() / errors.len() as f64
}

/// Root mean squared error over the common length, NaN when it is zero
pub fn root_mean_squared_error(actual: &[f64], predicted: &[f64]) -> f64 {
    let errors = errors(actual, predicted);
    if errors.is_empty() {
        return f64::NAN;
    }

    (errors.iter().map(|e| e.powi(2)).sum::<f64>() / errors.len() as f64).sqrt()
}

/// Mean absolute percentage error (in percent) over non-zero actuals
pub fn mean_absolute_percentage_error(actual: &[f64], predicted: &[f64]) -> f64 {
    let ratios: Vec<f64> = actual
        .iter()
        .zip(predicted.iter())
        .filter(|(a, _)| a.abs() > MAPE_ZERO_TOLERANCE)
        .map(|(a, p)| ((a - p) / a).abs())
        .collect();

    if ratios.is_empty() {
        return f64::NAN;
    }

    ratios.iter().sum::<f64>() / ratios.len() as f64 * 100.0
}

fn errors(actual: &[f64], predicted: &[f64]) -> Vec<f64> {
    actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| a - p)
        .collect()
}
