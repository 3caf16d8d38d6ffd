//! Descriptive statistics over `f64` slices
//!
//! Thin wrappers around `statrs` that turn the empty-input NaN convention
//! into explicit errors where callers need a usable number.

use crate::{MathError, Result};
use statrs::distribution::{ContinuousCDF, Normal};
use statrs::statistics::Statistics;

/// Arithmetic mean of the values
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot compute the mean of an empty series".to_string(),
        ));
    }

    Ok(values.iter().mean())
}

/// Population standard deviation of the values
pub fn population_std_dev(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot compute the standard deviation of an empty series".to_string(),
        ));
    }

    Ok(values.iter().population_std_dev())
}

/// Root mean square of the values, `0.0` for an empty slice
///
/// Used for residual scales where "no residuals" means "no spread".
pub fn root_mean_square(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    (values.iter().map(|v| v * v).sum::<f64>() / values.len() as f64).sqrt()
}

/// Median of the values
pub fn median(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot compute the median of an empty series".to_string(),
        ));
    }
    if values.iter().any(|v| v.is_nan()) {
        return Err(MathError::InvalidInput(
            "Median is undefined for series containing NaN".to_string(),
        ));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;

    if sorted.len() % 2 == 0 {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Ok(sorted[mid])
    }
}

/// Quantile of the standard normal distribution
///
/// `normal_quantile(0.975)` is the familiar 1.96 multiplier of a 95% interval.
pub fn normal_quantile(probability: f64) -> Result<f64> {
    if !(probability > 0.0 && probability < 1.0) {
        return Err(MathError::InvalidInput(format!(
            "Probability must be in (0, 1), got {}",
            probability
        )));
    }

    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| MathError::CalculationError(format!("Standard normal: {}", e)))?;
    Ok(normal.inverse_cdf(probability))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_and_std_dev() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&values).unwrap(), 5.0);
        assert_relative_eq!(population_std_dev(&values).unwrap(), 2.0);
    }

    #[test]
    fn test_empty_inputs_fail() {
        assert!(matches!(mean(&[]), Err(MathError::InsufficientData(_))));
        assert!(matches!(median(&[]), Err(MathError::InsufficientData(_))));
        assert_eq!(root_mean_square(&[]), 0.0);
    }

    #[test]
    fn test_median_even_and_odd() {
        assert_relative_eq!(median(&[3.0, 1.0, 2.0]).unwrap(), 2.0);
        assert_relative_eq!(median(&[4.0, 1.0, 3.0, 2.0]).unwrap(), 2.5);
    }

    #[test]
    fn test_normal_quantile() {
        assert_relative_eq!(normal_quantile(0.975).unwrap(), 1.959964, epsilon = 1e-5);
        assert!(normal_quantile(1.0).is_err());
    }
}
