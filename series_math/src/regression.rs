//! Ordinary least-squares line fits

use crate::{MathError, Result};

/// A fitted straight line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    /// Change in `y` per unit of `x`
    pub slope: f64,
    /// Value of the line at `x = 0`
    pub intercept: f64,
}

impl LineFit {
    /// Evaluate the line at `x`
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit a least-squares line through the `(x, y)` pairs
pub fn linear_fit(x: &[f64], y: &[f64]) -> Result<LineFit> {
    if x.len() != y.len() {
        return Err(MathError::InvalidInput(format!(
            "x and y lengths differ ({} vs {})",
            x.len(),
            y.len()
        )));
    }
    if x.len() < 2 {
        return Err(MathError::InsufficientData(
            "Need at least 2 points for a line fit".to_string(),
        ));
    }

    let n = x.len() as f64;
    let x_mean = x.iter().sum::<f64>() / n;
    let y_mean = y.iter().sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        numerator += (xi - x_mean) * (yi - y_mean);
        denominator += (xi - x_mean) * (xi - x_mean);
    }

    if denominator.abs() < 1e-10 {
        return Err(MathError::CalculationError(
            "Cannot calculate slope: x values are too similar".to_string(),
        ));
    }

    let slope = numerator / denominator;
    Ok(LineFit {
        slope,
        intercept: y_mean - slope * x_mean,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_fit_recovers_line() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [1.0, 3.0, 5.0, 7.0];

        let fit = linear_fit(&x, &y).unwrap();
        assert_relative_eq!(fit.slope, 2.0);
        assert_relative_eq!(fit.intercept, 1.0);
        assert_relative_eq!(fit.at(10.0), 21.0);
    }

    #[test]
    fn test_linear_fit_degenerate_x() {
        assert!(linear_fit(&[1.0, 1.0], &[0.0, 2.0]).is_err());
        assert!(linear_fit(&[1.0], &[0.0]).is_err());
    }
}
