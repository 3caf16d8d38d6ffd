//! Rolling window averages
//!
//! Contains:
//! - Trailing rolling mean that tolerates missing values
//! - Centred moving average used for trend estimation

use crate::{MathError, Result};
use std::collections::VecDeque;

/// Trailing rolling mean over the last `window` observations
///
/// Missing values (NaN) occupy a slot in the window but are left out of
/// the average, so a window holding at least one observation always yields
/// a value.
#[derive(Debug, Clone)]
pub struct RollingMean {
    window: usize,
    values: VecDeque<f64>,
    sum: f64,
    count: usize,
}

impl RollingMean {
    /// Create a new rolling mean with the specified window
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(MathError::InvalidInput(
                "Window must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            window,
            values: VecDeque::with_capacity(window),
            sum: 0.0,
            count: 0,
        })
    }

    /// Push a new observation into the window
    pub fn update(&mut self, value: f64) {
        self.values.push_back(value);
        if !value.is_nan() {
            self.sum += value;
            self.count += 1;
        }

        if self.values.len() > self.window {
            if let Some(old) = self.values.pop_front() {
                if !old.is_nan() {
                    self.sum -= old;
                    self.count -= 1;
                }
            }
        }
    }

    /// Current average, NaN while the window holds no observation
    pub fn value(&self) -> f64 {
        if self.count == 0 {
            f64::NAN
        } else {
            self.sum / self.count as f64
        }
    }

    /// Get the window length
    pub fn window(&self) -> usize {
        self.window
    }
}

/// Rolling mean of every position, with a minimum of one observation
pub fn rolling_mean(values: &[f64], window: usize) -> Result<Vec<f64>> {
    let mut rolling = RollingMean::new(window)?;

    Ok(values
        .iter()
        .map(|&v| {
            rolling.update(v);
            rolling.value()
        })
        .collect())
}

/// Centred moving average of order `period`
///
/// For an even period this is the 2×m average (half weights on the two
/// outermost points), so the result is aligned on the original samples.
/// Positions without a full window are NaN.
pub fn centered_moving_average(values: &[f64], period: usize) -> Result<Vec<f64>> {
    if period < 2 {
        return Err(MathError::InvalidInput(
            "Period must be at least 2".to_string(),
        ));
    }
    if values.len() < period + 1 {
        return Err(MathError::InsufficientData(format!(
            "Need more than {} values for a centred moving average, have {}",
            period,
            values.len()
        )));
    }

    let weights = centred_weights(period);
    let half = weights.len() / 2;
    let mut trend = vec![f64::NAN; values.len()];

    for (i, slot) in trend
        .iter_mut()
        .enumerate()
        .take(values.len() - half)
        .skip(half)
    {
        *slot = values[i - half..=i + half]
            .iter()
            .zip(weights.iter())
            .map(|(v, w)| v * w)
            .sum();
    }

    Ok(trend)
}

fn centred_weights(period: usize) -> Vec<f64> {
    let p = period as f64;
    if period % 2 == 1 {
        vec![1.0 / p; period]
    } else {
        let mut weights = vec![1.0 / p; period + 1];
        weights[0] = 0.5 / p;
        weights[period] = 0.5 / p;
        weights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rolling_mean_min_periods_one() {
        let smoothed = rolling_mean(&[1.0, 2.0, 3.0, 4.0], 2).unwrap();
        assert_eq!(smoothed, vec![1.0, 1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_rolling_mean_skips_missing() {
        let smoothed = rolling_mean(&[1.0, f64::NAN, 3.0, f64::NAN, f64::NAN], 2).unwrap();
        assert_eq!(smoothed[0], 1.0);
        assert_eq!(smoothed[1], 1.0);
        assert_eq!(smoothed[2], 3.0);
        assert_eq!(smoothed[3], 3.0);
        assert!(smoothed[4].is_nan());
    }

    #[test]
    fn test_rolling_mean_rejects_zero_window() {
        assert!(rolling_mean(&[1.0], 0).is_err());
    }

    #[test]
    fn test_centered_moving_average_odd_period() {
        let trend = centered_moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0], 3).unwrap();
        assert!(trend[0].is_nan());
        assert_relative_eq!(trend[1], 2.0, epsilon = 1e-12);
        assert_relative_eq!(trend[3], 4.0, epsilon = 1e-12);
        assert!(trend[4].is_nan());
    }

    #[test]
    fn test_centered_moving_average_even_period() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let trend = centered_moving_average(&values, 4).unwrap();
        assert!(trend[1].is_nan());
        // 0.125*1 + 0.25*(2+3+4) + 0.125*5
        assert_relative_eq!(trend[2], 3.0, epsilon = 1e-12);
        assert_relative_eq!(trend[3], 4.0, epsilon = 1e-12);
        assert!(trend[4].is_nan());
    }
}
