//! Distances between equally sized subsequences

use crate::{MathError, Result};

/// Standard deviations below this are treated as a flat subsequence
const FLAT_TOLERANCE: f64 = 1e-12;

/// Z-normalise a subsequence to zero mean and unit population variance
///
/// A flat subsequence normalises to all zeros.
pub fn z_normalize(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let std_dev = (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();

    if std_dev < FLAT_TOLERANCE {
        return vec![0.0; values.len()];
    }

    values.iter().map(|v| (v - mean) / std_dev).collect()
}

/// Minkowski distance of order `p` between two subsequences
pub fn minkowski_distance(a: &[f64], b: &[f64], p: f64) -> Result<f64> {
    if a.len() != b.len() {
        return Err(MathError::InvalidInput(format!(
            "Subsequence lengths differ ({} vs {})",
            a.len(),
            b.len()
        )));
    }
    if !(p > 0.0) {
        return Err(MathError::InvalidInput(format!(
            "Minkowski order must be positive, got {}",
            p
        )));
    }

    let total: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs().powf(p))
        .sum();
    Ok(total.powf(1.0 / p))
}

/// Euclidean distance between the z-normalised forms of two subsequences
pub fn z_normalized_distance(a: &[f64], b: &[f64]) -> Result<f64> {
    minkowski_distance(&z_normalize(a), &z_normalize(b), 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_z_normalize() {
        let z = z_normalize(&[1.0, 2.0, 3.0]);
        assert_relative_eq!(z.iter().sum::<f64>(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(z[2], 1.224744871391589, epsilon = 1e-12);
        assert_eq!(z_normalize(&[4.0, 4.0]), vec![0.0, 0.0]);
    }

    #[test]
    fn test_scaled_copies_are_identical_after_normalization() {
        let d = z_normalized_distance(&[1.0, 2.0, 3.0], &[10.0, 20.0, 30.0]).unwrap();
        assert_relative_eq!(d, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_minkowski_distance() {
        assert_relative_eq!(minkowski_distance(&[0.0, 0.0], &[3.0, 4.0], 2.0).unwrap(), 5.0, epsilon = 1e-12);
        assert_relative_eq!(minkowski_distance(&[0.0, 0.0], &[3.0, 4.0], 1.0).unwrap(), 7.0);
        assert!(minkowski_distance(&[0.0], &[1.0, 2.0], 2.0).is_err());
        assert!(minkowski_distance(&[0.0], &[1.0], 0.0).is_err());
    }
}
