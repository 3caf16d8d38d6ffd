//! # Series Math
//!
//! Numeric building blocks for the time-series analysis algorithms.
//! This crate provides descriptive statistics, point-accuracy metrics,
//! rolling means, least-squares line fits, segment costs and subsequence
//! distances.

use thiserror::Error;

pub mod cost;
pub mod distance;
pub mod metrics;
pub mod regression;
pub mod rolling;
pub mod stats;

pub use metrics::{point_metrics, PointMetrics};

/// Errors that can occur in series calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for series math operations
pub type Result<T> = std::result::Result<T, MathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_carry_context() {
        let err = MathError::InsufficientData("need 3 values".to_string());
        assert_eq!(
            err.to_string(),
            "Insufficient data for calculation: need 3 values"
        );
    }
}
