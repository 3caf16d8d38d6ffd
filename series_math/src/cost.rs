//! Segment costs for change point detection

use crate::{MathError, Result};

/// Squared-deviation (L2) cost of contiguous segments
///
/// Prefix sums make each segment query constant time:
/// `cost(a, b) = Σ y² - (Σ y)² / (b - a)` over `y[a..b]`.
#[derive(Debug, Clone)]
pub struct L2Cost {
    sums: Vec<f64>,
    squares: Vec<f64>,
}

impl L2Cost {
    pub fn new(values: &[f64]) -> Result<Self> {
        if values.iter().any(|v| !v.is_finite()) {
            return Err(MathError::InvalidInput(
                "Segment costs need finite values".to_string(),
            ));
        }

        let mut sums = Vec::with_capacity(values.len() + 1);
        let mut squares = Vec::with_capacity(values.len() + 1);
        sums.push(0.0);
        squares.push(0.0);
        for v in values {
            sums.push(sums[sums.len() - 1] + v);
            squares.push(squares[squares.len() - 1] + v * v);
        }

        Ok(Self { sums, squares })
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.sums.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cost of `values[start..end]`, zero for an empty segment
    pub fn cost(&self, start: usize, end: usize) -> f64 {
        if end <= start {
            return 0.0;
        }

        let n = (end - start) as f64;
        let sum = self.sums[end] - self.sums[start];
        let squares = self.squares[end] - self.squares[start];
        (squares - sum * sum / n).max(0.0)
    }

    /// Total cost of the segmentation ending at each breakpoint
    ///
    /// `breakpoints` are sorted segment ends, the last one being `len()`.
    pub fn sum_of_costs(&self, breakpoints: &[usize]) -> f64 {
        let mut start = 0;
        let mut total = 0.0;
        for &end in breakpoints {
            total += self.cost(start, end);
            start = end;
        }
        total
    }
}
