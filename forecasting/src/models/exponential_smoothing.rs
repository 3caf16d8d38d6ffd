//! Simple exponential smoothing

use crate::models::{assemble, baseline_descriptor, ForecastModel, TrainedForecastModel};
use tsea_core::{AlgorithmDescriptor, AnalysisError, CatalogueError, Forecast, Result, TimeSeries};

/// Candidate smoothing factors tried when alpha is not fixed
const ALPHA_GRID_STEPS: usize = 99;

/// Simple exponential smoothing model
///
/// Unless a smoothing factor is fixed, alpha is chosen from the grid
/// `0.01, 0.02, ..., 0.99` by minimising the in-sample one-step squared
/// error.
#[derive(Debug, Clone)]
pub struct SimpleExponentialSmoothing {
    descriptor: AlgorithmDescriptor,
    alpha: Option<f64>,
}

/// Trained exponential smoothing model
#[derive(Debug, Clone)]
pub struct TrainedExponentialSmoothing {
    alpha: f64,
    level: f64,
    residuals: Vec<f64>,
}

impl SimpleExponentialSmoothing {
    pub fn new() -> std::result::Result<Self, CatalogueError> {
        Ok(Self {
            descriptor: baseline_descriptor(
                "ses",
                "Simple exponential smoothing with a fitted smoothing factor.",
                "Forecasts the final smoothed level. The smoothing factor is \
                 chosen by minimising the one-step-ahead squared error.",
                false,
            )?,
            alpha: None,
        })
    }

    /// Use a fixed smoothing factor instead of searching for one
    pub fn with_alpha(mut self, alpha: f64) -> Result<Self> {
        if alpha <= 0.0 || alpha >= 1.0 {
            return Err(AnalysisError::execution("Alpha must be between 0 and 1"));
        }

        self.alpha = Some(alpha);
        Ok(self)
    }

    pub fn train(&self, values: &[f64]) -> Result<TrainedExponentialSmoothing> {
        if values.is_empty() {
            return Err(AnalysisError::execution(
                "Exponential smoothing needs at least one observation",
            ));
        }

        let alpha = match self.alpha {
            Some(alpha) => alpha,
            None => best_alpha(values),
        };
        let (level, residuals) = smooth(values, alpha);

        Ok(TrainedExponentialSmoothing {
            alpha,
            level,
            residuals,
        })
    }
}

/// Final level and one-step errors, the level starts at the first observation
fn smooth(values: &[f64], alpha: f64) -> (f64, Vec<f64>) {
    let mut level = values[0];
    let mut residuals = Vec::with_capacity(values.len().saturating_sub(1));

    for &value in &values[1..] {
        residuals.push(value - level);
        level = alpha * value + (1.0 - alpha) * level;
    }

    (level, residuals)
}

fn best_alpha(values: &[f64]) -> f64 {
    let mut best = (f64::INFINITY, 0.5);
    for step in 1..=ALPHA_GRID_STEPS {
        let alpha = step as f64 / 100.0;
        let (_, residuals) = smooth(values, alpha);
        let sse: f64 = residuals.iter().map(|e| e * e).sum();
        if sse < best.0 {
            best = (sse, alpha);
        }
    }
    best.1
}

impl TrainedExponentialSmoothing {
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn level(&self) -> f64 {
        self.level
    }
}

impl TrainedForecastModel for TrainedExponentialSmoothing {
    fn predict(&self, horizon: usize) -> Vec<f64> {
        vec![self.level; horizon]
    }

    fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    fn spread(&self, step: usize) -> f64 {
        (1.0 + (step - 1) as f64 * self.alpha * self.alpha).sqrt()
    }
}

impl ForecastModel for SimpleExponentialSmoothing {
    fn descriptor(&self) -> &AlgorithmDescriptor {
        &self.descriptor
    }

    fn forecast(&self, series: &TimeSeries, horizon: usize, _: Option<usize>) -> Result<Forecast> {
        let trained = self.train(series.values())?;
        assemble(series, &trained, horizon)
    }
}
