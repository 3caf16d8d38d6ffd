//! Result vocabulary shared by every algorithm

use crate::dataset::TimeSeries;
use crate::error::{AnalysisError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use series_math::PointMetrics;

/// What an algorithm computed for one request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisOutput {
    Forecast(Forecast),
    Comparison(ComparisonReport),
    ChangePoints(ChangePoints),
    Smoothed(TimeSeries),
    Decomposition(Decomposition),
    SimilarPatterns(SimilarPatterns),
}

/// Lower and upper bound of a prediction interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Interval {
    pub lower: f64,
    pub upper: f64,
}

/// Point forecast over a horizon, optionally with prediction intervals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    intervals: Option<Vec<Interval>>,
}

impl Forecast {
    pub fn new(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(AnalysisError::execution(format!(
                "forecast has {} values for {} timestamps",
                values.len(),
                timestamps.len()
            )));
        }

        Ok(Self {
            timestamps,
            values,
            intervals: None,
        })
    }

    /// Attach one interval per forecast step
    pub fn with_intervals(mut self, intervals: Vec<Interval>) -> Result<Self> {
        if intervals.len() != self.values.len() {
            return Err(AnalysisError::execution(format!(
                "forecast has {} intervals for {} values",
                intervals.len(),
                self.values.len()
            )));
        }

        self.intervals = Some(intervals);
        Ok(self)
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn intervals(&self) -> Option<&[Interval]> {
        self.intervals.as_deref()
    }

    /// Number of forecast steps
    pub fn horizon(&self) -> usize {
        self.values.len()
    }
}

/// Forward forecast of one comparison candidate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelForecast {
    pub name: String,
    pub timestamps: Vec<DateTime<Utc>>,
    pub values: Vec<f64>,
}

/// Hold-out accuracy of one comparison candidate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelMetrics {
    pub name: String,
    pub mae: f64,
    pub rmse: f64,
    /// Percent, NaN when no actual value is usable
    pub mape: f64,
}

impl ModelMetrics {
    pub fn new(name: impl Into<String>, metrics: PointMetrics) -> Self {
        Self {
            name: name.into(),
            mae: metrics.mae,
            rmse: metrics.rmse,
            mape: metrics.mape,
        }
    }
}

/// Outcome of comparing several forecasting candidates on one series
///
/// `forecasts` and `metrics` follow the candidates' selection order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub horizon: usize,
    pub history: TimeSeries,
    pub forecasts: Vec<ModelForecast>,
    pub metrics: Vec<ModelMetrics>,
}

impl ComparisonReport {
    pub fn metrics_for(&self, name: &str) -> Option<&ModelMetrics> {
        self.metrics.iter().find(|m| m.name == name)
    }

    pub fn forecast_for(&self, name: &str) -> Option<&ModelForecast> {
        self.forecasts.iter().find(|f| f.name == name)
    }
}

/// Detected change points, excluding the end of the series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangePoints {
    /// Positions in the analysed series where a new segment starts
    pub indices: Vec<usize>,
    pub timestamps: Vec<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decomposition {
    pub timestamps: Vec<DateTime<Utc>>,
    pub observed: Vec<f64>,
    pub trend: Vec<f64>,
    pub seasonal: Vec<f64>,
    pub residual: Vec<f64>,
}

/// One subsequence similar to the query window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternMatch {
    pub start: DateTime<Utc>,
    pub distance: f64,
    pub window: TimeSeries,
}

/// Query window and its closest matches, best first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarPatterns {
    pub pattern: TimeSeries,
    pub matches: Vec<PatternMatch>,
}
