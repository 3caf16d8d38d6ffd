//! Random walk with drift

use crate::models::{assemble, baseline_descriptor, ForecastModel, TrainedForecastModel};
use tsea_core::{AlgorithmDescriptor, AnalysisError, CatalogueError, Forecast, Result, TimeSeries};

/// Extend the line joining the first and last observations
#[derive(Debug, Clone)]
pub struct Drift {
    descriptor: AlgorithmDescriptor,
}

#[derive(Debug, Clone)]
pub struct TrainedDrift {
    last_value: f64,
    slope: f64,
    observations: usize,
    residuals: Vec<f64>,
}

impl Drift {
    pub fn new() -> std::result::Result<Self, CatalogueError> {
        Ok(Self {
            descriptor: baseline_descriptor(
                "drift",
                "Extend the average historical change.",
                "The last observation plus the average change per step \
                 between the first and last observations.",
                false,
            )?,
        })
    }

    pub fn train(&self, values: &[f64]) -> Result<TrainedDrift> {
        let (first, last) = match (values.first(), values.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => {
                return Err(AnalysisError::execution(
                    "Drift forecast needs at least one observation",
                ))
            }
        };

        let slope = if values.len() > 1 {
            (last - first) / (values.len() - 1) as f64
        } else {
            0.0
        };
        let residuals = values.windows(2).map(|w| w[1] - w[0] - slope).collect();

        Ok(TrainedDrift {
            last_value: last,
            slope,
            observations: values.len(),
            residuals,
        })
    }
}

impl TrainedDrift {
    pub fn slope(&self) -> f64 {
        self.slope
    }
}

impl TrainedForecastModel for TrainedDrift {
    fn predict(&self, horizon: usize) -> Vec<f64> {
        (1..=horizon)
            .map(|h| self.last_value + self.slope * h as f64)
            .collect()
    }

    fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    fn spread(&self, step: usize) -> f64 {
        let h = step as f64;
        (h * (1.0 + h / self.observations as f64)).sqrt()
    }
}

impl ForecastModel for Drift {
    fn descriptor(&self) -> &AlgorithmDescriptor {
        &self.descriptor
    }

    fn forecast(&self, series: &TimeSeries, horizon: usize, _: Option<usize>) -> Result<Forecast> {
        let trained = self.train(series.values())?;
        assemble(series, &trained, horizon)
    }
}
