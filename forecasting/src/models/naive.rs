//! Naive forecast: repeat the last observation

use crate::models::{assemble, baseline_descriptor, ForecastModel, TrainedForecastModel};
use tsea_core::{AlgorithmDescriptor, AnalysisError, CatalogueError, Forecast, Result, TimeSeries};

#[derive(Debug, Clone)]
pub struct Naive {
    descriptor: AlgorithmDescriptor,
}

#[derive(Debug, Clone)]
pub struct TrainedNaive {
    last_value: f64,
    residuals: Vec<f64>,
}

impl Naive {
    pub fn new() -> std::result::Result<Self, CatalogueError> {
        Ok(Self {
            descriptor: baseline_descriptor(
                "naive",
                "Repeat the last observed value.",
                "Every future step takes the value of the last observation. \
                 A reference point for any other forecasting method.",
                false,
            )?,
        })
    }

    pub fn train(&self, values: &[f64]) -> Result<TrainedNaive> {
        let last_value = *values.last().ok_or_else(|| {
            AnalysisError::execution("Naive forecast needs at least one observation")
        })?;

        let residuals = values.windows(2).map(|w| w[1] - w[0]).collect();
        Ok(TrainedNaive {
            last_value,
            residuals,
        })
    }
}

impl TrainedForecastModel for TrainedNaive {
    fn predict(&self, horizon: usize) -> Vec<f64> {
        vec![self.last_value; horizon]
    }

    fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    fn spread(&self, step: usize) -> f64 {
        (step as f64).sqrt()
    }
}

impl ForecastModel for Naive {
    fn descriptor(&self) -> &AlgorithmDescriptor {
        &self.descriptor
    }

    fn forecast(&self, series: &TimeSeries, horizon: usize, _: Option<usize>) -> Result<Forecast> {
        let trained = self.train(series.values())?;
        assemble(series, &trained, horizon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naive_repeats_last_value() {
        let trained = Naive::new().unwrap().train(&[3.0, 5.0, 4.0]).unwrap();
        assert_eq!(trained.predict(3), vec![4.0, 4.0, 4.0]);
        assert_eq!(trained.residuals(), &[2.0, -1.0]);
    }

    #[test]
    fn test_naive_rejects_empty_series() {
        assert!(Naive::new().unwrap().train(&[]).is_err());
    }
}
