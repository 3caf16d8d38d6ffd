//! Historic average forecast: the mean of every observation

use crate::models::{assemble, baseline_descriptor, ForecastModel, TrainedForecastModel};
use series_math::stats;
use tsea_core::{AlgorithmDescriptor, CatalogueError, Forecast, Result, TimeSeries};

#[derive(Debug, Clone)]
pub struct HistoricAverage {
    descriptor: AlgorithmDescriptor,
}

#[derive(Debug, Clone)]
pub struct TrainedHistoricAverage {
    mean: f64,
    observations: usize,
    residuals: Vec<f64>,
}

impl HistoricAverage {
    pub fn new() -> std::result::Result<Self, CatalogueError> {
        Ok(Self {
            descriptor: baseline_descriptor(
                "historic-average",
                "Forecast the mean of the history.",
                "Every future step takes the arithmetic mean of all observations.",
                false,
            )?,
        })
    }

    pub fn train(&self, values: &[f64]) -> Result<TrainedHistoricAverage> {
        let mean = stats::mean(values)?;
        Ok(TrainedHistoricAverage {
            mean,
            observations: values.len(),
            residuals: values.iter().map(|v| v - mean).collect(),
        })
    }
}

impl TrainedForecastModel for TrainedHistoricAverage {
    fn predict(&self, horizon: usize) -> Vec<f64> {
        vec![self.mean; horizon]
    }

    fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    fn spread(&self, _: usize) -> f64 {
        (1.0 + 1.0 / self.observations as f64).sqrt()
    }
}

impl ForecastModel for HistoricAverage {
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
    use approx::assert_relative_eq;

    #[test]
    fn test_historic_average() {
        let values: Vec<f64> = (0..54).map(f64::from).collect();
        let trained = HistoricAverage::new().unwrap().train(&values).unwrap();

        for value in trained.predict(6) {
            assert_relative_eq!(value, 26.5, epsilon = 1e-12);
        }
        assert_relative_eq!(trained.spread(1), (1.0 + 1.0 / 54.0_f64).sqrt());
    }
}
