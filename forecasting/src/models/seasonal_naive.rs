//! Seasonal naive forecast: repeat the last observed season

use crate::models::{assemble, baseline_descriptor, ForecastModel, TrainedForecastModel};
use tsea_core::{AlgorithmDescriptor, AnalysisError, CatalogueError, Forecast, Result, TimeSeries};

#[derive(Debug, Clone)]
pub struct SeasonalNaive {
    descriptor: AlgorithmDescriptor,
}

#[derive(Debug, Clone)]
pub struct TrainedSeasonalNaive {
    last_season: Vec<f64>,
    residuals: Vec<f64>,
}

impl SeasonalNaive {
    pub fn new() -> std::result::Result<Self, CatalogueError> {
        Ok(Self {
            descriptor: baseline_descriptor(
                "seasonal-naive",
                "Repeat the last observed season.",
                "Each future step takes the value observed one season earlier.",
                true,
            )?,
        })
    }

    pub fn train(&self, values: &[f64], season_length: usize) -> Result<TrainedSeasonalNaive> {
        if season_length == 0 {
            return Err(AnalysisError::execution(
                "Season length must be at least 1",
            ));
        }
        if values.len() < season_length {
            return Err(AnalysisError::execution(format!(
                "Need at least season_length ({}) observations, have {}",
                season_length,
                values.len()
            )));
        }

        let residuals = values[season_length..]
            .iter()
            .zip(values.iter())
            .map(|(current, previous)| current - previous)
            .collect();

        Ok(TrainedSeasonalNaive {
            last_season: values[values.len() - season_length..].to_vec(),
            residuals,
        })
    }
}

impl TrainedSeasonalNaive {
    pub fn season_length(&self) -> usize {
        self.last_season.len()
    }
}

impl TrainedForecastModel for TrainedSeasonalNaive {
    fn predict(&self, horizon: usize) -> Vec<f64> {
        (0..horizon)
            .map(|i| self.last_season[i % self.last_season.len()])
            .collect()
    }

    fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    fn spread(&self, step: usize) -> f64 {
        let full_seasons = (step - 1) / self.season_length();
        ((full_seasons + 1) as f64).sqrt()
    }
}

impl ForecastModel for SeasonalNaive {
    fn descriptor(&self) -> &AlgorithmDescriptor {
        &self.descriptor
    }

    fn forecast(
        &self,
        series: &TimeSeries,
        horizon: usize,
        season_length: Option<usize>,
    ) -> Result<Forecast> {
        let season_length = season_length.ok_or_else(|| {
            AnalysisError::execution("Seasonal naive forecast requires a season length")
        })?;
        let trained = self.train(series.values(), season_length)?;
        assemble(series, &trained, horizon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_seasonal_naive_cycles_last_season() {
        let model = SeasonalNaive::new().unwrap();
        let trained = model.train(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0], 3).unwrap();

        assert_eq!(trained.predict(7), vec![5.0, 6.0, 7.0, 5.0, 6.0, 7.0, 5.0]);
        assert_eq!(trained.residuals(), &[3.0, 3.0, 3.0, 3.0]);
    }

    #[rstest]
    #[case(1, 1.0)]
    #[case(3, 1.0)]
    #[case(4, 2.0_f64.sqrt())]
    #[case(7, 3.0_f64.sqrt())]
    fn test_spread_grows_per_season(#[case] step: usize, #[case] expected: f64) {
        let trained = SeasonalNaive::new()
            .unwrap()
            .train(&[1.0, 2.0, 3.0, 4.0], 3)
            .unwrap();
        assert_eq!(trained.spread(step), expected);
    }

    #[test]
    fn test_season_longer_than_series() {
        let model = SeasonalNaive::new().unwrap();
        assert!(model.train(&[1.0, 2.0], 3).is_err());
        assert!(model.train(&[1.0, 2.0], 0).is_err());
    }
}
