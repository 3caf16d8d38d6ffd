//! Exposes a [`ForecastModel`] as a catalogue [`Algorithm`]

use crate::models::ForecastModel;
use log::debug;
use tsea_core::{
    Algorithm, AlgorithmDescriptor, AnalysisError, AnalysisOutput, Dataset, Params, Result,
};

/// Parse the `horizon` request parameter, which must be at least 1 and
/// within the bounds `descriptor` declares
pub(crate) fn parse_horizon(descriptor: &AlgorithmDescriptor, params: &Params) -> Result<usize> {
    let horizon = params.get_usize_within(descriptor, "horizon")?;
    if horizon == 0 {
        return Err(AnalysisError::execution("horizon must be at least 1"));
    }
    Ok(horizon)
}

/// Adapter running a forecasting model on one dataset column
#[derive(Debug, Clone)]
pub struct ForecastBackend<M> {
    model: M,
}

impl<M: ForecastModel> ForecastBackend<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }
}

impl<M: ForecastModel> Algorithm for ForecastBackend<M> {
    fn descriptor(&self) -> &AlgorithmDescriptor {
        self.model.descriptor()
    }

    fn compute(&self, dataset: &Dataset, column: &str, params: &Params) -> Result<AnalysisOutput> {
        let series = dataset.series(column)?;
        let horizon = parse_horizon(self.descriptor(), params)?;
        let season_length = if self.descriptor().declares("season_length") {
            Some(params.get_usize_within(self.descriptor(), "season_length")?)
        } else {
            None
        };

        debug!(
            "{}: forecasting {} steps from {} observations",
            self.name(),
            horizon,
            series.len()
        );
        let forecast = self.model.forecast(&series, horizon, season_length)?;
        Ok(AnalysisOutput::Forecast(forecast))
    }
}
