//! Trailing moving average

use log::debug;
use series_math::rolling::rolling_mean;
use tsea_core::{
    Algorithm, AlgorithmDescriptor, AnalysisError, AnalysisOutput, CatalogueError, Dataset,
    ParameterSpec, Params, Result, TimeSeries,
};

/// Simple moving average over a trailing window
///
/// The first positions average over the observations available so far, and
/// missing values are skipped, so every position with at least one
/// observation in its window gets a value.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    descriptor: AlgorithmDescriptor,
}

impl MovingAverage {
    pub fn new() -> std::result::Result<Self, CatalogueError> {
        let descriptor = AlgorithmDescriptor::builder("moving-average")
            .short_description("Simple moving average smoothing.")
            .parameter(
                ParameterSpec::number("window", 1.0, 100.0, 1.0, 5.0)?
                    .with_description("Window size"),
            )
            .build()?;

        Ok(Self { descriptor })
    }
}

impl Algorithm for MovingAverage {
    fn descriptor(&self) -> &AlgorithmDescriptor {
        &self.descriptor
    }

    fn compute(&self, dataset: &Dataset, column: &str, params: &Params) -> Result<AnalysisOutput> {
        let window = params.get_usize_within(&self.descriptor, "window")?;
        if window == 0 {
            return Err(AnalysisError::execution("window must be at least 1"));
        }

        let series = dataset.raw_series(column)?;
        debug!("moving average of {} values, window {}", series.len(), window);
        let smoothed = rolling_mean(series.values(), window)?;

        Ok(AnalysisOutput::Smoothed(TimeSeries::new(
            series.timestamps().to_vec(),
            smoothed,
        )?))
    }
}
