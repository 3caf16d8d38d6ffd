//! Forecasting models
//!
//! Every model follows the same two-step shape: fitting on a series yields a
//! trained model, and the trained model produces point forecasts together
//! with the in-sample one-step residuals used for prediction intervals.

use series_math::stats;
use tsea_core::{
    AlgorithmDescriptor, CatalogueError, Forecast, Interval, ParameterSpec, Result, TimeSeries,
};

pub mod drift;
pub mod exponential_smoothing;
pub mod historic_average;
pub mod naive;
pub mod seasonal_naive;

pub use drift::Drift;
pub use exponential_smoothing::SimpleExponentialSmoothing;
pub use historic_average::HistoricAverage;
pub use naive::Naive;
pub use seasonal_naive::SeasonalNaive;

/// Coverage of the prediction intervals attached to every forecast
pub const CONFIDENCE_LEVEL: f64 = 0.95;

/// A model that forecasts a series over a horizon
pub trait ForecastModel: Send + Sync {
    fn descriptor(&self) -> &AlgorithmDescriptor;

    /// Forecast the `horizon` steps following the last observation
    ///
    /// `season_length` is only passed to models whose descriptor declares a
    /// `season_length` parameter.
    fn forecast(
        &self,
        series: &TimeSeries,
        horizon: usize,
        season_length: Option<usize>,
    ) -> Result<Forecast>;
}

/// Fitted state of a model
pub trait TrainedForecastModel {
    /// Point forecasts for steps `1..=horizon`
    fn predict(&self, horizon: usize) -> Vec<f64>;

    /// In-sample one-step residuals, actual minus fitted
    fn residuals(&self) -> &[f64];

    /// Growth of the forecast standard error at `step` (1-based) relative
    /// to the one-step error
    fn spread(&self, step: usize) -> f64;
}

/// Turn a trained model into a timestamped forecast with intervals
pub(crate) fn assemble(
    series: &TimeSeries,
    trained: &impl TrainedForecastModel,
    horizon: usize,
) -> Result<Forecast> {
    let timestamps = series.future_timestamps(horizon)?;
    let values = trained.predict(horizon);

    let sigma = stats::root_mean_square(trained.residuals());
    let z = stats::normal_quantile(0.5 + CONFIDENCE_LEVEL / 2.0)?;
    let intervals = values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let half_width = z * sigma * trained.spread(i + 1);
            Interval {
                lower: value - half_width,
                upper: value + half_width,
            }
        })
        .collect();

    Forecast::new(timestamps, values)?.with_intervals(intervals)
}

pub(crate) fn horizon_parameter() -> std::result::Result<ParameterSpec, CatalogueError> {
    Ok(ParameterSpec::number("horizon", 1.0, 365.0, 1.0, 30.0)?
        .with_label("Forecast Horizon")
        .with_description("Number of steps to forecast"))
}

pub(crate) fn season_length_parameter() -> std::result::Result<ParameterSpec, CatalogueError> {
    Ok(ParameterSpec::number("season_length", 1.0, 365.0, 1.0, 12.0)?
        .with_label("Season Length")
        .with_description("Number of observations in one seasonal cycle"))
}

/// Descriptor shared by the baselines: a horizon, plus a season length
/// when `seasonal` is set
pub(crate) fn baseline_descriptor(
    name: &str,
    short_description: &str,
    long_description: &str,
    seasonal: bool,
) -> std::result::Result<AlgorithmDescriptor, CatalogueError> {
    let mut builder = AlgorithmDescriptor::builder(name)
        .short_description(short_description)
        .long_description(long_description)
        .parameter(horizon_parameter()?);
    if seasonal {
        builder = builder.parameter(season_length_parameter()?);
    }
    builder.build()
}
