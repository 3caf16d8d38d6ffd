//! # Forecasting
//!
//! Baseline forecasting models and the `forecasting` task of the catalogue.
//!
//! ## Features
//!
//! - Naive, seasonal naive, historic average, drift and simple exponential
//!   smoothing forecasts, each with 95% prediction intervals
//! - Side-by-side comparison of several models on a hold-out window
//!
//! ## Example
//!
//! ```
//! use chrono::{Duration, TimeZone, Utc};
//! use forecasting::{ComparisonRequest, ComparisonSettings, ForecastComparison};
//! use tsea_core::TimeSeries;
//!
//! let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let values = (0..60).map(f64::from).collect();
//! let series = TimeSeries::from_values(start, Duration::days(1), values).unwrap();
//!
//! let comparison = ForecastComparison::new(ComparisonSettings::sequential()).unwrap();
//! let request = ComparisonRequest::new(6, 3).select("Naive").select("HistoricAverage");
//! let report = comparison.compare(&series, &request).unwrap();
//!
//! assert_eq!(report.metrics_for("Naive").unwrap().mae, 3.5);
//! ```

pub mod backend;
pub mod comparison;
pub mod models;

pub use backend::ForecastBackend;
pub use comparison::{
    default_candidates, ComparisonCandidate, ComparisonRequest, ComparisonSettings,
    ForecastComparison,
};
pub use models::{
    Drift, ForecastModel, HistoricAverage, Naive, SeasonalNaive, SimpleExponentialSmoothing,
    TrainedForecastModel,
};

use tsea_core::{CatalogueError, HistoryShaper, Task};

/// Name of the forecasting task
pub const TASK_NAME: &str = "forecasting";

/// Build the `forecasting` task with every baseline and the comparison
pub fn task(settings: ComparisonSettings) -> Result<Task, CatalogueError> {
    let mut task = Task::new(
        TASK_NAME,
        "Predict future values of a series.",
        "Forecasting methods estimate the next values of a time series from its \
         history. Results include the analysed history next to the forecast.",
    )?
    .with_shaper(HistoryShaper);

    task.register(ForecastBackend::new(Naive::new()?))?;
    task.register(ForecastBackend::new(SeasonalNaive::new()?))?;
    task.register(ForecastBackend::new(HistoricAverage::new()?))?;
    task.register(ForecastBackend::new(Drift::new()?))?;
    task.register(ForecastBackend::new(SimpleExponentialSmoothing::new()?))?;
    task.register(ForecastComparison::new(settings)?)?;

    Ok(task)
}
