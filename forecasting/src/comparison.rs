//! Side-by-side evaluation of forecasting models
//!
//! The cleaned series is split once into a training prefix and a
//! validation suffix of `horizon` observations. Each selected candidate is
//! scored on the validation window and then refitted on the whole series
//! to produce the forecast that is reported. Candidates are independent and
//! run on a rayon pool unless the comparison is configured as sequential.

use crate::models::{
    season_length_parameter, Drift, ForecastModel, HistoricAverage, Naive, SeasonalNaive,
    SimpleExponentialSmoothing,
};
use log::{debug, info};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use series_math::point_metrics;
use std::sync::Arc;
use tsea_core::{
    guard_compute, Algorithm, AlgorithmDescriptor, AnalysisError, AnalysisOutput, CatalogueError,
    ComparisonReport, Dataset, ModelForecast, ModelMetrics, ParameterSpec, Params, Result,
    TimeSeries,
};

/// Observations required beyond the horizon
pub const MIN_EXTRA_OBSERVATIONS: usize = 5;

/// A model offered for comparison under a display label
#[derive(Clone)]
pub struct ComparisonCandidate {
    label: String,
    flag: String,
    model: Arc<dyn ForecastModel>,
}

impl ComparisonCandidate {
    /// The selection flag is `use_` followed by the model name
    pub fn new(label: impl Into<String>, model: Arc<dyn ForecastModel>) -> Self {
        let flag = format!("use_{}", model.descriptor().name().replace('-', "_"));
        Self {
            label: label.into(),
            flag,
            model,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn flag(&self) -> &str {
        &self.flag
    }

    pub fn model(&self) -> &Arc<dyn ForecastModel> {
        &self.model
    }

    fn season_length(&self, requested: usize) -> Option<usize> {
        self.model
            .descriptor()
            .declares("season_length")
            .then_some(requested)
    }
}

impl std::fmt::Debug for ComparisonCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComparisonCandidate")
            .field("label", &self.label)
            .field("flag", &self.flag)
            .field("model", &self.model.descriptor().name())
            .finish()
    }
}

/// The baselines offered by the `forecast-comparison` algorithm, in
/// selection order
pub fn default_candidates() -> std::result::Result<Vec<ComparisonCandidate>, CatalogueError> {
    Ok(vec![
        ComparisonCandidate::new("Naive", Arc::new(Naive::new()?)),
        ComparisonCandidate::new("SeasonalNaive", Arc::new(SeasonalNaive::new()?)),
        ComparisonCandidate::new("HistoricAverage", Arc::new(HistoricAverage::new()?)),
        ComparisonCandidate::new("Drift", Arc::new(Drift::new()?)),
        ComparisonCandidate::new("SES", Arc::new(SimpleExponentialSmoothing::new()?)),
    ])
}

/// How candidates are scheduled
#[derive(Debug, Clone)]
pub struct ComparisonSettings {
    parallel: bool,
    pool: Option<Arc<ThreadPool>>,
}

impl Default for ComparisonSettings {
    fn default() -> Self {
        Self::parallel()
    }
}

impl ComparisonSettings {
    /// Run candidates on the global rayon pool
    pub fn parallel() -> Self {
        Self {
            parallel: true,
            pool: None,
        }
    }

    /// Run candidates one after another on the calling thread
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            pool: None,
        }
    }

    /// Run candidates on a dedicated pool of `threads` workers
    pub fn with_threads(threads: usize) -> std::result::Result<Self, CatalogueError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("forecast-comparison-{}", i))
            .build()
            .map_err(|e| CatalogueError::WorkerPool(e.to_string()))?;

        Ok(Self {
            parallel: true,
            pool: Some(Arc::new(pool)),
        })
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }
}

/// Parameters of one comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRequest {
    pub horizon: usize,
    pub season_length: usize,
    /// Labels of the selected candidates
    pub selected: Vec<String>,
}

impl ComparisonRequest {
    pub fn new(horizon: usize, season_length: usize) -> Self {
        Self {
            horizon,
            season_length,
            selected: Vec::new(),
        }
    }

    pub fn select(mut self, label: impl Into<String>) -> Self {
        self.selected.push(label.into());
        self
    }
}

/// The `forecast-comparison` algorithm
#[derive(Debug, Clone)]
pub struct ForecastComparison {
    descriptor: AlgorithmDescriptor,
    candidates: Vec<ComparisonCandidate>,
    settings: ComparisonSettings,
}

impl ForecastComparison {
    pub fn new(settings: ComparisonSettings) -> std::result::Result<Self, CatalogueError> {
        Self::with_candidates(default_candidates()?, settings)
    }

    pub fn with_candidates(
        candidates: Vec<ComparisonCandidate>,
        settings: ComparisonSettings,
    ) -> std::result::Result<Self, CatalogueError> {
        let mut builder = AlgorithmDescriptor::builder("forecast-comparison")
            .short_description(
                "Compare multiple forecasting methods side-by-side with error metrics.",
            )
            .long_description(
                "Each selected method forecasts the last `horizon` observations from \
                 the history before them and is scored with MAE, RMSE and MAPE. \
                 The methods are then refitted on the full series.",
            )
            .parameter(
                ParameterSpec::number("horizon", 1.0, 365.0, 1.0, 30.0)?
                    .with_label("Forecast Horizon")
                    .with_description("Number of steps to forecast and evaluate"),
            )
            .parameter(
                season_length_parameter()?
                    .with_description("Season length used by seasonal models"),
            );
        for candidate in &candidates {
            builder = builder.parameter(
                ParameterSpec::boolean(candidate.flag(), true)?.with_label(candidate.label()),
            );
        }

        Ok(Self {
            descriptor: builder.build()?,
            candidates,
            settings,
        })
    }

    pub fn candidates(&self) -> &[ComparisonCandidate] {
        &self.candidates
    }

    /// Read horizon, season length and selection flags from request parameters
    ///
    /// An absent flag means the candidate is not selected. Horizon and
    /// season length must lie within their declared bounds.
    pub fn request_from_params(&self, params: &Params) -> Result<ComparisonRequest> {
        let mut request = ComparisonRequest::new(
            params.get_usize_within(&self.descriptor, "horizon")?,
            params.get_usize_within(&self.descriptor, "season_length")?,
        );
        for candidate in &self.candidates {
            if params.get_bool_or(candidate.flag(), false)? {
                request = request.select(candidate.label());
            }
        }
        Ok(request)
    }

    /// Compare the selected candidates on `series`
    pub fn compare(
        &self,
        series: &TimeSeries,
        request: &ComparisonRequest,
    ) -> Result<ComparisonReport> {
        if request.horizon == 0 || request.season_length == 0 {
            return Err(AnalysisError::InvalidComparisonRequest(format!(
                "horizon and season length must be at least 1, got {} and {}",
                request.horizon, request.season_length
            )));
        }

        let selected = self.select(&request.selected)?;
        let series = series.drop_missing();
        let needed = request.horizon.saturating_add(MIN_EXTRA_OBSERVATIONS);
        if series.len() <= needed {
            return Err(AnalysisError::InsufficientData(format!(
                "need more than horizon + {} = {} observations for comparison, have {}",
                MIN_EXTRA_OBSERVATIONS,
                needed,
                series.len()
            )));
        }

        let (train, validation) = series.holdout(request.horizon)?;
        debug!(
            "comparing {} candidates: {} training and {} validation observations",
            selected.len(),
            train.len(),
            validation.len()
        );

        let run = |candidate: &ComparisonCandidate| {
            evaluate(candidate, &train, &validation, &series, request)
        };
        let outcomes: Vec<(ModelForecast, ModelMetrics)> = if !self.settings.parallel {
            selected.iter().map(|c| run(*c)).collect::<Result<_>>()?
        } else if let Some(pool) = &self.settings.pool {
            pool.install(|| selected.par_iter().map(|c| run(*c)).collect::<Result<_>>())?
        } else {
            selected.par_iter().map(|c| run(*c)).collect::<Result<_>>()?
        };

        let (forecasts, metrics) = outcomes.into_iter().unzip();
        Ok(ComparisonReport {
            horizon: request.horizon,
            history: series,
            forecasts,
            metrics,
        })
    }

    /// Candidates named in `labels`, in selection order
    fn select(&self, labels: &[String]) -> Result<Vec<&ComparisonCandidate>> {
        if let Some(unknown) = labels
            .iter()
            .find(|label| !self.candidates.iter().any(|c| c.label() == label.as_str()))
        {
            return Err(AnalysisError::InvalidComparisonRequest(format!(
                "unknown forecasting method \"{}\"",
                unknown
            )));
        }

        let selected: Vec<&ComparisonCandidate> = self
            .candidates
            .iter()
            .filter(|c| labels.iter().any(|label| label == c.label()))
            .collect();
        if selected.len() < 2 {
            return Err(AnalysisError::InvalidComparisonRequest(
                "Select at least 2 forecasting methods for comparison.".to_string(),
            ));
        }
        Ok(selected)
    }
}

/// Score one candidate on the validation window, then forecast forward
fn evaluate(
    candidate: &ComparisonCandidate,
    train: &TimeSeries,
    validation: &TimeSeries,
    full: &TimeSeries,
    request: &ComparisonRequest,
) -> Result<(ModelForecast, ModelMetrics)> {
    let season_length = candidate.season_length(request.season_length);

    guard_compute(|| {
        let predicted = candidate
            .model
            .forecast(train, request.horizon, season_length)?;
        let n = predicted.values().len().min(validation.len());
        let metrics = point_metrics(&validation.values()[..n], &predicted.values()[..n])?;

        let future = candidate
            .model
            .forecast(full, request.horizon, season_length)?;

        Ok((
            ModelForecast {
                name: candidate.label.clone(),
                timestamps: future.timestamps().to_vec(),
                values: future.values().to_vec(),
            },
            ModelMetrics::new(candidate.label.clone(), metrics),
        ))
    })
    .map_err(|cause| AnalysisError::ComparisonCandidateFailed {
        candidate: candidate.label.clone(),
        cause: Box::new(cause),
    })
}

impl Algorithm for ForecastComparison {
    fn descriptor(&self) -> &AlgorithmDescriptor {
        &self.descriptor
    }

    fn compute(&self, dataset: &Dataset, column: &str, params: &Params) -> Result<AnalysisOutput> {
        let series = dataset.series(column)?;
        let request = self.request_from_params(params)?;

        let report = self.compare(&series, &request)?;
        info!(
            "compared {} forecasting methods on \"{}\" over {} steps",
            report.metrics.len(),
            column,
            report.horizon
        );
        Ok(AnalysisOutput::Comparison(report))
    }
}
