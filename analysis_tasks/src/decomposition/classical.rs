//! Classical seasonal decomposition by moving averages

use log::debug;
use series_math::regression::linear_fit;
use series_math::rolling::centered_moving_average;
use std::fmt;
use std::str::FromStr;
use tsea_core::{
    Algorithm, AlgorithmDescriptor, AnalysisError, AnalysisOutput, CatalogueError, Dataset,
    Decomposition, ParameterSpec, Params, Result, TimeSeries,
};

/// Fewest observations a decomposition is attempted on
pub const MIN_OBSERVATIONS: usize = 8;

/// How trend and seasonality combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecompositionModel {
    /// observed = trend + seasonal + residual
    #[default]
    Additive,
    /// observed = trend * seasonal * residual
    Multiplicative,
}

impl FromStr for DecompositionModel {
    type Err = AnalysisError;

    /// Case-insensitive, an empty value means additive
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "additive" => Ok(DecompositionModel::Additive),
            "multiplicative" => Ok(DecompositionModel::Multiplicative),
            _ => Err(AnalysisError::execution(
                "model must be 'additive' or 'multiplicative'.",
            )),
        }
    }
}

impl fmt::Display for DecompositionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecompositionModel::Additive => write!(f, "additive"),
            DecompositionModel::Multiplicative => write!(f, "multiplicative"),
        }
    }
}

impl DecompositionModel {
    fn remove(self, value: f64, component: f64) -> f64 {
        match self {
            DecompositionModel::Additive => value - component,
            DecompositionModel::Multiplicative => value / component,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClassicalDecomposition {
    descriptor: AlgorithmDescriptor,
}

impl ClassicalDecomposition {
    pub fn new() -> std::result::Result<Self, CatalogueError> {
        let descriptor = AlgorithmDescriptor::builder("classical-decomposition")
            .short_description("Classical additive/multiplicative decomposition.")
            .long_description(
                "The trend is a centred moving average over one seasonal period, \
                 linearly extended to the ends of the series. The seasonal pattern \
                 is the average detrended value at each position of the period.",
            )
            .parameter(
                ParameterSpec::number("period", 2.0, 5000.0, 1.0, 24.0)?
                    .with_label("Seasonal period")
                    .with_description("Number of samples per seasonal cycle"),
            )
            .parameter(
                ParameterSpec::choice("model", ["additive", "multiplicative"])?
                    .with_label("Model")
                    .with_description("Decomposition model type"),
            )
            .build()?;

        Ok(Self { descriptor })
    }
}

/// Components of a decomposition, aligned with the input
#[derive(Debug, Clone, PartialEq)]
pub struct Components {
    pub trend: Vec<f64>,
    pub seasonal: Vec<f64>,
    pub residual: Vec<f64>,
}

/// Decompose `values` with seasonal `period`
pub fn decompose(values: &[f64], period: usize, model: DecompositionModel) -> Result<Components> {
    let n = values.len();
    if n < MIN_OBSERVATIONS {
        return Err(AnalysisError::execution(format!(
            "Need at least {} non-null samples for decomposition.",
            MIN_OBSERVATIONS
        )));
    }
    if period < 2 {
        return Err(AnalysisError::execution("period must be at least 2."));
    }
    if period >= n / 2 + n % 2 {
        return Err(AnalysisError::execution(format!(
            "period must satisfy 2*period < data length ({}).",
            n
        )));
    }
    if model == DecompositionModel::Multiplicative && values.iter().any(|&v| v <= 0.0) {
        return Err(AnalysisError::execution(
            "Multiplicative model requires strictly positive values.",
        ));
    }

    let mut trend = centered_moving_average(values, period)?;
    extrapolate_ends(&mut trend, period)?;

    let detrended: Vec<f64> = values
        .iter()
        .zip(&trend)
        .map(|(&v, &t)| model.remove(v, t))
        .collect();

    let mut profile: Vec<f64> = (0..period)
        .map(|phase| {
            let same_phase: Vec<f64> = detrended.iter().skip(phase).step_by(period).copied().collect();
            same_phase.iter().sum::<f64>() / same_phase.len() as f64
        })
        .collect();
    let profile_mean = profile.iter().sum::<f64>() / period as f64;
    for value in &mut profile {
        *value = model.remove(*value, profile_mean);
    }

    let seasonal: Vec<f64> = (0..n).map(|i| profile[i % period]).collect();
    let residual = detrended
        .iter()
        .zip(&seasonal)
        .map(|(&d, &s)| model.remove(d, s))
        .collect();

    Ok(Components {
        trend,
        seasonal,
        residual,
    })
}

/// Replace the NaN ends of a centred trend with straight lines fitted to
/// the `period` nearest defined values
fn extrapolate_ends(trend: &mut [f64], period: usize) -> Result<()> {
    let defined: Vec<usize> = (0..trend.len()).filter(|&i| !trend[i].is_nan()).collect();
    let (Some(&first), Some(&last)) = (defined.first(), defined.last()) else {
        return Err(AnalysisError::execution("trend has no defined values"));
    };
    let points = period.min(defined.len());

    let head = &defined[..points];
    let fit = fit_at(trend, head)?;
    for (i, slot) in trend.iter_mut().enumerate().take(first) {
        *slot = fit.at(i as f64);
    }

    let tail = &defined[defined.len() - points..];
    let fit = fit_at(trend, tail)?;
    for (i, slot) in trend.iter_mut().enumerate().skip(last + 1) {
        *slot = fit.at(i as f64);
    }

    Ok(())
}

fn fit_at(trend: &[f64], positions: &[usize]) -> Result<series_math::regression::LineFit> {
    let x: Vec<f64> = positions.iter().map(|&i| i as f64).collect();
    let y: Vec<f64> = positions.iter().map(|&i| trend[i]).collect();
    Ok(linear_fit(&x, &y)?)
}

impl Algorithm for ClassicalDecomposition {
    fn descriptor(&self) -> &AlgorithmDescriptor {
        &self.descriptor
    }

    fn compute(&self, dataset: &Dataset, column: &str, params: &Params) -> Result<AnalysisOutput> {
        let period = params.get_usize_within(&self.descriptor, "period")?;
        let model: DecompositionModel = params.get_str("model")?.parse()?;
        let series: TimeSeries = dataset.series(column)?;

        debug!(
            "{} decomposition of {} values with period {}",
            model,
            series.len(),
            period
        );
        let components = decompose(series.values(), period, model)?;

        Ok(AnalysisOutput::Decomposition(Decomposition {
            timestamps: series.timestamps().to_vec(),
            observed: series.values().to_vec(),
            trend: components.trend,
            seasonal: components.seasonal,
            residual: components.residual,
        }))
    }
}
