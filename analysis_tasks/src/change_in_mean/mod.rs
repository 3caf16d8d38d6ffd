//! Change in mean: find abrupt shifts of the level of a series
//!
//! Both detectors segment the series with an L2 (squared deviation) cost.
//! Breakpoints are restricted to multiples of `jump`, segments are at least
//! `min_size` observations long, and a breakpoint is kept only when it
//! lowers the total cost by more than `penalty`.

pub mod pelt;
pub mod sliding_window;

pub use pelt::PeltL2;
pub use sliding_window::SlidingWindowL2;

use tsea_core::{
    AlgorithmDescriptor, AnalysisError, AnalysisOutput, CatalogueError, ChangePoints,
    ParameterSpec, Params, Result, Task, TimeSeries,
};

pub const TASK_NAME: &str = "change-in-mean";

pub fn task() -> std::result::Result<Task, CatalogueError> {
    let mut task = Task::new(
        TASK_NAME,
        "Change in mean is the task of finding abrupt changes in the mean of a time series",
        "Change in mean (changepoint detection) is the task of finding abrupt changes \
         in the mean of a time series",
    )?;
    task.register(PeltL2::new()?)?;
    task.register(SlidingWindowL2::new()?)?;
    Ok(task)
}

/// Segmentation constraints shared by the detectors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segmentation {
    pub penalty: f64,
    pub min_size: usize,
    pub jump: usize,
}

impl Segmentation {
    pub(crate) fn from_params(descriptor: &AlgorithmDescriptor, params: &Params) -> Result<Self> {
        let segmentation = Self {
            penalty: params.get_f64_within(descriptor, "penalty")?,
            min_size: params.get_usize_within(descriptor, "min_size")?,
            jump: params.get_usize_within(descriptor, "jump")?,
        };

        if !(segmentation.penalty >= 0.0) {
            return Err(AnalysisError::execution("penalty must be non-negative"));
        }
        if segmentation.min_size == 0 || segmentation.jump == 0 {
            return Err(AnalysisError::execution(
                "min_size and jump must be at least 1",
            ));
        }
        Ok(segmentation)
    }
}

pub(crate) fn min_size_parameter() -> std::result::Result<ParameterSpec, CatalogueError> {
    Ok(ParameterSpec::number("min_size", 5.0, 1000.0, 1.0, 10.0)?
        .with_description("Minimum segment size (in data points)"))
}

pub(crate) fn jump_parameter() -> std::result::Result<ParameterSpec, CatalogueError> {
    Ok(ParameterSpec::number("jump", 1.0, 1000.0, 1.0, 5.0)?
        .with_description("Subsample (one every jump points)"))
}

/// Map segment starts of `series` to a change point output
pub(crate) fn change_points(series: &TimeSeries, indices: Vec<usize>) -> AnalysisOutput {
    let timestamps = indices
        .iter()
        .map(|&i| series.timestamps()[i])
        .collect();
    AnalysisOutput::ChangePoints(ChangePoints {
        indices,
        timestamps,
    })
}
