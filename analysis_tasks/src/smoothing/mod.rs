//! Smoothing: reduce noise while keeping the shape of a series

pub mod moving_average;

pub use moving_average::MovingAverage;

use tsea_core::{CatalogueError, Task};

pub const TASK_NAME: &str = "smoothing";

pub fn task() -> Result<Task, CatalogueError> {
    let mut task = Task::new(
        TASK_NAME,
        "Smoothing reduces the noise of a time series.",
        "Smoothing replaces every observation with a local average so that the \
         underlying level of the series becomes visible.",
    )?;
    task.register(MovingAverage::new()?)?;
    Ok(task)
}
