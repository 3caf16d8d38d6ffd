//! Decomposition: split a series into trend, seasonal and residual parts

pub mod classical;

pub use classical::{ClassicalDecomposition, DecompositionModel};

use tsea_core::{CatalogueError, Task};

pub const TASK_NAME: &str = "decomposition";

pub fn task() -> Result<Task, CatalogueError> {
    let mut task = Task::new(
        TASK_NAME,
        "Decomposition separates trend, seasonality and noise.",
        "Decomposition splits a time series into a slowly varying trend, a \
         repeating seasonal pattern and the residual left after removing both.",
    )?;
    task.register(ClassicalDecomposition::new()?)?;
    Ok(task)
}
