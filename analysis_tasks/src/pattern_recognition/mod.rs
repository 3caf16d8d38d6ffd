//! Pattern recognition: find the parts of a series that look like a query window

pub mod mass;

pub use mass::{best_matches, Mass, Metric};

use tsea_core::{CatalogueError, HistoryShaper, Task};

pub const TASK_NAME: &str = "pattern-recognition";

pub fn task() -> Result<Task, CatalogueError> {
    let mut task = Task::new(
        TASK_NAME,
        "Pattern recognition finds subsequences similar to a selected pattern.",
        "Pattern recognition searches a time series for the subsequences closest \
         to a pattern selected between two timestamps. Results include the \
         analysed history so matches can be drawn over it.",
    )?
    .with_shaper(HistoryShaper);
    task.register(Mass::new()?)?;
    Ok(task)
}
