//! # Analysis tasks
//!
//! The non-forecasting task categories of the catalogue:
//!
//! - `smoothing`: trailing moving average
//! - `change-in-mean`: PELT and sliding window detectors with an L2 cost
//! - `decomposition`: classical additive or multiplicative decomposition
//! - `pattern-recognition`: similarity search for a selected window
//!
//! ## Example
//!
//! ```
//! use analysis_tasks::change_in_mean::{pelt::pelt, Segmentation};
//!
//! let mut values = vec![0.0; 40];
//! values.extend(vec![5.0; 40]);
//!
//! let segmentation = Segmentation { penalty: 1.0, min_size: 10, jump: 5 };
//! assert_eq!(pelt(&values, segmentation).unwrap(), vec![40]);
//! ```

pub mod change_in_mean;
pub mod decomposition;
pub mod pattern_recognition;
pub mod smoothing;

pub use change_in_mean::{PeltL2, SlidingWindowL2};
pub use decomposition::ClassicalDecomposition;
pub use pattern_recognition::Mass;
pub use smoothing::MovingAverage;

use log::info;
use tsea_core::{CatalogueError, Task};

/// Every task of this crate, in catalogue order
pub fn tasks() -> Result<Vec<Task>, CatalogueError> {
    let tasks = vec![
        smoothing::task()?,
        change_in_mean::task()?,
        decomposition::task()?,
        pattern_recognition::task()?,
    ];
    info!("built {} analysis tasks", tasks.len());
    Ok(tasks)
}
