//! # tsea
//!
//! Time-series analysis catalogue: forecasting, smoothing, change in mean,
//! decomposition and pattern recognition behind one dispatch layer.
//!
//! ## Example
//!
//! ```
//! use tsea::{build_catalogue, Config};
//!
//! let tasks = build_catalogue(&Config::default()).unwrap();
//! assert!(tasks.contains("forecasting"));
//! assert!(tasks.contains("change-in-mean"));
//! ```

pub mod config;
pub mod data;
pub mod error;

pub use config::Config;
pub use data::{load_csv, read_csv};
pub use error::{Result, TseaError};

use log::info;
use std::sync::Arc;
use tsea_core::{CatalogueError, Dispatcher, TaskRegistry};

/// Assemble every task of the catalogue
///
/// Any misconfiguration (duplicate names, bad parameter definitions, a
/// worker pool that cannot start) aborts the whole build.
pub fn build_catalogue(config: &Config) -> std::result::Result<TaskRegistry, CatalogueError> {
    let mut tasks = TaskRegistry::new();
    tasks.register(forecasting::task(config.comparison_settings()?)?)?;
    for task in analysis_tasks::tasks()? {
        tasks.register(task)?;
    }

    info!(
        "catalogue ready: {} tasks, {} algorithms",
        tasks.len(),
        tasks.iter().map(|t| t.algorithms().len()).sum::<usize>()
    );
    Ok(tasks)
}

/// A dispatcher over a freshly built catalogue
pub fn dispatcher(config: &Config) -> std::result::Result<Dispatcher, CatalogueError> {
    Ok(Dispatcher::new(Arc::new(build_catalogue(config)?)))
}

/// Start `env_logger` with the configured level unless `RUST_LOG` is set
///
/// Calling it again is a no-op.
pub fn init_logging(config: &Config) {
    let env = env_logger::Env::default().default_filter_or(config.log_level.as_str());
    let _ = env_logger::Builder::from_env(env).try_init();
}
