//! # tsea_core
//!
//! Catalogue and dispatch layer for time-series analysis backends.
//!
//! Analyses are grouped into tasks (forecasting, smoothing, ...). Each task
//! owns a registry of algorithms, and every algorithm publishes an
//! [`AlgorithmDescriptor`] listing the parameters it accepts. A
//! [`Dispatcher`] resolves incoming requests against the catalogue,
//! validates them, and runs the selected algorithm.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use tsea_core::{Dispatcher, TaskRegistry, Task};
//!
//! let mut tasks = TaskRegistry::new();
//! tasks.register(Task::new("smoothing", "Smoothing", "Noise reduction").unwrap()).unwrap();
//!
//! let dispatcher = Dispatcher::new(Arc::new(tasks));
//! assert_eq!(dispatcher.catalogue().len(), 1);
//! ```

pub mod algorithm;
pub mod dataset;
pub mod descriptor;
pub mod dispatcher;
pub mod error;
pub mod output;
pub mod parameters;
pub mod params;
pub mod registry;
pub mod task;

pub use algorithm::{guard_compute, Algorithm, AlgorithmRegistry};
pub use dataset::{Dataset, TimeSeries};
pub use descriptor::{AlgorithmDescriptor, DescriptorBuilder};
pub use dispatcher::{DispatchRequest, Dispatcher, TRANSPORT_KEYS};
pub use error::{AnalysisError, CatalogueError, ErrorClass, Result, Scope};
pub use output::{
    AnalysisOutput, ChangePoints, ComparisonReport, Decomposition, Forecast, Interval,
    ModelForecast, ModelMetrics, PatternMatch, SimilarPatterns,
};
pub use parameters::{ParameterKind, ParameterSpec};
pub use params::Params;
pub use registry::{Named, Registry};
pub use task::{
    AlgorithmSummary, HistoryShaper, JsonShaper, ResultShaper, ShapeContext, Task, TaskRegistry,
    TaskSummary,
};
