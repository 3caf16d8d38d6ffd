//! Request dispatch
//!
//! Resolves a (task, algorithm) pair against the catalogue, checks that the
//! request carries every expected parameter and that the target column
//! exists, then runs the algorithm. Every failure comes back as an
//! [`AnalysisError`]; a panicking algorithm is caught at this boundary.

use crate::algorithm::{guard_compute, Algorithm};
use crate::dataset::Dataset;
use crate::error::{AnalysisError, Result};
use crate::output::AnalysisOutput;
use crate::params::Params;
use crate::task::{ShapeContext, Task, TaskRegistry, TaskSummary};
use log::{debug, warn};
use serde_json::Value;
use std::sync::Arc;

/// Request keys that address the request itself and never reach `compute`
pub const TRANSPORT_KEYS: &[&str] = &["feature"];

/// One analysis request
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchRequest {
    pub task: String,
    pub algorithm: String,
    pub column: String,
    pub params: Params,
}

impl DispatchRequest {
    pub fn new(
        task: impl Into<String>,
        algorithm: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        Self {
            task: task.into(),
            algorithm: algorithm.into(),
            column: column.into(),
            params: Params::new(),
        }
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key, value);
        self
    }
}

/// Stateless front door to a task catalogue
#[derive(Debug, Clone)]
pub struct Dispatcher {
    tasks: Arc<TaskRegistry>,
}

impl Dispatcher {
    pub fn new(tasks: Arc<TaskRegistry>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &TaskRegistry {
        &self.tasks
    }

    /// Find the task and the algorithm registered under it
    pub fn resolve(&self, task: &str, algorithm: &str) -> Result<(&Task, &Arc<dyn Algorithm>)> {
        let task = self.tasks.lookup(task)?;
        let algorithm = task.algorithm(algorithm)?;
        Ok((task, algorithm))
    }

    /// Names a request for this algorithm must carry, in echo order
    pub fn expected_parameters(&self, task: &str, algorithm: &str) -> Result<Vec<String>> {
        let (_, algorithm) = self.resolve(task, algorithm)?;
        Ok(algorithm.descriptor().expected_parameters())
    }

    /// Run one request against `dataset`
    pub fn dispatch(&self, dataset: &Dataset, request: &DispatchRequest) -> Result<AnalysisOutput> {
        let (_, output) = self.run(dataset, request)?;
        Ok(output)
    }

    /// Run one request and shape its output with the task's shaper
    pub fn dispatch_shaped(&self, dataset: &Dataset, request: &DispatchRequest) -> Result<Value> {
        let (task, output) = self.run(dataset, request)?;
        let context = ShapeContext {
            task: &request.task,
            algorithm: &request.algorithm,
            dataset,
            column: &request.column,
        };
        task.shape(&context, &output)
    }

    /// Every task with its algorithms, in registration order
    pub fn catalogue(&self) -> Vec<TaskSummary> {
        self.tasks.iter().map(Task::summary).collect()
    }

    fn run(&self, dataset: &Dataset, request: &DispatchRequest) -> Result<(&Task, AnalysisOutput)> {
        let result = self.run_unlogged(dataset, request);
        if let Err(err) = &result {
            warn!(
                "{}/{} on \"{}\" failed: {}",
                request.task, request.algorithm, request.column, err
            );
        }
        result
    }

    fn run_unlogged(
        &self,
        dataset: &Dataset,
        request: &DispatchRequest,
    ) -> Result<(&Task, AnalysisOutput)> {
        let (task, algorithm) = self.resolve(&request.task, &request.algorithm)?;

        let missing: Vec<String> = algorithm
            .descriptor()
            .expected_parameters()
            .into_iter()
            .filter(|name| !request.params.contains(name))
            .collect();
        if !missing.is_empty() {
            return Err(AnalysisError::MissingParameters { names: missing });
        }

        if !dataset.has_column(&request.column) {
            return Err(AnalysisError::UnknownColumn(request.column.clone()));
        }

        let params = request.params.without(TRANSPORT_KEYS);
        debug!(
            "running {}/{} on \"{}\" ({} rows, {} parameters)",
            task.name(),
            algorithm.name(),
            request.column,
            dataset.len(),
            params.len()
        );

        let output = guard_compute(|| algorithm.compute(dataset, &request.column, &params))?;
        Ok((task, output))
    }
}
