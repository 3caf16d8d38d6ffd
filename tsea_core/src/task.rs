//! Tasks: named groups of algorithms solving the same kind of problem

use crate::algorithm::{Algorithm, AlgorithmRegistry};
use crate::dataset::Dataset;
use crate::descriptor::{is_valid_name, AlgorithmDescriptor};
use crate::error::{AnalysisError, CatalogueError, Result, Scope};
use crate::output::AnalysisOutput;
use crate::registry::{Named, Registry};
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;

/// All tasks of a catalogue
pub type TaskRegistry = Registry<Task>;

/// Request details available to a [`ResultShaper`]
#[derive(Debug, Clone, Copy)]
pub struct ShapeContext<'a> {
    pub task: &'a str,
    pub algorithm: &'a str,
    pub dataset: &'a Dataset,
    pub column: &'a str,
}

/// Turns an algorithm's output into the document returned to clients
pub trait ResultShaper: Send + Sync {
    fn shape(&self, context: &ShapeContext<'_>, output: &AnalysisOutput) -> Result<Value>;
}

fn to_json(output: &AnalysisOutput) -> Result<Value> {
    serde_json::to_value(output)
        .map_err(|e| AnalysisError::execution(format!("cannot serialize result: {}", e)))
}

/// `{task, algorithm, feature, result}`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonShaper;

impl ResultShaper for JsonShaper {
    fn shape(&self, context: &ShapeContext<'_>, output: &AnalysisOutput) -> Result<Value> {
        Ok(json!({
            "task": context.task,
            "algorithm": context.algorithm,
            "feature": context.column,
            "result": to_json(output)?,
        }))
    }
}

/// Like [`JsonShaper`] with the analysed column's history attached
#[derive(Debug, Clone, Copy, Default)]
pub struct HistoryShaper;

impl ResultShaper for HistoryShaper {
    fn shape(&self, context: &ShapeContext<'_>, output: &AnalysisOutput) -> Result<Value> {
        let history = context.dataset.series(context.column)?;
        Ok(json!({
            "task": context.task,
            "algorithm": context.algorithm,
            "feature": context.column,
            "history": serde_json::to_value(&history)
                .map_err(|e| AnalysisError::execution(format!("cannot serialize history: {}", e)))?,
            "result": to_json(output)?,
        }))
    }
}

/// A named group of algorithms
pub struct Task {
    name: String,
    short_description: String,
    long_description: String,
    algorithms: AlgorithmRegistry,
    shaper: Arc<dyn ResultShaper>,
}

impl Task {
    pub fn new(
        name: impl Into<String>,
        short_description: impl Into<String>,
        long_description: impl Into<String>,
    ) -> std::result::Result<Self, CatalogueError> {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(CatalogueError::InvalidName {
                scope: Scope::Task,
                name,
            });
        }

        Ok(Self {
            name,
            short_description: short_description.into(),
            long_description: long_description.into(),
            algorithms: AlgorithmRegistry::new(),
            shaper: Arc::new(JsonShaper),
        })
    }

    /// Replace the default [`JsonShaper`]
    pub fn with_shaper(mut self, shaper: impl ResultShaper + 'static) -> Self {
        self.shaper = Arc::new(shaper);
        self
    }

    pub fn register(
        &mut self,
        algorithm: impl Algorithm + 'static,
    ) -> std::result::Result<(), CatalogueError> {
        self.register_shared(Arc::new(algorithm))
    }

    pub fn register_shared(
        &mut self,
        algorithm: Arc<dyn Algorithm>,
    ) -> std::result::Result<(), CatalogueError> {
        self.algorithms.register(algorithm)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_description(&self) -> &str {
        &self.short_description
    }

    pub fn long_description(&self) -> &str {
        &self.long_description
    }

    pub fn algorithms(&self) -> &AlgorithmRegistry {
        &self.algorithms
    }

    pub fn algorithm(&self, name: &str) -> Result<&Arc<dyn Algorithm>> {
        self.algorithms.lookup(name)
    }

    pub fn shape(&self, context: &ShapeContext<'_>, output: &AnalysisOutput) -> Result<Value> {
        self.shaper.shape(context, output)
    }

    /// Listing of this task and its algorithms
    pub fn summary(&self) -> TaskSummary {
        TaskSummary {
            name: self.name.clone(),
            short_description: self.short_description.clone(),
            long_description: self.long_description.clone(),
            algorithms: self
                .algorithms
                .iter()
                .map(|a| AlgorithmSummary {
                    descriptor: a.descriptor().clone(),
                    expected_parameters: a.descriptor().expected_parameters(),
                })
                .collect(),
        }
    }
}

impl Named for Task {
    const SCOPE: Scope = Scope::Task;

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("algorithms", &self.algorithms)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskSummary {
    pub name: String,
    pub short_description: String,
    pub long_description: String,
    pub algorithms: Vec<AlgorithmSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlgorithmSummary {
    #[serde(flatten)]
    pub descriptor: AlgorithmDescriptor,
    pub expected_parameters: Vec<String>,
}
