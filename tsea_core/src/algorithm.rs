//! The capability every analysis algorithm implements

use crate::dataset::Dataset;
use crate::descriptor::AlgorithmDescriptor;
use crate::error::{AnalysisError, Result, Scope};
use crate::output::AnalysisOutput;
use crate::params::Params;
use crate::registry::{Named, Registry};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// An analysis that can run against one column of a dataset
///
/// Implementations are stateless with respect to requests and may be
/// called from several threads at once.
pub trait Algorithm: Send + Sync {
    fn descriptor(&self) -> &AlgorithmDescriptor;

    /// Run the analysis
    ///
    /// `params` carries every expected parameter, already checked for
    /// presence but not parsed.
    fn compute(&self, dataset: &Dataset, column: &str, params: &Params) -> Result<AnalysisOutput>;

    fn name(&self) -> &str {
        self.descriptor().name()
    }
}

impl Named for Arc<dyn Algorithm> {
    const SCOPE: Scope = Scope::Algorithm;

    fn name(&self) -> &str {
        self.descriptor().name()
    }
}

/// Algorithms of one task, keyed by name
pub type AlgorithmRegistry = Registry<Arc<dyn Algorithm>>;

/// Run `f` and turn a panic into [`AnalysisError::AlgorithmExecutionFailed`]
pub fn guard_compute<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(AnalysisError::AlgorithmExecutionFailed(format!(
            "algorithm panicked: {}",
            panic_message(payload.as_ref())
        ))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
