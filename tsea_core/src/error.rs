//! Error types for catalogue assembly and request handling
//!
//! [`CatalogueError`] is raised while the catalogue is built at startup and is
//! meant to abort the process. [`AnalysisError`] covers everything a single
//! request can run into and is always returned to the caller as a value.

use serde::Serialize;
use series_math::MathError;
use std::fmt;
use thiserror::Error;

/// Which namespace a name belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Task,
    Algorithm,
    Parameter,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Task => write!(f, "task"),
            Scope::Algorithm => write!(f, "algorithm"),
            Scope::Parameter => write!(f, "parameter"),
        }
    }
}

/// Misconfigurations detected while assembling the catalogue
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CatalogueError {
    /// A parameter's bounds, default or step are inconsistent
    #[error("Invalid definition for parameter \"{name}\": {reason}")]
    InvalidParameterDefinition { name: String, reason: String },

    /// Two items with the same name were registered in one namespace
    #[error("Duplicate {scope} name \"{name}\"")]
    DuplicateName { scope: Scope, name: String },

    /// A name is empty or not URL-safe
    #[error("Invalid {scope} name \"{name}\": expected ASCII letters, digits, '-' or '_'")]
    InvalidName { scope: Scope, name: String },

    /// A worker pool requested by the configuration could not be started
    #[error("Cannot start worker pool: {0}")]
    WorkerPool(String),
}

/// Failures surfaced to the caller of a single analysis request
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Unknown {scope} \"{name}\"")]
    NotFound { scope: Scope, name: String },

    /// Every expected parameter absent from the request, in expected order
    #[error("Missing query parameter(s): {}", .names.join(", "))]
    MissingParameters { names: Vec<String> },

    #[error("Unknown feature column \"{0}\"")]
    UnknownColumn(String),

    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("Invalid comparison request: {0}")]
    InvalidComparisonRequest(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Forecasting method \"{candidate}\" failed: {cause}")]
    ComparisonCandidateFailed {
        candidate: String,
        #[source]
        cause: Box<AnalysisError>,
    },

    #[error("Algorithm execution failed: {0}")]
    AlgorithmExecutionFailed(String),
}

/// Coarse response class for the transport layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    NotFound,
    BadRequest,
}

impl AnalysisError {
    /// Shorthand for [`AnalysisError::AlgorithmExecutionFailed`]
    pub fn execution(message: impl fmt::Display) -> Self {
        AnalysisError::AlgorithmExecutionFailed(message.to_string())
    }

    /// The response class a transport should map this error to
    pub fn class(&self) -> ErrorClass {
        match self {
            AnalysisError::NotFound { .. } => ErrorClass::NotFound,
            _ => ErrorClass::BadRequest,
        }
    }
}

impl From<MathError> for AnalysisError {
    fn from(err: MathError) -> Self {
        AnalysisError::AlgorithmExecutionFailed(err.to_string())
    }
}

/// Result type for request handling
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_missing_parameters_lists_every_name() {
        let err = AnalysisError::MissingParameters {
            names: vec!["horizon".to_string(), "start".to_string()],
        };
        assert_eq!(err.to_string(), "Missing query parameter(s): horizon, start");
    }

    #[test]
    fn test_candidate_failure_chains_cause() {
        let err = AnalysisError::ComparisonCandidateFailed {
            candidate: "SeasonalNaive".to_string(),
            cause: Box::new(AnalysisError::execution("season too long")),
        };

        assert!(err.to_string().contains("SeasonalNaive"));
        let source = err.source().map(|s| s.to_string());
        assert_eq!(
            source.as_deref(),
            Some("Algorithm execution failed: season too long")
        );
    }

    #[test]
    fn test_error_classes() {
        let not_found = AnalysisError::NotFound {
            scope: Scope::Task,
            name: "outliers".to_string(),
        };
        assert_eq!(not_found.class(), ErrorClass::NotFound);
        assert_eq!(not_found.to_string(), "Unknown task \"outliers\"");
        assert_eq!(
            AnalysisError::UnknownColumn("co".to_string()).class(),
            ErrorClass::BadRequest
        );
    }

    #[test]
    fn test_math_errors_become_execution_failures() {
        let err: AnalysisError = MathError::InvalidInput("window is zero".to_string()).into();
        assert!(matches!(err, AnalysisError::AlgorithmExecutionFailed(_)));
    }
}
