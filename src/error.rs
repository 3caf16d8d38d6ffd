//! Error types for the tsea front end

use thiserror::Error;
use tsea_core::{AnalysisError, CatalogueError};

/// Failures of configuration loading, data loading and catalogue assembly
#[derive(Debug, Error)]
pub enum TseaError {
    /// A configuration value could not be interpreted
    #[error("Invalid configuration value for {key}: \"{value}\"")]
    Config { key: String, value: String },

    /// Error related to reading a data file
    #[error("Data error: {0}")]
    DataError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Catalogue(#[from] CatalogueError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Result type with the front end error
pub type Result<T> = std::result::Result<T, TseaError>;
