//! Runtime configuration
//!
//! Values come from [`Config::default`], optionally overridden by a JSON
//! file, then by `TSEA_*` environment variables.

use crate::error::{Result, TseaError};
use forecasting::ComparisonSettings;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tsea_core::CatalogueError;

pub const ENV_LOG_LEVEL: &str = "TSEA_LOG_LEVEL";
pub const ENV_COMPARISON_PARALLEL: &str = "TSEA_COMPARISON_PARALLEL";
pub const ENV_COMPARISON_THREADS: &str = "TSEA_COMPARISON_THREADS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default log filter, `RUST_LOG` takes precedence
    pub log_level: String,
    pub comparison: ComparisonConfig,
}

/// How the forecast comparison runs its candidates
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    pub parallel: bool,
    /// Size of a dedicated worker pool, the global pool when absent
    pub threads: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            comparison: ComparisonConfig::default(),
        }
    }
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
        }
    }
}

impl Config {
    /// Read a JSON configuration file, missing fields keep their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Defaults or `path`, then the process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };
        config.with_env(|key| std::env::var(key).ok())
    }

    /// Apply `TSEA_*` overrides looked up through `lookup`
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        if let Some(raw) = lookup(ENV_COMPARISON_PARALLEL) {
            self.comparison.parallel = parse_flag(ENV_COMPARISON_PARALLEL, &raw)?;
        }
        if let Some(raw) = lookup(ENV_COMPARISON_THREADS) {
            let threads = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| invalid(ENV_COMPARISON_THREADS, &raw))?;
            self.comparison.threads = Some(threads);
        }
        Ok(self)
    }

    /// Comparison settings described by this configuration
    pub fn comparison_settings(&self) -> std::result::Result<ComparisonSettings, CatalogueError> {
        match (self.comparison.parallel, self.comparison.threads) {
            (false, _) => Ok(ComparisonSettings::sequential()),
            (true, Some(threads)) => ComparisonSettings::with_threads(threads),
            (true, None) => Ok(ComparisonSettings::parallel()),
        }
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, raw)),
    }
}

fn invalid(key: &str, value: &str) -> TseaError {
    TseaError::Config {
        key: key.to_string(),
        value: value.to_string(),
    }
}
