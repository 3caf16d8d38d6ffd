//! Tabular time-indexed data handed to algorithms
//!
//! A [`Dataset`] is a strictly increasing timestamp index with any number of
//! named numeric columns. Missing observations are stored as NaN.
//! [`TimeSeries`] is one column paired with its timestamps.

use crate::error::{AnalysisError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use series_math::stats;

fn check_strictly_increasing(index: &[DateTime<Utc>]) -> Result<()> {
    if let Some(pos) = index.windows(2).position(|w| w[0] >= w[1]) {
        return Err(AnalysisError::InvalidDataset(format!(
            "index is not strictly increasing at position {} ({} then {})",
            pos + 1,
            index[pos],
            index[pos + 1]
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
struct Column {
    name: String,
    values: Vec<f64>,
}

/// Time-indexed table of numeric columns
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    index: Vec<DateTime<Utc>>,
    columns: Vec<Column>,
}

impl Dataset {
    /// Create an empty-column dataset over `index`
    pub fn new(index: Vec<DateTime<Utc>>) -> Result<Self> {
        check_strictly_increasing(&index)?;
        Ok(Self {
            index,
            columns: Vec::new(),
        })
    }

    /// Add a column, its length must match the index
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        let name = name.into();
        if values.len() != self.index.len() {
            return Err(AnalysisError::InvalidDataset(format!(
                "column \"{}\" has {} values for an index of {}",
                name,
                values.len(),
                self.index.len()
            )));
        }
        if self.has_column(&name) {
            return Err(AnalysisError::InvalidDataset(format!(
                "duplicate column \"{}\"",
                name
            )));
        }

        self.columns.push(Column { name, values });
        Ok(self)
    }

    pub fn index(&self) -> &[DateTime<Utc>] {
        &self.index
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Column names in insertion order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Raw values of a column, NaN where missing
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
            .ok_or_else(|| AnalysisError::UnknownColumn(name.to_string()))
    }

    /// A column with its timestamps, missing values kept
    pub fn raw_series(&self, name: &str) -> Result<TimeSeries> {
        let values = self.column(name)?;
        Ok(TimeSeries {
            timestamps: self.index.clone(),
            values: values.to_vec(),
        })
    }

    /// A column with its timestamps, missing values dropped
    pub fn series(&self, name: &str) -> Result<TimeSeries> {
        Ok(self.raw_series(name)?.drop_missing())
    }
}

/// A single numeric series over a strictly increasing time index
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<f64>,
}

impl TimeSeries {
    pub fn new(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(AnalysisError::InvalidDataset(format!(
                "{} timestamps for {} values",
                timestamps.len(),
                values.len()
            )));
        }
        check_strictly_increasing(&timestamps)?;

        Ok(Self { timestamps, values })
    }

    /// Regularly spaced series starting at `start`
    pub fn from_values(start: DateTime<Utc>, step: Duration, values: Vec<f64>) -> Result<Self> {
        let timestamps = (0..values.len())
            .map(|i| shifted(start, step, i))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| {
                AnalysisError::InvalidDataset(format!(
                    "{} steps of {} from {} leave the supported date range",
                    values.len(),
                    step,
                    start
                ))
            })?;
        Self::new(timestamps, values)
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamps.last().copied()
    }

    /// Copy without the NaN observations
    pub fn drop_missing(&self) -> Self {
        let (timestamps, values) = self
            .timestamps
            .iter()
            .zip(self.values.iter())
            .filter(|(_, v)| !v.is_nan())
            .map(|(t, v)| (*t, *v))
            .unzip();
        Self { timestamps, values }
    }

    /// Split into a training prefix and the last `horizon` observations
    pub fn holdout(&self, horizon: usize) -> Result<(Self, Self)> {
        if horizon >= self.len() {
            return Err(AnalysisError::InsufficientData(format!(
                "cannot hold out {} of {} observations",
                horizon,
                self.len()
            )));
        }

        let split = self.len() - horizon;
        let train = Self {
            timestamps: self.timestamps[..split].to_vec(),
            values: self.values[..split].to_vec(),
        };
        let validation = Self {
            timestamps: self.timestamps[split..].to_vec(),
            values: self.values[split..].to_vec(),
        };
        Ok((train, validation))
    }

    /// Observations at positions `start..end`
    pub fn slice(&self, start: usize, end: usize) -> Self {
        let end = end.min(self.len());
        let start = start.min(end);
        Self {
            timestamps: self.timestamps[start..end].to_vec(),
            values: self.values[start..end].to_vec(),
        }
    }

    /// Observations with `start <= t <= end`
    pub fn slice_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        let (timestamps, values) = self
            .timestamps
            .iter()
            .zip(self.values.iter())
            .filter(|(t, _)| **t >= start && **t <= end)
            .map(|(t, v)| (*t, *v))
            .unzip();
        Self { timestamps, values }
    }

    /// Typical spacing of the index
    ///
    /// The median gap between consecutive timestamps, one day when there
    /// are fewer than two observations.
    pub fn step(&self) -> Duration {
        if self.timestamps.len() < 2 {
            return Duration::days(1);
        }

        let gaps: Vec<f64> = self
            .timestamps
            .windows(2)
            .map(|w| (w[1] - w[0]).num_milliseconds() as f64)
            .collect();

        match stats::median(&gaps) {
            Ok(ms) if ms > 0.0 => Duration::milliseconds(ms.round() as i64),
            _ => Duration::days(1),
        }
    }

    /// The `horizon` timestamps following the last observation
    pub fn future_timestamps(&self, horizon: usize) -> Result<Vec<DateTime<Utc>>> {
        let last = self.last_timestamp().ok_or_else(|| {
            AnalysisError::InsufficientData("cannot extend an empty series".to_string())
        })?;
        let step = self.step();

        // the farthest timestamp bounds every earlier one
        if shifted(last, step, horizon).is_none() {
            return Err(AnalysisError::execution(format!(
                "cannot extend the index by {} steps of {}",
                horizon, step
            )));
        }
        (1..=horizon)
            .map(|k| shifted(last, step, k))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| AnalysisError::execution("timestamp out of range"))
    }
}

/// `origin + step * k`, `None` when it leaves the representable range
fn shifted(origin: DateTime<Utc>, step: Duration, k: usize) -> Option<DateTime<Utc>> {
    let k = i32::try_from(k).ok()?;
    origin.checked_add_signed(step.checked_mul(k)?)
}
