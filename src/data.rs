//! Loading datasets from CSV files

use crate::error::{Result, TseaError};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tsea_core::params::parse_timestamp;
use tsea_core::Dataset;

/// Load a dataset from a CSV file
///
/// The expected CSV format is a header row, then one row per timestamp:
/// timestamp,temperature,humidity
/// 2024-01-01 00:00:00,3.5,81
///
/// Every column after the first is numeric, empty cells are missing values.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let file = File::open(path)?;
    read_csv(file)
}

/// Read a dataset in the [`load_csv`] format from any reader
pub fn read_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = reader.headers()?.clone();
    if headers.len() < 2 {
        return Err(TseaError::DataError(
            "expected a timestamp column and at least one value column".to_string(),
        ));
    }
    let names: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

    let mut index = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); names.len()];

    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let line = i + 2;

        let raw_timestamp = record.get(0).unwrap_or_default();
        let timestamp = parse_timestamp(raw_timestamp).ok_or_else(|| {
            TseaError::DataError(format!(
                "Invalid timestamp at line {}: \"{}\"",
                line, raw_timestamp
            ))
        })?;
        index.push(timestamp);

        for (column, values) in columns.iter_mut().enumerate() {
            let cell = record.get(column + 1).unwrap_or_default();
            let value = if cell.is_empty() {
                f64::NAN
            } else {
                cell.parse::<f64>().map_err(|e| {
                    TseaError::DataError(format!(
                        "Invalid value for {} at line {}: {}",
                        names[column], line, e
                    ))
                })?
            };
            values.push(value);
        }
    }

    let mut dataset = Dataset::new(index)?;
    for (name, values) in names.into_iter().zip(columns) {
        dataset = dataset.with_column(name, values)?;
    }
    Ok(dataset)
}
