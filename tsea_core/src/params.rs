//! Raw request parameters and their typed accessors
//!
//! Requests arrive as a flat string-to-string map. Each accessor parses one
//! value on demand: an absent key is reported as missing, a value that does
//! not parse is an execution failure naming the parameter.

use crate::descriptor::AlgorithmDescriptor;
use crate::error::{AnalysisError, Result};
use crate::parameters::ParameterKind;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::collections::BTreeMap;
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: BTreeMap<String, String>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Builder-style [`Params::insert`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn get_raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copy of the map without the given keys
    pub fn without(&self, keys: &[&str]) -> Params {
        Params {
            values: self
                .values
                .iter()
                .filter(|(k, _)| !keys.contains(&k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    pub fn get_str(&self, key: &str) -> Result<&str> {
        self.get_raw(key)
            .ok_or_else(|| AnalysisError::MissingParameters {
                names: vec![key.to_string()],
            })
    }

    pub fn get_usize(&self, key: &str) -> Result<usize> {
        self.parse(key, "a non-negative integer")
    }

    pub fn get_f64(&self, key: &str) -> Result<f64> {
        self.parse(key, "a number")
    }

    /// Like [`Params::get_usize`], checked against the bounds `descriptor`
    /// declares for `key`
    pub fn get_usize_within(&self, descriptor: &AlgorithmDescriptor, key: &str) -> Result<usize> {
        let value = self.get_usize(key)?;
        check_bounds(descriptor, key, value as f64)?;
        Ok(value)
    }

    /// Like [`Params::get_f64`], checked against the bounds `descriptor`
    /// declares for `key`
    pub fn get_f64_within(&self, descriptor: &AlgorithmDescriptor, key: &str) -> Result<f64> {
        let value = self.get_f64(key)?;
        check_bounds(descriptor, key, value)?;
        Ok(value)
    }

    /// Parse a flag, only `true` and `false` are accepted (any case)
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        let raw = self.get_str(key)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(invalid(key, raw, "'true' or 'false'")),
        }
    }

    /// Like [`Params::get_bool`] but an absent flag takes `default`
    pub fn get_bool_or(&self, key: &str, default: bool) -> Result<bool> {
        if self.contains(key) {
            self.get_bool(key)
        } else {
            Ok(default)
        }
    }

    /// Parse a timestamp
    ///
    /// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS` (both
    /// read as UTC) and plain `YYYY-MM-DD` (midnight UTC).
    pub fn get_timestamp(&self, key: &str) -> Result<DateTime<Utc>> {
        let raw = self.get_str(key)?;
        parse_timestamp(raw.trim()).ok_or_else(|| invalid(key, raw, "a timestamp"))
    }

    fn parse<T: FromStr>(&self, key: &str, expected: &str) -> Result<T> {
        let raw = self.get_str(key)?;
        raw.trim().parse().map_err(|_| invalid(key, raw, expected))
    }
}

/// Parse the timestamp formats accepted by [`Params::get_timestamp`]
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Numeric values must lie within the declared `[minimum, maximum]`
fn check_bounds(descriptor: &AlgorithmDescriptor, key: &str, value: f64) -> Result<()> {
    let bounds = descriptor.parameter(key).and_then(|spec| match spec.kind() {
        ParameterKind::Range {
            minimum, maximum, ..
        }
        | ParameterKind::Number {
            minimum, maximum, ..
        } => Some((*minimum, *maximum)),
        _ => None,
    });

    match bounds {
        Some((minimum, maximum)) if !(value >= minimum && value <= maximum) => {
            Err(AnalysisError::AlgorithmExecutionFailed(format!(
                "parameter \"{}\" must be between {} and {}, got {}",
                key, minimum, maximum, value
            )))
        }
        _ => Ok(()),
    }
}

fn invalid(key: &str, raw: &str, expected: &str) -> AnalysisError {
    AnalysisError::AlgorithmExecutionFailed(format!(
        "parameter \"{}\" must be {}, got \"{}\"",
        key, expected, raw
    ))
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Params {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::ParameterSpec;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("true", true)]
    #[case("False", false)]
    #[case(" TRUE ", true)]
    fn test_get_bool_accepts(#[case] raw: &str, #[case] expected: bool) {
        let params = Params::new().with("flag", raw);
        assert_eq!(params.get_bool("flag").unwrap(), expected);
    }

    #[rstest]
    #[case("1")]
    #[case("yes")]
    #[case("")]
    fn test_get_bool_rejects(#[case] raw: &str) {
        let params = Params::new().with("flag", raw);
        assert!(matches!(
            params.get_bool("flag"),
            Err(AnalysisError::AlgorithmExecutionFailed(_))
        ));
    }

    #[test]
    fn test_missing_key() {
        let params = Params::new();
        assert_eq!(
            params.get_usize("horizon"),
            Err(AnalysisError::MissingParameters {
                names: vec!["horizon".to_string()]
            })
        );
        assert_eq!(params.get_bool_or("use_naive", false), Ok(false));
    }

    #[test]
    fn test_numeric_accessors() {
        let params: Params = [("horizon", "6"), ("penalty", "2.5"), ("bad", "six")]
            .into_iter()
            .collect();

        assert_eq!(params.get_usize("horizon").unwrap(), 6);
        assert_eq!(params.get_f64("penalty").unwrap(), 2.5);
        assert!(params.get_usize("penalty").is_err());
        let message = params.get_usize("bad").unwrap_err().to_string();
        assert!(message.contains("\"bad\""));
        assert!(message.contains("six"));
    }

    #[rstest]
    #[case("2024-03-01T12:30:00Z")]
    #[case("2024-03-01T13:30:00+01:00")]
    #[case("2024-03-01 12:30:00")]
    #[case("2024-03-01T12:30:00")]
    fn test_get_timestamp_formats(#[case] raw: &str) {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let params = Params::new().with("start", raw);
        assert_eq!(params.get_timestamp("start").unwrap(), expected);
    }

    #[test]
    fn test_get_timestamp_date_only() {
        let params = Params::new().with("end", "2024-03-01").with("bad", "March");
        assert_eq!(
            params.get_timestamp("end").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
        );
        assert!(params.get_timestamp("bad").is_err());
    }

    #[rstest]
    #[case("0", false)]
    #[case("1", true)]
    #[case("365", true)]
    #[case("366", false)]
    #[case("100000000000", false)]
    fn test_usize_within_declared_bounds(#[case] raw: &str, #[case] accepted: bool) {
        let descriptor = AlgorithmDescriptor::builder("naive")
            .parameter(ParameterSpec::number("horizon", 1.0, 365.0, 1.0, 30.0).unwrap())
            .build()
            .unwrap();
        let params = Params::new().with("horizon", raw);

        let result = params.get_usize_within(&descriptor, "horizon");
        assert_eq!(result.is_ok(), accepted);
        if let Err(e) = result {
            assert!(matches!(e, AnalysisError::AlgorithmExecutionFailed(_)));
            assert!(e.to_string().contains("between 1 and 365"));
        }
    }

    #[test]
    fn test_f64_within_and_undeclared_keys() {
        let descriptor = AlgorithmDescriptor::builder("pelt-l2")
            .parameter(ParameterSpec::number("penalty", 0.0, 10.0, 0.01, 1.0).unwrap())
            .build()
            .unwrap();
        let params = Params::new()
            .with("penalty", "NaN")
            .with("extra", "1e12");

        assert!(params.get_f64_within(&descriptor, "penalty").is_err());
        assert_eq!(params.get_f64_within(&descriptor, "extra").unwrap(), 1e12);
    }

    #[test]
    fn test_without() {
        let params = Params::new().with("feature", "co").with("window", "5");
        let stripped = params.without(&["feature"]);
        assert!(!stripped.contains("feature"));
        assert_eq!(stripped.get_raw("window"), Some("5"));
        assert_eq!(params.len(), 2);
    }
}
