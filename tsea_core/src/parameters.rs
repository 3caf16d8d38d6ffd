//! Declarative parameter schema
//!
//! A [`ParameterSpec`] describes one input an algorithm accepts: its wire
//! name, a human label, and a kind carrying the bounds or choices a form
//! should render. Specs are validated when they are built and are immutable
//! afterwards.

use crate::descriptor::is_valid_name;
use crate::error::{CatalogueError, Scope};
use serde::Serialize;

/// What kind of value a parameter takes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParameterKind {
    /// Slider over a numeric range
    Range { minimum: f64, maximum: f64, step: f64 },
    /// Numeric entry with a default inside its bounds
    Number {
        minimum: f64,
        maximum: f64,
        step: f64,
        default: f64,
    },
    /// Pick one of an ordered list of values
    Choice { values: Vec<String> },
    /// On/off flag
    Boolean { default: bool },
}

/// One declared parameter of an algorithm
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSpec {
    name: String,
    label: String,
    description: String,
    disabled: bool,
    #[serde(flatten)]
    kind: ParameterKind,
}

impl ParameterSpec {
    fn with_kind(name: impl Into<String>, kind: ParameterKind) -> Result<Self, CatalogueError> {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(CatalogueError::InvalidName {
                scope: Scope::Parameter,
                name,
            });
        }

        Ok(Self {
            label: name.clone(),
            name,
            description: String::new(),
            disabled: false,
            kind,
        })
    }

    /// Create a slider parameter, requires `minimum < maximum`
    pub fn range(
        name: impl Into<String>,
        minimum: f64,
        maximum: f64,
        step: f64,
    ) -> Result<Self, CatalogueError> {
        let name = name.into();
        if !(minimum < maximum) {
            return Err(CatalogueError::InvalidParameterDefinition {
                name,
                reason: format!(
                    "minimum ({}) must be strictly smaller than maximum ({})",
                    minimum, maximum
                ),
            });
        }

        Self::with_kind(
            name,
            ParameterKind::Range {
                minimum,
                maximum,
                step,
            },
        )
    }

    /// Create a numeric entry parameter
    ///
    /// The default must lie strictly inside the bounds and the step must be
    /// smaller than the width of the range.
    pub fn number(
        name: impl Into<String>,
        minimum: f64,
        maximum: f64,
        step: f64,
        default: f64,
    ) -> Result<Self, CatalogueError> {
        let name = name.into();
        if !(minimum < default && default < maximum) {
            return Err(CatalogueError::InvalidParameterDefinition {
                name,
                reason: format!(
                    "bounds must satisfy minimum < default < maximum, got {} < {} < {}",
                    minimum, default, maximum
                ),
            });
        }
        if !(step < maximum - minimum) {
            return Err(CatalogueError::InvalidParameterDefinition {
                name,
                reason: format!(
                    "step ({}) must be smaller than maximum - minimum ({})",
                    step,
                    maximum - minimum
                ),
            });
        }

        Self::with_kind(
            name,
            ParameterKind::Number {
                minimum,
                maximum,
                step,
                default,
            },
        )
    }

    /// Create a choice parameter, values keep their order
    pub fn choice<I, S>(name: impl Into<String>, values: I) -> Result<Self, CatalogueError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        Self::with_kind(name, ParameterKind::Choice { values })
    }

    /// Create a boolean flag
    pub fn boolean(name: impl Into<String>, default: bool) -> Result<Self, CatalogueError> {
        Self::with_kind(name, ParameterKind::Boolean { default })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Mark the parameter as shown but not editable
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn kind(&self) -> &ParameterKind {
        &self.kind
    }

    /// Wire value a pre-filled form would submit for this parameter
    ///
    /// Sliders have no declared default and yield `None`.
    pub fn default_value(&self) -> Option<String> {
        match &self.kind {
            ParameterKind::Range { .. } => None,
            ParameterKind::Number { default, .. } => Some(default.to_string()),
            ParameterKind::Choice { values } => values.first().cloned(),
            ParameterKind::Boolean { default } => Some(default.to_string()),
        }
    }
}
