//! Algorithm descriptors
//!
//! Immutable metadata about one analysis algorithm: its URL-safe name, the
//! descriptions shown to users, its declared parameters, and the request
//! keys it needs beyond those parameters.

use crate::error::{CatalogueError, Scope};
use crate::parameters::ParameterSpec;
use serde::Serialize;
use std::collections::HashSet;

/// Whether `name` is a non-empty token of ASCII letters, digits, '-' or '_'
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Metadata of one registered algorithm
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlgorithmDescriptor {
    name: String,
    short_description: String,
    long_description: String,
    parameters: Vec<ParameterSpec>,
    required_extra_params: Vec<String>,
}

impl AlgorithmDescriptor {
    /// Start building a descriptor for `name`
    pub fn builder(name: impl Into<String>) -> DescriptorBuilder {
        DescriptorBuilder {
            name: name.into(),
            short_description: String::new(),
            long_description: String::new(),
            parameters: Vec::new(),
            required_extra_params: Vec::new(),
        }
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

    pub fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    pub fn required_extra_params(&self) -> &[String] {
        &self.required_extra_params
    }

    /// Look up a declared parameter by name
    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.name() == name)
    }

    /// Whether a parameter with this name is declared
    pub fn declares(&self, name: &str) -> bool {
        self.parameter(name).is_some()
    }

    /// Every key a request for this algorithm must carry
    ///
    /// Declared parameter names first, then the extra keys, without
    /// duplicates and in first-seen order.
    pub fn expected_parameters(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.parameters
            .iter()
            .map(|p| p.name())
            .chain(self.required_extra_params.iter().map(String::as_str))
            .filter(|name| seen.insert(*name))
            .map(str::to_string)
            .collect()
    }
}

/// Builder for [`AlgorithmDescriptor`], validated in [`DescriptorBuilder::build`]
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
    name: String,
    short_description: String,
    long_description: String,
    parameters: Vec<ParameterSpec>,
    required_extra_params: Vec<String>,
}

impl DescriptorBuilder {
    pub fn short_description(mut self, text: impl Into<String>) -> Self {
        self.short_description = text.into();
        self
    }

    pub fn long_description(mut self, text: impl Into<String>) -> Self {
        self.long_description = text.into();
        self
    }

    pub fn parameter(mut self, spec: ParameterSpec) -> Self {
        self.parameters.push(spec);
        self
    }

    pub fn parameters(mut self, specs: impl IntoIterator<Item = ParameterSpec>) -> Self {
        self.parameters.extend(specs);
        self
    }

    /// Require a request key that is not a declared parameter
    pub fn required_extra_param(mut self, name: impl Into<String>) -> Self {
        self.required_extra_params.push(name.into());
        self
    }

    pub fn build(self) -> Result<AlgorithmDescriptor, CatalogueError> {
        if !is_valid_name(&self.name) {
            return Err(CatalogueError::InvalidName {
                scope: Scope::Algorithm,
                name: self.name,
            });
        }

        let mut seen = HashSet::new();
        for spec in &self.parameters {
            if !seen.insert(spec.name()) {
                return Err(CatalogueError::DuplicateName {
                    scope: Scope::Parameter,
                    name: spec.name().to_string(),
                });
            }
        }

        Ok(AlgorithmDescriptor {
            name: self.name,
            short_description: self.short_description,
            long_description: self.long_description,
            parameters: self.parameters,
            required_extra_params: self.required_extra_params,
        })
    }
}
