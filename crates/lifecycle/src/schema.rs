//! Resource schemas and configuration validation

use crate::attributes::Attributes;
use crate::diagnostics::{Diagnostic, Diagnostics};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How an attribute may be set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeMode {
    /// Must be set in configuration
    Required,
    /// May be set in configuration
    Optional,
    /// Set only by the resource
    Computed,
}

/// A single string attribute in a schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub mode: AttributeMode,
    pub description: String,
}

impl Attribute {
    pub fn required(description: impl Into<String>) -> Self {
        Self {
            mode: AttributeMode::Required,
            description: description.into(),
        }
    }

    pub fn optional(description: impl Into<String>) -> Self {
        Self {
            mode: AttributeMode::Optional,
            description: description.into(),
        }
    }

    pub fn computed(description: impl Into<String>) -> Self {
        Self {
            mode: AttributeMode::Computed,
            description: description.into(),
        }
    }

    /// Whether configuration may set this attribute
    pub fn is_configurable(&self) -> bool {
        !matches!(self.mode, AttributeMode::Computed)
    }
}

/// Schema for one resource type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub version: u64,
    pub description: String,
    pub attributes: BTreeMap<String, Attribute>,
}

impl Schema {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            version: 0,
            description: description.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Add an attribute (builder style)
    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    /// Names of attributes that configuration may set
    pub fn configurable_names(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .iter()
            .filter(|(_, a)| a.is_configurable())
            .map(|(n, _)| n.as_str())
    }

    /// Names of attributes set only by the resource
    pub fn computed_names(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .iter()
            .filter(|(_, a)| !a.is_configurable())
            .map(|(n, _)| n.as_str())
    }

    /// The part of a record that comes from configuration
    ///
    /// Every configurable attribute is present; missing ones read as null.
    pub fn config_view(&self, attrs: &Attributes) -> Attributes {
        self.configurable_names()
            .map(|name| (name.to_string(), attrs.get(name).clone()))
            .collect()
    }

    /// Validate a configuration block against this schema
    pub fn validate_config(&self, config: &Attributes) -> Diagnostics {
        let mut diags = Diagnostics::new();

        for (name, value) in config.iter() {
            match self.attributes.get(name) {
                None => diags.push(
                    Diagnostic::error("Unsupported attribute")
                        .with_attribute(name)
                        .with_detail(format!("No attribute named `{name}` is declared")),
                ),
                Some(attr) if attr.is_configurable() => {}
                Some(_) if value.is_known() => diags.push(
                    Diagnostic::error("Invalid configuration for computed attribute")
                        .with_attribute(name)
                        .with_detail(format!("`{name}` is computed and cannot be set")),
                ),
                Some(_) => diags.push(
                    Diagnostic::warning("Computed attribute in configuration is ignored")
                        .with_attribute(name)
                        .with_detail(format!("`{name}` is set by the resource on apply")),
                ),
            }
        }

        for (name, attr) in &self.attributes {
            if attr.mode == AttributeMode::Required && config.get(name).is_null() {
                diags.push(
                    Diagnostic::error("Missing required argument")
                        .with_attribute(name)
                        .with_detail(format!("The argument `{name}` is required")),
                );
            }
        }

        diags
    }
}
