//! Declarative building blocks for a block's configuration dialog.
//!
//! The hosting platform generates the settings form for a block from two
//! documents supplied at registration time: a structural schema (field names,
//! value types, enumerations, defaults, required fields and conditional
//! dependencies) and a presentation schema of per-field UI hints. Both are
//! static data. This module models their shape so widgets declare them as
//! typed Rust values and the host serializes them with serde.
//!
//! Property order is meaningful: the form renders fields in document order,
//! so the maps here are insertion-ordered.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Value type of a configurable property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Number,
    Boolean,
}

/// A single entry in the structural schema's `properties` map.
///
/// Every part is optional; dependency fragments in particular carry only an
/// `enum` constraint and no type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaProperty {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl SchemaProperty {
    /// A titled string property.
    pub fn string(title: &str) -> Self {
        Self {
            property_type: Some(PropertyType::String),
            title: Some(title.to_string()),
            ..Self::default()
        }
    }

    /// A titled number property.
    pub fn number(title: &str) -> Self {
        Self {
            property_type: Some(PropertyType::Number),
            title: Some(title.to_string()),
            ..Self::default()
        }
    }

    /// A titled boolean property.
    pub fn boolean(title: &str) -> Self {
        Self {
            property_type: Some(PropertyType::Boolean),
            title: Some(title.to_string()),
            ..Self::default()
        }
    }

    /// Restrict the property to a fixed set of values.
    pub fn with_enum<V: Into<Value>>(mut self, values: impl IntoIterator<Item = V>) -> Self {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Pre-populate the form field with a default.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// One alternative of a `oneOf` dependency: extra properties that appear
/// (and may become required) when the controlling field matches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependentSchema {
    pub properties: IndexMap<String, SchemaProperty>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl DependentSchema {
    pub fn property(mut self, name: &str, property: SchemaProperty) -> Self {
        self.properties.insert(name.to_string(), property);
        self
    }

    pub fn require(mut self, name: &str) -> Self {
        self.required.push(name.to_string());
        self
    }
}

/// Conditional schema attached to a controlling property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyDependency {
    #[serde(rename = "oneOf")]
    pub one_of: Vec<DependentSchema>,
}

impl PropertyDependency {
    pub fn one_of(alternatives: impl IntoIterator<Item = DependentSchema>) -> Self {
        Self {
            one_of: alternatives.into_iter().collect(),
        }
    }
}

/// Structural schema for a block's configuration dialog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigurationSchema {
    pub properties: IndexMap<String, SchemaProperty>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub dependencies: IndexMap<String, PropertyDependency>,
}

impl ConfigurationSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a property; the form shows fields in insertion order.
    pub fn property(mut self, name: &str, property: SchemaProperty) -> Self {
        self.properties.insert(name.to_string(), property);
        self
    }

    /// Mark a property as required.
    pub fn require(mut self, name: &str) -> Self {
        self.required.push(name.to_string());
        self
    }

    /// Attach a conditional dependency to a controlling property.
    pub fn dependency(mut self, name: &str, dependency: PropertyDependency) -> Self {
        self.dependencies.insert(name.to_string(), dependency);
        self
    }
}

/// Presentation hints for a single form field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiHints {
    #[serde(rename = "ui:help", skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(rename = "ui:hidden", skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
}

impl UiHints {
    /// Help text shown next to the field.
    pub fn help(text: &str) -> Self {
        Self {
            help: Some(text.to_string()),
            hidden: None,
        }
    }

    /// Hide the field from the dialog.
    pub fn hidden(mut self) -> Self {
        self.hidden = Some(true);
        self
    }
}

/// Presentation schema: field name → hints, in form order.
pub type UiSchema = IndexMap<String, UiHints>;
