//! Attribute schemas the host uses to plan changes.

use std::collections::BTreeMap;

use serde::Serialize;

/// One string attribute of a provider, resource or data source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub description: String,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
    /// A changed value destroys and recreates the instance.
    pub requires_replace: bool,
    /// Keep the prior state value while a new one is unknown.
    pub use_state_for_unknown: bool,
}

impl Attribute {
    pub fn required(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            required: true,
            ..Self::default()
        }
    }

    pub fn optional(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            optional: true,
            ..Self::default()
        }
    }

    pub fn computed(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            computed: true,
            ..Self::default()
        }
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn requires_replace(mut self) -> Self {
        self.requires_replace = true;
        self
    }

    pub fn use_state_for_unknown(mut self) -> Self {
        self.use_state_for_unknown = true;
        self
    }
}

/// Attributes keyed by their snake_case name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    pub description: String,
    pub attributes: BTreeMap<String, Attribute>,
}

impl Schema {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Names of attributes the user must set.
    pub fn required_attributes(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .iter()
            .filter(|(_, a)| a.required)
            .map(|(name, _)| name.as_str())
    }
}
