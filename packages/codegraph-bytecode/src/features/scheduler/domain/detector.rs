//! Detector descriptors

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A detector as declared in a plugin registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetectorDeclaration {
    pub id: String,
    /// Free-form capability tags (`"nullness"`, `"dataflow"`, ...)
    #[serde(default)]
    pub capabilities: Vec<String>,
    /// Produces user-visible reports (as opposed to collecting facts)
    #[serde(default)]
    pub reporting: bool,
}

impl DetectorDeclaration {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            capabilities: Vec::new(),
            reporting: false,
        }
    }

    /// Builder: Add a capability tag
    pub fn capability(mut self, tag: impl Into<String>) -> Self {
        self.capabilities.push(tag.into());
        self
    }

    /// Builder: Mark as reporting
    pub fn reporting(mut self, v: bool) -> Self {
        self.reporting = v;
        self
    }
}

/// A registered detector with its scheduling tie-break key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorFactory {
    pub id: String,
    pub plugin_id: String,
    /// Position within its plugin's declaration list
    pub declaration_order: usize,
    pub capabilities: Vec<String>,
    pub reporting: bool,
}

impl DetectorFactory {
    pub fn from_declaration(
        plugin_id: &str,
        declaration_order: usize,
        declaration: &DetectorDeclaration,
    ) -> Self {
        Self {
            id: declaration.id.clone(),
            plugin_id: plugin_id.to_string(),
            declaration_order,
            capabilities: declaration.capabilities.clone(),
            reporting: declaration.reporting,
        }
    }

    pub fn has_capability(&self, tag: &str) -> bool {
        self.capabilities.iter().any(|c| c == tag)
    }

    /// Secondary key: `(plugin id, declaration order)`
    pub fn secondary_key(&self) -> (&str, usize) {
        (&self.plugin_id, self.declaration_order)
    }

    pub fn cmp_secondary(&self, other: &Self) -> Ordering {
        self.secondary_key().cmp(&other.secondary_key())
    }
}
