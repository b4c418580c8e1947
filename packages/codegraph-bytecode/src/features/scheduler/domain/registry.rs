//! Plugin detector registries

use super::detector::DetectorDeclaration;
use super::selector::{DetectorSelector, OrderingConstraint};
use serde::{Deserialize, Serialize};

/// Detectors and ordering constraints contributed by one plugin
///
/// ```yaml
/// plugin_id: core
/// detectors:
///   - id: FieldCollector
///   - id: NullDeref
///     capabilities: [nullness]
///     reporting: true
/// inter_pass:
///   - earlier: { single: FieldCollector }
///     later: reporting
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetectorRegistry {
    pub plugin_id: String,
    #[serde(default)]
    pub detectors: Vec<DetectorDeclaration>,
    /// Constraints forcing `earlier` into a strictly earlier pass
    #[serde(default)]
    pub inter_pass: Vec<OrderingConstraint>,
    /// Constraints ordering detectors inside one pass
    #[serde(default)]
    pub intra_pass: Vec<OrderingConstraint>,
}

impl DetectorRegistry {
    pub fn new(plugin_id: impl Into<String>) -> Self {
        Self {
            plugin_id: plugin_id.into(),
            detectors: Vec::new(),
            inter_pass: Vec::new(),
            intra_pass: Vec::new(),
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Builder: Declare a detector
    pub fn detector(mut self, declaration: DetectorDeclaration) -> Self {
        self.detectors.push(declaration);
        self
    }

    /// Builder: `earlier` runs in a strictly earlier pass than `later`
    pub fn inter_pass(mut self, earlier: DetectorSelector, later: DetectorSelector) -> Self {
        self.inter_pass.push(OrderingConstraint::new(earlier, later));
        self
    }

    /// Builder: `earlier` runs before `later` within the same pass
    pub fn intra_pass(mut self, earlier: DetectorSelector, later: DetectorSelector) -> Self {
        self.intra_pass.push(OrderingConstraint::new(earlier, later));
        self
    }
}
