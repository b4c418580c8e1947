//! Detector selectors used by ordering constraints

use super::detector::DetectorFactory;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Selects a set of registered detectors
///
/// YAML form: `{ single: Foo }`, `{ plugin: core }`, `{ capability: nullness }`,
/// `reporting`, `{ any_of: [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorSelector {
    /// Exactly the detector with this id
    Single(String),
    /// Every detector declared by the plugin
    Plugin(String),
    /// Detectors carrying the capability tag
    Capability(String),
    /// Detectors producing reports
    Reporting,
    /// Union of the inner selectors
    AnyOf(Vec<DetectorSelector>),
}

impl DetectorSelector {
    pub fn single(id: impl Into<String>) -> Self {
        Self::Single(id.into())
    }

    pub fn plugin(id: impl Into<String>) -> Self {
        Self::Plugin(id.into())
    }

    pub fn capability(tag: impl Into<String>) -> Self {
        Self::Capability(tag.into())
    }

    pub fn matches(&self, detector: &DetectorFactory) -> bool {
        match self {
            Self::Single(id) => detector.id == *id,
            Self::Plugin(plugin) => detector.plugin_id == *plugin,
            Self::Capability(tag) => detector.has_capability(tag),
            Self::Reporting => detector.reporting,
            Self::AnyOf(selectors) => selectors.iter().any(|s| s.matches(detector)),
        }
    }
}

impl fmt::Display for DetectorSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(id) => write!(f, "detector '{}'", id),
            Self::Plugin(plugin) => write!(f, "plugin '{}'", plugin),
            Self::Capability(tag) => write!(f, "capability '{}'", tag),
            Self::Reporting => write!(f, "reporting detectors"),
            Self::AnyOf(selectors) => {
                write!(f, "any of [")?;
                for (i, s) in selectors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", s)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// `earlier` detectors must run before `later` ones
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderingConstraint {
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub earlier: DetectorSelector,
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub later: DetectorSelector,
}

impl OrderingConstraint {
    pub fn new(earlier: DetectorSelector, later: DetectorSelector) -> Self {
        Self { earlier, later }
    }

    /// Both sides are single detectors
    pub fn between(earlier: impl Into<String>, later: impl Into<String>) -> Self {
        Self::new(
            DetectorSelector::single(earlier),
            DetectorSelector::single(later),
        )
    }
}

impl fmt::Display for OrderingConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} before {}", self.earlier, self.later)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::scheduler::domain::DetectorDeclaration;

    fn factory(plugin: &str, decl: DetectorDeclaration) -> DetectorFactory {
        DetectorFactory::from_declaration(plugin, 0, &decl)
    }

    #[test]
    fn test_selector_matching() {
        let npe = factory(
            "core",
            DetectorDeclaration::new("NullDeref").capability("nullness").reporting(true),
        );
        let collector = factory("extra", DetectorDeclaration::new("NoteDerefs"));

        assert!(DetectorSelector::single("NullDeref").matches(&npe));
        assert!(DetectorSelector::plugin("core").matches(&npe));
        assert!(!DetectorSelector::plugin("core").matches(&collector));
        assert!(DetectorSelector::capability("nullness").matches(&npe));
        assert!(DetectorSelector::Reporting.matches(&npe));
        assert!(!DetectorSelector::Reporting.matches(&collector));

        let any = DetectorSelector::AnyOf(vec![
            DetectorSelector::Reporting,
            DetectorSelector::plugin("extra"),
        ]);
        assert!(any.matches(&npe) && any.matches(&collector));
    }

    #[test]
    fn test_selector_yaml() {
        let yaml = "earlier: { plugin: core }\nlater: reporting\n";
        let constraint: OrderingConstraint = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            constraint,
            OrderingConstraint::new(DetectorSelector::plugin("core"), DetectorSelector::Reporting)
        );
        assert_eq!(constraint.to_string(), "plugin 'core' before reporting detectors");
    }

    #[test]
    fn test_nested_any_of_yaml() {
        let yaml = "earlier:\n  any_of:\n    - { single: A }\n    - { capability: taint }\n    - reporting\nlater: { single: Z }\n";
        let constraint: OrderingConstraint = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            constraint.earlier,
            DetectorSelector::AnyOf(vec![
                DetectorSelector::single("A"),
                DetectorSelector::capability("taint"),
                DetectorSelector::Reporting,
            ])
        );

        let text = serde_yaml::to_string(&constraint).unwrap();
        let back: OrderingConstraint = serde_yaml::from_str(&text).unwrap();
        assert_eq!(back, constraint);
    }
}
