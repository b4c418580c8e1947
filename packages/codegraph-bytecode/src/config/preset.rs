//! Preset configurations
//!
//! Presets provide complete default configurations for common use cases.

use super::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// CI: small caches, low iteration cap, no load tracking across calls
    ///
    /// - Dataflow: max_iterations=50
    /// - Value numbering: cache_capacity=4096, profitable fields only
    Fast,

    /// Default: balanced caches and iteration cap
    ///
    /// - Dataflow: max_iterations=500
    /// - Value numbering: cache_capacity=65536, profitable fields only
    Balanced,

    /// Audit: large caches, every field tracked
    ///
    /// - Dataflow: max_iterations=5000
    /// - Value numbering: cache_capacity=1M, all fields tracked
    Thorough,

    /// Custom: balanced defaults, meant to be overridden via YAML or builder
    Custom,
}

impl Preset {
    /// Parse preset from string
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "balanced" => Ok(Self::Balanced),
            "thorough" => Ok(Self::Thorough),
            "custom" => Ok(Self::Custom),
            _ => Err(ConfigError::unknown_preset(s)),
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Balanced => "balanced",
            Self::Thorough => "thorough",
            Self::Custom => "custom",
        }
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::Balanced
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_parsing() {
        assert_eq!(Preset::from_str("fast").unwrap(), Preset::Fast);
        assert_eq!(Preset::from_str("FAST").unwrap(), Preset::Fast);
        assert_eq!(Preset::from_str("balanced").unwrap(), Preset::Balanced);
        assert_eq!(Preset::from_str("thorough").unwrap(), Preset::Thorough);
        assert_eq!(Preset::from_str("custom").unwrap(), Preset::Custom);
        assert!(matches!(
            Preset::from_str("invalid"),
            Err(ConfigError::UnknownPreset { .. })
        ));
    }

    #[test]
    fn test_preset_display() {
        assert_eq!(Preset::Fast.to_string(), "fast");
        assert_eq!(Preset::Balanced.to_string(), "balanced");
        assert_eq!(Preset::Thorough.to_string(), "thorough");
        assert_eq!(Preset::Custom.to_string(), "custom");
    }

    #[test]
    fn test_default_preset() {
        assert_eq!(Preset::default(), Preset::Balanced);
    }
}
