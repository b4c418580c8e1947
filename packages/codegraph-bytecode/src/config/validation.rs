//! Configuration validation
//!
//! Every section implements [`Validatable`]; `EngineConfig::build` runs the
//! section checks first and the cross-section checks second.

use super::error::{ConfigError, ConfigResult};
use super::engine_config::EngineConfig;

// ═══════════════════════════════════════════════════════════════════════════
// Validatable Trait
// ═══════════════════════════════════════════════════════════════════════════

/// Trait for validatable configuration objects
///
/// # Example
/// ```rust,ignore
/// fn configure<C: Validatable>(config: C) -> Result<C, ConfigError> {
///     config.validate()?;
///     Ok(config)
/// }
/// ```
pub trait Validatable {
    /// Validate the configuration
    ///
    /// Returns `Ok(())` if valid, `Err(ConfigError)` with details if invalid.
    fn validate(&self) -> ConfigResult<()>;

    /// Get the configuration name for error messages
    fn config_name(&self) -> &'static str {
        "Config"
    }
}

/// Extension trait for validating collections of configs
pub trait ValidatableCollection {
    /// Validate all configs in collection
    fn validate_all(&self) -> ConfigResult<()>;
}

impl<T: Validatable> ValidatableCollection for Vec<T> {
    fn validate_all(&self) -> ConfigResult<()> {
        for config in self {
            config.validate()?;
        }
        Ok(())
    }
}

impl<T: Validatable> ValidatableCollection for Option<T> {
    fn validate_all(&self) -> ConfigResult<()> {
        if let Some(config) = self {
            config.validate()?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Cross-section checks
// ═══════════════════════════════════════════════════════════════════════════

/// Cross-section validator
pub struct CrossSectionValidator;

impl CrossSectionValidator {
    /// Validate settings that span more than one section
    pub fn validate(config: &EngineConfig) -> ConfigResult<()> {
        let parallel = config.effective_parallel();
        if !parallel.enable_rayon && parallel.num_workers > 1 {
            return Err(ConfigError::CrossSectionConflict {
                issue: format!(
                    "{} workers requested with rayon disabled",
                    parallel.num_workers
                ),
                fix: "Set parallel.num_workers to 0 or 1, or enable rayon".to_string(),
            });
        }

        let vn = config.effective_value_numbering();
        if vn.cache_capacity < vn.min_entries_per_instruction {
            return Err(ConfigError::CrossSectionConflict {
                issue: format!(
                    "value_numbering.cache_capacity ({}) is below min_entries_per_instruction ({})",
                    vn.cache_capacity, vn.min_entries_per_instruction
                ),
                fix: "Raise cache_capacity or lower min_entries_per_instruction".to_string(),
            });
        }

        Ok(())
    }
}
