//! Engine configuration builder
//!
//! Main configuration struct with preset-based defaults and per-section
//! closure overrides. `build()` validates and seals it as [`ValidatedConfig`].

use super::{
    error::{ConfigError, ConfigResult},
    io::{ConfigExportV1, ConfigOverrides},
    preset::Preset,
    section_configs::*,
    validation::{CrossSectionValidator, ValidatableCollection},
};

/// Engine configuration (builder)
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base preset
    pub(crate) preset: Preset,

    /// Section overrides (None = preset default)
    pub(crate) hierarchy: Option<HierarchyConfig>,
    pub(crate) dataflow: Option<DataflowConfig>,
    pub(crate) value_numbering: Option<ValueNumberConfig>,
    pub(crate) scheduler: Option<SchedulerConfig>,
    pub(crate) parallel: Option<ParallelConfig>,
}

impl EngineConfig {
    /// Level 1: Create from preset
    pub fn preset(preset: Preset) -> Self {
        Self {
            preset,
            hierarchy: None,
            dataflow: None,
            value_numbering: None,
            scheduler: None,
            parallel: None,
        }
    }

    /// Level 2: Override class hierarchy settings
    pub fn hierarchy<F>(mut self, f: F) -> Self
    where
        F: FnOnce(HierarchyConfig) -> HierarchyConfig,
    {
        let base = self.effective_hierarchy();
        self.hierarchy = Some(f(base));
        self
    }

    /// Level 2: Override dataflow engine settings
    pub fn dataflow<F>(mut self, f: F) -> Self
    where
        F: FnOnce(DataflowConfig) -> DataflowConfig,
    {
        let base = self.effective_dataflow();
        self.dataflow = Some(f(base));
        self
    }

    /// Level 2: Override value-numbering settings
    ///
    /// # Example
    /// ```ignore
    /// let config = EngineConfig::preset(Preset::Balanced)
    ///     .value_numbering(|c| c.kill_loads_on_invoke(false))
    ///     .build()?;
    /// ```
    pub fn value_numbering<F>(mut self, f: F) -> Self
    where
        F: FnOnce(ValueNumberConfig) -> ValueNumberConfig,
    {
        let base = self.effective_value_numbering();
        self.value_numbering = Some(f(base));
        self
    }

    /// Level 2: Override scheduler settings
    pub fn scheduler<F>(mut self, f: F) -> Self
    where
        F: FnOnce(SchedulerConfig) -> SchedulerConfig,
    {
        let base = self.effective_scheduler();
        self.scheduler = Some(f(base));
        self
    }

    /// Level 2: Override parallel runner settings
    pub fn parallel<F>(mut self, f: F) -> Self
    where
        F: FnOnce(ParallelConfig) -> ParallelConfig,
    {
        let base = self.effective_parallel();
        self.parallel = Some(f(base));
        self
    }

    /// Build and validate
    pub fn build(self) -> ConfigResult<ValidatedConfig> {
        // Step 1: Validate individual sections
        self.hierarchy.validate_all()?;
        self.dataflow.validate_all()?;
        self.value_numbering.validate_all()?;
        self.scheduler.validate_all()?;
        self.parallel.validate_all()?;

        // Step 2: Cross-section validation
        CrossSectionValidator::validate(&self)?;

        tracing::debug!(preset = %self.preset, "engine configuration validated");
        Ok(ValidatedConfig(self))
    }

    /// Get the base preset
    pub fn get_preset(&self) -> Preset {
        self.preset
    }

    pub(crate) fn effective_hierarchy(&self) -> HierarchyConfig {
        self.hierarchy
            .clone()
            .unwrap_or_else(|| HierarchyConfig::from_preset(self.preset))
    }

    pub(crate) fn effective_dataflow(&self) -> DataflowConfig {
        self.dataflow
            .clone()
            .unwrap_or_else(|| DataflowConfig::from_preset(self.preset))
    }

    pub(crate) fn effective_value_numbering(&self) -> ValueNumberConfig {
        self.value_numbering
            .clone()
            .unwrap_or_else(|| ValueNumberConfig::from_preset(self.preset))
    }

    pub(crate) fn effective_scheduler(&self) -> SchedulerConfig {
        self.scheduler
            .clone()
            .unwrap_or_else(|| SchedulerConfig::from_preset(self.preset))
    }

    pub(crate) fn effective_parallel(&self) -> ParallelConfig {
        self.parallel
            .clone()
            .unwrap_or_else(|| ParallelConfig::from_preset(self.preset))
    }

    /// Level 3: Load from a YAML v1 file
    pub fn from_yaml(path: &str) -> ConfigResult<ValidatedConfig> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Level 3: Load from YAML v1 text
    pub fn from_yaml_str(content: &str) -> ConfigResult<ValidatedConfig> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        // Version check
        match export.version {
            None => return Err(ConfigError::MissingVersion),
            Some(1) => {}
            Some(found) => {
                return Err(ConfigError::UnsupportedVersion {
                    found,
                    supported: vec![1],
                })
            }
        }

        let preset = Preset::from_str(&export.preset)?;
        let mut config = Self::preset(preset);

        if let Some(overrides) = export.overrides {
            config.hierarchy = overrides.hierarchy;
            config.dataflow = overrides.dataflow;
            config.value_numbering = overrides.value_numbering;
            config.scheduler = overrides.scheduler;
            config.parallel = overrides.parallel;
        }

        config.build()
    }

    /// Export to YAML v1
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: Some(1),
            preset: self.preset.to_string(),
            overrides: Some(ConfigOverrides {
                hierarchy: self.hierarchy.clone(),
                dataflow: self.dataflow.clone(),
                value_numbering: self.value_numbering.clone(),
                scheduler: self.scheduler.clone(),
                parallel: self.parallel.clone(),
            }),
        };

        Ok(serde_yaml::to_string(&export)?)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::preset(Preset::default())
    }
}

/// Validated configuration (immutable)
#[derive(Debug, Clone)]
pub struct ValidatedConfig(EngineConfig);

impl ValidatedConfig {
    /// Get the base preset
    pub fn preset(&self) -> Preset {
        self.0.preset
    }

    /// Get effective hierarchy config
    pub fn hierarchy(&self) -> HierarchyConfig {
        self.0.effective_hierarchy()
    }

    /// Get effective dataflow config
    pub fn dataflow(&self) -> DataflowConfig {
        self.0.effective_dataflow()
    }

    /// Get effective value-numbering config
    pub fn value_numbering(&self) -> ValueNumberConfig {
        self.0.effective_value_numbering()
    }

    /// Get effective scheduler config
    pub fn scheduler(&self) -> SchedulerConfig {
        self.0.effective_scheduler()
    }

    /// Get effective parallel config
    pub fn parallel(&self) -> ParallelConfig {
        self.0.effective_parallel()
    }

    /// Export to YAML
    pub fn to_yaml(&self) -> ConfigResult<String> {
        self.0.to_yaml()
    }

    /// Short human-readable description
    pub fn summary(&self) -> String {
        let dataflow = self.dataflow();
        let vn = self.value_numbering();
        let parallel = self.parallel();
        format!(
            "preset={} max_iterations={} prune_implicit_exceptions={} vn_cache={} rle={} workers={}",
            self.preset(),
            dataflow.max_iterations,
            dataflow.prune_implicit_exceptions,
            vn.cache_capacity,
            vn.redundant_load_elimination,
            parallel.effective_workers(),
        )
    }
}

impl Default for ValidatedConfig {
    fn default() -> Self {
        Self(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_preset_defaults_flow_through() {
        let config = EngineConfig::preset(Preset::Fast).build().unwrap();
        assert_eq!(config.dataflow(), DataflowConfig::from_preset(Preset::Fast));
        assert_eq!(config.preset(), Preset::Fast);
    }

    #[test]
    fn test_override_starts_from_preset() {
        let config = EngineConfig::preset(Preset::Thorough)
            .value_numbering(|c| c.kill_loads_on_invoke(false))
            .build()
            .unwrap();

        let vn = config.value_numbering();
        assert!(!vn.kill_loads_on_invoke);
        assert_eq!(vn.cache_capacity, 1_048_576);
    }

    #[test]
    fn test_overrides_compose() {
        let config = EngineConfig::preset(Preset::Balanced)
            .dataflow(|c| c.max_iterations(10))
            .dataflow(|c| c.prune_implicit_exceptions(false))
            .build()
            .unwrap();

        let dataflow = config.dataflow();
        assert_eq!(dataflow.max_iterations, 10);
        assert!(!dataflow.prune_implicit_exceptions);
    }

    #[test]
    fn test_invalid_override_fails_build() {
        let result = EngineConfig::preset(Preset::Balanced)
            .dataflow(|c| c.max_iterations(0))
            .build();
        assert!(matches!(result, Err(ConfigError::Range { .. })));
    }

    #[test]
    fn test_yaml_str_roundtrip() {
        let original = EngineConfig::preset(Preset::Fast)
            .scheduler(|c| c.log_passes(true))
            .parallel(|c| c.num_workers(2));
        let yaml = original.to_yaml().unwrap();

        let loaded = EngineConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(loaded.preset(), Preset::Fast);
        assert!(loaded.scheduler().log_passes);
        assert_eq!(loaded.parallel().num_workers, 2);
    }

    #[test]
    fn test_unknown_preset_in_yaml() {
        let result = EngineConfig::from_yaml_str("version: 1\npreset: balancd\n");
        match result {
            Err(ConfigError::UnknownPreset { suggestion, .. }) => {
                assert!(suggestion.contains("balanced"))
            }
            other => panic!("expected UnknownPreset, got {:?}", other),
        }
    }

    #[test]
    fn test_summary_mentions_preset() {
        let config = ValidatedConfig::default();
        assert!(config.summary().contains("preset=balanced"));
    }
}
