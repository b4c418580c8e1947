//! Configuration I/O (YAML loading)
//!
//! Defines YAML schema types. Loading and export live on `EngineConfig`.

use super::section_configs::*;
use serde::{Deserialize, Serialize};

/// YAML Schema v1
///
/// ```yaml
/// version: 1
/// preset: balanced
/// overrides:
///   dataflow:
///     max_iterations: 1000
///   value_numbering:
///     kill_loads_on_invoke: false
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    #[serde(default)]
    pub version: Option<u32>,

    /// Base preset
    pub preset: String,

    /// Fine-grained overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<ConfigOverrides>,
}

/// Configuration overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hierarchy: Option<HierarchyConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataflow: Option<DataflowConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_numbering: Option<ValueNumberConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduler: Option<SchedulerConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<ParallelConfig>,
}
