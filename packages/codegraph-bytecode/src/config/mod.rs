//! Configuration System
//!
//! 3-tier configuration:
//! - Level 1: Preset - Simple one-liner
//! - Level 2: Section Override - Partial adjustment via closures
//! - Level 3: YAML - Complete control
//!
//! # Examples
//!
//! ```rust,ignore
//! use codegraph_bytecode::config::{EngineConfig, Preset};
//!
//! // Level 1: Simple preset
//! let config = EngineConfig::preset(Preset::Fast).build()?;
//!
//! // Level 2: Override specific section
//! let config = EngineConfig::preset(Preset::Balanced)
//!     .dataflow(|c| c.max_iterations(1000))
//!     .value_numbering(|c| c.redundant_load_elimination(false))
//!     .build()?;
//!
//! // Level 3: Complete control via YAML
//! let config = EngineConfig::from_yaml("engine.yaml")?;
//! ```

pub mod engine_config;
pub mod error;
pub mod io;
pub mod preset;
pub mod section_configs;
pub mod validation;

// Re-exports
pub use engine_config::{EngineConfig, ValidatedConfig};
pub use error::{ConfigError, ConfigResult};
pub use io::{ConfigExportV1, ConfigOverrides};
pub use preset::Preset;
pub use section_configs::{
    DataflowConfig, HierarchyConfig, ParallelConfig, SchedulerConfig, ValueNumberConfig,
};
pub use validation::{CrossSectionValidator, Validatable, ValidatableCollection};
