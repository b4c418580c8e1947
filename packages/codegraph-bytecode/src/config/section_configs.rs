//! Per-section configuration
//!
//! One struct per engine component. Every section:
//! - derives serde with `#[serde(default)]` so YAML may specify a subset of fields
//! - rejects unknown fields
//! - exposes chainable builder setters for closure overrides
//! - implements [`Validatable`] with range checks

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use super::validation::Validatable;
use serde::{Deserialize, Serialize};

// ============================================================================
// Class hierarchy
// ============================================================================

/// Inheritance graph and subtype query settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HierarchyConfig {
    /// Memoize supertype / subtype sets (default: true)
    pub cache_queries: bool,

    /// Forward missing classes to the `MissingClassReporter` (default: true)
    pub report_missing_classes: bool,

    /// Initial vertex capacity of the inheritance graph (0..=10_000_000)
    pub initial_capacity: usize,
}

impl HierarchyConfig {
    /// Builder: Set cache_queries
    pub fn cache_queries(mut self, v: bool) -> Self {
        self.cache_queries = v;
        self
    }

    /// Builder: Set report_missing_classes
    pub fn report_missing_classes(mut self, v: bool) -> Self {
        self.report_missing_classes = v;
        self
    }

    /// Builder: Set initial_capacity
    pub fn initial_capacity(mut self, v: usize) -> Self {
        self.initial_capacity = v;
        self
    }

    /// Create from preset
    pub fn from_preset(preset: Preset) -> Self {
        let initial_capacity = match preset {
            Preset::Fast => 256,
            Preset::Balanced | Preset::Custom => 4_096,
            Preset::Thorough => 65_536,
        };
        Self {
            cache_queries: true,
            report_missing_classes: true,
            initial_capacity,
        }
    }
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

impl Validatable for HierarchyConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.initial_capacity > 10_000_000 {
            return Err(ConfigError::range_with_hint(
                "initial_capacity",
                self.initial_capacity,
                0,
                10_000_000,
                "Graph pre-allocation must be reasonable",
            ));
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "hierarchy"
    }
}

// ============================================================================
// Dataflow engine
// ============================================================================

/// Generic fixed-point engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataflowConfig {
    /// Visit cap per block: the solver gives up after
    /// `max_iterations × block_count` block visits (1..=100_000)
    pub max_iterations: usize,

    /// Treat implicit exception edges as infeasible unless marked taken (default: true)
    pub prune_implicit_exceptions: bool,
}

impl DataflowConfig {
    /// Builder: Set max_iterations
    pub fn max_iterations(mut self, v: usize) -> Self {
        self.max_iterations = v;
        self
    }

    /// Builder: Set prune_implicit_exceptions
    pub fn prune_implicit_exceptions(mut self, v: bool) -> Self {
        self.prune_implicit_exceptions = v;
        self
    }

    /// Create from preset
    pub fn from_preset(preset: Preset) -> Self {
        let max_iterations = match preset {
            Preset::Fast => 50,
            Preset::Balanced | Preset::Custom => 500,
            Preset::Thorough => 5_000,
        };
        Self {
            max_iterations,
            prune_implicit_exceptions: true,
        }
    }
}

impl Default for DataflowConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

impl Validatable for DataflowConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_iterations == 0 || self.max_iterations > 100_000 {
            return Err(ConfigError::range_with_hint(
                "max_iterations",
                self.max_iterations,
                1,
                100_000,
                "Each block must be visited at least once",
            ));
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "dataflow"
    }
}

// ============================================================================
// Value numbering
// ============================================================================

/// Forward value-numbering / redundant-load analysis settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValueNumberConfig {
    /// Upper bound on the per-method value-number cache (16..=10_000_000)
    pub cache_capacity: usize,

    /// Cache entries reserved per instruction of the analysed method (1..=64)
    pub min_entries_per_instruction: usize,

    /// Reuse available loads instead of minting fresh numbers (default: true)
    pub redundant_load_elimination: bool,

    /// Only track fields that are reference-typed and loaded more than once
    pub profitable_fields_only: bool,

    /// Method calls kill every available load (default: true)
    pub kill_loads_on_invoke: bool,
}

impl ValueNumberConfig {
    /// Builder: Set cache_capacity
    pub fn cache_capacity(mut self, v: usize) -> Self {
        self.cache_capacity = v;
        self
    }

    /// Builder: Set min_entries_per_instruction
    pub fn min_entries_per_instruction(mut self, v: usize) -> Self {
        self.min_entries_per_instruction = v;
        self
    }

    /// Builder: Set redundant_load_elimination
    pub fn redundant_load_elimination(mut self, v: bool) -> Self {
        self.redundant_load_elimination = v;
        self
    }

    /// Builder: Set profitable_fields_only
    pub fn profitable_fields_only(mut self, v: bool) -> Self {
        self.profitable_fields_only = v;
        self
    }

    /// Builder: Set kill_loads_on_invoke
    pub fn kill_loads_on_invoke(mut self, v: bool) -> Self {
        self.kill_loads_on_invoke = v;
        self
    }

    /// Effective cache capacity for a method with `instruction_count` instructions
    ///
    /// Sized from the method, capped at `cache_capacity`.
    pub fn capacity_for(&self, instruction_count: usize) -> usize {
        self.min_entries_per_instruction
            .saturating_mul(instruction_count)
            .min(self.cache_capacity)
            .max(1)
    }

    /// Create from preset
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Fast => Self {
                cache_capacity: 4_096,
                min_entries_per_instruction: 2,
                redundant_load_elimination: true,
                profitable_fields_only: true,
                kill_loads_on_invoke: true,
            },
            Preset::Balanced | Preset::Custom => Self {
                cache_capacity: 65_536,
                min_entries_per_instruction: 4,
                redundant_load_elimination: true,
                profitable_fields_only: true,
                kill_loads_on_invoke: true,
            },
            Preset::Thorough => Self {
                cache_capacity: 1_048_576,
                min_entries_per_instruction: 8,
                redundant_load_elimination: true,
                profitable_fields_only: false,
                kill_loads_on_invoke: true,
            },
        }
    }
}

impl Default for ValueNumberConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

impl Validatable for ValueNumberConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.cache_capacity < 16 || self.cache_capacity > 10_000_000 {
            return Err(ConfigError::range_with_hint(
                "cache_capacity",
                self.cache_capacity,
                16,
                10_000_000,
                "Value-number cache must hold at least a handful of entries",
            ));
        }

        if self.min_entries_per_instruction == 0 || self.min_entries_per_instruction > 64 {
            return Err(ConfigError::range_with_hint(
                "min_entries_per_instruction",
                self.min_entries_per_instruction,
                1,
                64,
                "Re-visits must find every instruction's numbers in the cache",
            ));
        }

        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "value_numbering"
    }
}

// ============================================================================
// Detector scheduling
// ============================================================================

/// Execution plan settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchedulerConfig {
    /// Log every pass of the finished plan at info level (default: false)
    pub log_passes: bool,
}

impl SchedulerConfig {
    /// Builder: Set log_passes
    pub fn log_passes(mut self, v: bool) -> Self {
        self.log_passes = v;
        self
    }

    /// Create from preset
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            log_passes: matches!(preset, Preset::Thorough),
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

impl Validatable for SchedulerConfig {
    fn validate(&self) -> ConfigResult<()> {
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "scheduler"
    }
}

// ============================================================================
// Parallelism
// ============================================================================

/// Per-method parallel runner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParallelConfig {
    /// Number of workers (0=auto, 1..=256)
    pub num_workers: usize,

    /// Methods handed to a worker at once (1..=10000)
    pub batch_size: usize,

    /// Enable Rayon parallel iterator
    pub enable_rayon: bool,

    /// Thread stack size in MB (1..=64)
    pub stack_size_mb: usize,
}

impl ParallelConfig {
    /// Builder: Set num_workers
    pub fn num_workers(mut self, v: usize) -> Self {
        self.num_workers = v;
        self
    }

    /// Builder: Set batch_size
    pub fn batch_size(mut self, v: usize) -> Self {
        self.batch_size = v;
        self
    }

    /// Builder: Set enable_rayon
    pub fn enable_rayon(mut self, v: bool) -> Self {
        self.enable_rayon = v;
        self
    }

    /// Builder: Set stack_size_mb
    pub fn stack_size_mb(mut self, v: usize) -> Self {
        self.stack_size_mb = v;
        self
    }

    /// Resolve `num_workers == 0` to the machine's core count
    pub fn effective_workers(&self) -> usize {
        if self.num_workers == 0 {
            num_cpus::get()
        } else {
            self.num_workers
        }
    }

    /// Get preset configuration
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Fast | Preset::Balanced | Preset::Custom => Self {
                num_workers: 0, // Auto
                batch_size: 100,
                enable_rayon: true,
                stack_size_mb: 8,
            },
            Preset::Thorough => Self {
                num_workers: 0, // Auto
                batch_size: 50,
                enable_rayon: true,
                stack_size_mb: 16,
            },
        }
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

impl Validatable for ParallelConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.num_workers > 256 {
            return Err(ConfigError::range_with_hint(
                "num_workers",
                self.num_workers,
                0,
                256,
                "Number of workers must be reasonable (0=auto)",
            ));
        }

        if self.batch_size < 1 || self.batch_size > 10000 {
            return Err(ConfigError::range_with_hint(
                "batch_size",
                self.batch_size,
                1,
                10000,
                "Batch size must be reasonable",
            ));
        }

        if self.stack_size_mb < 1 || self.stack_size_mb > 64 {
            return Err(ConfigError::range_with_hint(
                "stack_size_mb",
                self.stack_size_mb,
                1,
                64,
                "Stack size must be reasonable",
            ));
        }

        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "parallel"
    }
}
