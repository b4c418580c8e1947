/*
 * Codegraph Bytecode - Static Bytecode Analysis Engine
 *
 * Feature-First Hexagonal Architecture:
 * - features/class_hierarchy     : InheritanceGraph + memoized subtype queries
 * - features/flow_graph          : per-method CFGs over a stack-machine instruction model
 * - features/dataflow            : generic forward/backward worklist engine
 * - features/value_numbering     : forward value numbering, redundant-load elimination
 * - features/unconditional_deref : backward unconditional parameter dereference
 * - features/scheduler           : detector ordering constraints → ExecutionPlan
 * - pipeline/                    : AnalysisSession, per-method rayon runner
 * - config/                      : Preset → builder → YAML configuration
 */

#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::module_inception)] // Module naming intentional

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Feature modules
pub mod features;

/// Session and per-method orchestration
pub mod pipeline;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{EngineConfig, Preset, ValidatedConfig};
pub use errors::{EngineError, Result};
pub use features::class_hierarchy::{
    ClassId, ClassLookupFailure, ClassMetadata, ClassMetadataProvider, MissingClassReporter,
    SubtypeOracle, TypeDescriptor,
};
pub use features::dataflow::{Dataflow, DataflowAnalysis, DataflowError, Direction};
pub use features::flow_graph::{CfgBuilder, ControlFlowGraph, Instruction, MethodInfo};
pub use features::scheduler::{
    DetectorRegistry, ExecutionPlan, ExecutionPlanBuilder, OrderingConstraintError,
};
pub use features::unconditional_deref::{DerefSummary, UnconditionalDerefUseCase};
pub use features::value_numbering::{ValueNumber, ValueNumberAnalysis};
pub use pipeline::{AnalysisSession, MethodAnalysisRunner};
