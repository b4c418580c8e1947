//! Error types for codegraph-bytecode
//!
//! Each feature owns its error enum; `EngineError` wraps them for callers
//! crossing feature boundaries.

use crate::config::ConfigError;
use crate::features::class_hierarchy::infrastructure::ClassLookupFailure;
use crate::features::dataflow::infrastructure::DataflowError;
use crate::features::flow_graph::infrastructure::FlowGraphError;
use crate::features::scheduler::infrastructure::OrderingConstraintError;
use thiserror::Error;

/// Main error type for codegraph-bytecode operations
#[derive(Debug, Error)]
pub enum EngineError {
    /// Subtype query over an incomplete hierarchy
    #[error(transparent)]
    ClassLookup(#[from] ClassLookupFailure),

    #[error(transparent)]
    Dataflow(#[from] DataflowError),

    #[error(transparent)]
    FlowGraph(#[from] FlowGraphError),

    /// Detector scheduling failed
    #[error(transparent)]
    Scheduling(#[from] OrderingConstraintError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl EngineError {
    /// Missing classes are expected on partial classpaths; callers may skip and continue
    pub fn is_class_lookup(&self) -> bool {
        matches!(self, Self::ClassLookup(_))
    }
}

/// Result type alias for codegraph-bytecode operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::class_hierarchy::domain::ClassId;

    #[test]
    fn test_conversions() {
        let err: EngineError = ClassLookupFailure::Unresolved(ClassId::new("a.Missing")).into();
        assert!(err.is_class_lookup());

        let err: EngineError = OrderingConstraintError::InterPassCycle {
            detectors: vec!["A".to_string()],
        }
        .into();
        assert!(!err.is_class_lookup());
        assert!(err.to_string().contains("cycle"));
    }
}
