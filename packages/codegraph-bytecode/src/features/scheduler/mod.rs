// Detector scheduling
//
// Hexagonal Architecture:
// - domain: detector declarations, selectors, registries, ExecutionPlan
// - infrastructure: ConstraintGraph (petgraph) and ExecutionPlanBuilder

pub mod domain;
pub mod infrastructure;

pub use domain::{
    AnalysisPass, DetectorDeclaration, DetectorFactory, DetectorRegistry, DetectorSelector,
    ExecutionPlan, OrderingConstraint,
};
pub use infrastructure::{ConstraintGraph, ExecutionPlanBuilder, OrderingConstraintError};
