//! Scheduler infrastructure

pub mod constraint_graph;
pub mod errors;
pub mod execution_plan;

pub use constraint_graph::ConstraintGraph;
pub use errors::OrderingConstraintError;
pub use execution_plan::ExecutionPlanBuilder;
