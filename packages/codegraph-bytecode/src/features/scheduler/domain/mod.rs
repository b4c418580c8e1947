//! Scheduler domain types

pub mod detector;
pub mod plan;
pub mod registry;
pub mod selector;

pub use detector::{DetectorDeclaration, DetectorFactory};
pub use plan::{AnalysisPass, ExecutionPlan};
pub use registry::DetectorRegistry;
pub use selector::{DetectorSelector, OrderingConstraint};
