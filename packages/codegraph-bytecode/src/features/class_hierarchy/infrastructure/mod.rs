//! Class hierarchy infrastructure

pub mod errors;
pub mod in_memory_provider;
pub mod inheritance_graph;
pub mod missing_class_collector;
pub mod subtype_oracle;

pub use errors::ClassLookupFailure;
pub use in_memory_provider::InMemoryClassProvider;
pub use inheritance_graph::{
    AddClassOutcome, InheritanceGraph, SupertypeVisitor, TraversalControl,
};
pub use missing_class_collector::{MissingClassCollector, TracingMissingClassReporter};
pub use subtype_oracle::{QueryStats, SubtypeOracle};
