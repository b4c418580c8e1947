// Class hierarchy and subtype queries
//
// Hexagonal Architecture:
// - domain: ClassId, TypeDescriptor, ClassVertex, query results
// - ports: ClassMetadataProvider / MissingClassReporter boundaries
// - infrastructure: InheritanceGraph (petgraph), SubtypeOracle (memoized queries), adapters

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::{
    BaseType, ClassId, ClassMetadata, ClassVertex, InheritanceEdgeKind, PrimitiveType,
    SubtypeSet, SupertypeQueryResult, TypeDescriptor,
};
pub use infrastructure::{
    ClassLookupFailure, InMemoryClassProvider, InheritanceGraph, MissingClassCollector,
    SubtypeOracle, SupertypeVisitor, TracingMissingClassReporter, TraversalControl,
};
pub use ports::{ClassMetadataProvider, MissingClassReporter};
