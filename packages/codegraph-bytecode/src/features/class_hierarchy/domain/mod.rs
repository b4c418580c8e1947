//! Class hierarchy domain types

pub mod class_id;
pub mod query_result;
pub mod type_descriptor;
pub mod vertex;

pub use class_id::{ClassId, CLONEABLE, OBJECT, SERIALIZABLE};
pub use query_result::{SubtypeSet, SupertypeQueryResult};
pub use type_descriptor::{BaseType, PrimitiveType, TypeDescriptor};
pub use vertex::{ClassMetadata, ClassVertex, InheritanceEdgeKind, ResolutionState};
