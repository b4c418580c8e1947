//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains (as needed):
//! - domain/     - Pure types (no external dependencies)
//! - ports/      - Interface definitions (traits)
//! - application/ - Use cases
//! - infrastructure/ - Algorithms and adapters

pub mod class_hierarchy;
pub mod dataflow;
pub mod flow_graph;
pub mod scheduler;
pub mod unconditional_deref;
pub mod value_numbering;
