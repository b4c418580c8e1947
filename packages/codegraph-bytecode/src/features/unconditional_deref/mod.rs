// Backward unconditional parameter dereference analysis
//
// Hexagonal Architecture:
// - domain: UnconditionalDerefSet (bit vector fact), DerefSummary
// - infrastructure: the DataflowAnalysis instance + thrower → parameter map
// - application: per-method use case chaining value numbering and the deref analysis

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{UnconditionalDerefUseCase, UnconditionalDerefUseCaseImpl};
pub use domain::{DerefSummary, UnconditionalDerefSet};
pub use infrastructure::{ThrowerMap, UnconditionalDerefAnalysis};
