//! Unconditional-dereference infrastructure

pub mod analysis;

pub use analysis::{ThrowerMap, UnconditionalDerefAnalysis};
