//! Dataflow infrastructure

pub mod engine;
pub mod errors;

pub use engine::{Dataflow, DataflowStats};
pub use errors::DataflowError;
