//! Generic dataflow framework
//!
//! - `domain`: direction and fact meta-states
//! - `ports`: the `DataflowAnalysis` trait analyses implement
//! - `infrastructure`: the worklist solver

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::{Direction, FactState};
pub use infrastructure::{Dataflow, DataflowError, DataflowStats};
pub use ports::DataflowAnalysis;
