//! Dataflow domain types

pub mod direction;
pub mod fact;

pub use direction::Direction;
pub use fact::FactState;
