//! Unconditional-dereference domain types

pub mod deref_set;
pub mod summary;

pub use deref_set::UnconditionalDerefSet;
pub use summary::DerefSummary;
