//! Value-numbering infrastructure

pub mod analysis;
pub mod cache;

pub use analysis::{run_value_numbering, ValueNumberAnalysis, ValueNumberDataflow};
pub use cache::ValueNumberCache;
