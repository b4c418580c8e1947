// Forward value numbering with redundant-load elimination
//
// - domain: ValueNumber, ValueNumberFrame, available loads, field-load census
// - infrastructure: the DataflowAnalysis instance and its LRU value-number cache

pub mod domain;
pub mod infrastructure;

pub use domain::{
    AvailableLoad, LoadedFieldSet, ValueNumber, ValueNumberFactory, ValueNumberFrame,
};
pub use infrastructure::{
    run_value_numbering, ValueNumberAnalysis, ValueNumberCache, ValueNumberDataflow,
};
