//! Value-numbering domain types

pub mod frame;
pub mod loaded_fields;
pub mod value_number;

pub use frame::{AvailableLoad, ValueNumberFrame};
pub use loaded_fields::LoadedFieldSet;
pub use value_number::{ValueNumber, ValueNumberFactory};
