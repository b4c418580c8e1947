//! Unconditional-dereference application layer

pub mod analyze_derefs;

pub use analyze_derefs::{UnconditionalDerefUseCase, UnconditionalDerefUseCaseImpl};
