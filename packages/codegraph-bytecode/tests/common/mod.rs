//! Common test utilities for codegraph-bytecode
//!
//! Shared fixtures, assertions, and builders for the integration tests.

#![allow(dead_code)]

mod assertions;
mod builders;
mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
