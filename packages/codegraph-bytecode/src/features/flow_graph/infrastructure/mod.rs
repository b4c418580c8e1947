//! Flow Graph infrastructure

pub mod cfg_builder;
pub mod errors;
pub mod traversal;

pub use cfg_builder::CfgBuilder;
pub use errors::FlowGraphError;
pub use traversal::{reverse_postorder, reverse_postorder_backward};
