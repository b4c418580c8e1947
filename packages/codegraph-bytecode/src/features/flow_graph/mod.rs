//! Per-method control-flow graphs over a stack-machine instruction model
//!
//! - domain: instructions, blocks, edges, `ControlFlowGraph`
//! - infrastructure: `CfgBuilder`, reverse-postorder traversals

pub mod domain;
pub mod infrastructure;

pub use domain::{
    BasicBlock, BlockId, BlockKind, CfgEdge, Constant, ControlFlowGraph, EdgeKind, FieldRef,
    Instruction, Location, MethodInfo, MethodRef,
};
pub use infrastructure::{
    reverse_postorder, reverse_postorder_backward, CfgBuilder, FlowGraphError,
};
