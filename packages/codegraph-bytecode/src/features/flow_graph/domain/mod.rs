//! Bytecode CFG domain types

pub mod block;
pub mod cfg;
pub mod instruction;
pub mod location;

pub use block::{BasicBlock, BlockKind, MethodInfo};
pub use cfg::{CfgEdge, ControlFlowGraph, EdgeKind};
pub use instruction::{Constant, FieldRef, Instruction, MethodRef};
pub use location::{BlockId, Location};
