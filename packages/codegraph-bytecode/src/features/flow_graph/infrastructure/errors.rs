//! CFG construction errors

use crate::features::flow_graph::domain::{BlockId, Location};
use thiserror::Error;

/// Malformed control-flow graph
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FlowGraphError {
    #[error("edge references unknown block {0}")]
    UnknownBlock(BlockId),

    #[error("null check {check} guards {thrower}, which is outside the method")]
    ThrowerOutOfRange { check: BlockId, thrower: Location },

    #[error("null check {check} guards {thrower}, which dereferences nothing")]
    ThrowerNotDereference { check: BlockId, thrower: Location },

    #[error("{0} is a logical entry/exit block and cannot hold instructions")]
    InstructionsInSyntheticBlock(BlockId),
}
