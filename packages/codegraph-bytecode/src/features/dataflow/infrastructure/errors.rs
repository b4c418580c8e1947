//! Dataflow engine errors
//!
//! Top / bottom facts never raise: they mark unreached or dead code. These
//! variants cover malformed inputs and the iteration cap.

use crate::features::flow_graph::domain::{BlockId, Location};
use crate::features::flow_graph::infrastructure::FlowGraphError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DataflowError {
    #[error("block {0} is not part of the control-flow graph")]
    UnknownBlock(BlockId),

    #[error("location {0} is outside its block")]
    LocationOutOfRange(Location),

    #[error("dataflow over '{method}' did not converge within {limit} block visits")]
    TooManyIterations { method: String, limit: usize },

    #[error("malformed control-flow graph: {0}")]
    FlowGraph(#[from] FlowGraphError),
}
