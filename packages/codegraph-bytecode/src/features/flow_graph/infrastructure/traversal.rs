//! CFG orderings
//!
//! Reverse postorder via petgraph's `DfsPostOrder`:
//! - forward: from the entry over successor edges
//! - backward: from the exit over `Reversed` edges
//!
//! Blocks unreachable from the start are absent from the result.

use crate::features::flow_graph::domain::{BlockId, ControlFlowGraph};
use petgraph::graph::NodeIndex;
use petgraph::visit::{DfsPostOrder, Reversed};

/// Reverse postorder from the entry block
pub fn reverse_postorder(cfg: &ControlFlowGraph) -> Vec<BlockId> {
    let graph = cfg.graph();
    let mut dfs = DfsPostOrder::new(graph, NodeIndex::new(cfg.entry().index()));
    let mut order = Vec::with_capacity(cfg.block_count());
    while let Some(node) = dfs.next(graph) {
        order.push(BlockId(node.index() as u32));
    }
    order.reverse();
    order
}

/// Reverse postorder of the reversed CFG, starting at the exit block
pub fn reverse_postorder_backward(cfg: &ControlFlowGraph) -> Vec<BlockId> {
    let reversed = Reversed(cfg.graph());
    let mut dfs = DfsPostOrder::new(reversed, NodeIndex::new(cfg.exit().index()));
    let mut order = Vec::with_capacity(cfg.block_count());
    while let Some(node) = dfs.next(reversed) {
        order.push(BlockId(node.index() as u32));
    }
    order.reverse();
    order
}
