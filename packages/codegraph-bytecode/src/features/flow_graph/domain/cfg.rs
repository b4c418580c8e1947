//! Control Flow Graph
//!
//! Petgraph `DiGraph<BasicBlock, CfgEdge>` with dense block ids: block `Bn`
//! lives at node index `n` (blocks are never removed).

use super::block::{BasicBlock, BlockKind, MethodInfo};
use super::instruction::Instruction;
use super::location::{BlockId, Location};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

/// Edge classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    FallThrough,
    Goto,
    BranchTaken,
    /// Return / throw into the logical exit
    Return,
    /// Exceptional control flow. `explicit` edges come from `throw` or a
    /// declared handler; implicit ones model runtime exceptions such as NPE.
    Exception { explicit: bool },
}

/// Directed CFG edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CfgEdge {
    pub source: BlockId,
    pub target: BlockId,
    pub kind: EdgeKind,
    /// An implicit exception edge known to be taken at runtime
    pub taken: bool,
}

impl CfgEdge {
    pub fn is_exception(&self) -> bool {
        matches!(self.kind, EdgeKind::Exception { .. })
    }

    pub fn is_implicit_exception(&self) -> bool {
        matches!(self.kind, EdgeKind::Exception { explicit: false })
    }
}

/// Per-method control-flow graph
#[derive(Debug, Clone)]
pub struct ControlFlowGraph {
    pub(crate) method: MethodInfo,
    pub(crate) graph: DiGraph<BasicBlock, CfgEdge>,
    pub(crate) entry: BlockId,
    pub(crate) exit: BlockId,
}

impl ControlFlowGraph {
    pub fn method(&self) -> &MethodInfo {
        &self.method
    }

    pub fn entry(&self) -> BlockId {
        self.entry
    }

    pub fn exit(&self) -> BlockId {
        self.exit
    }

    pub fn block_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn block(&self, id: BlockId) -> Option<&BasicBlock> {
        self.graph.node_weight(NodeIndex::new(id.index()))
    }

    pub fn contains(&self, id: BlockId) -> bool {
        id.index() < self.graph.node_count()
    }

    /// Blocks in id order
    pub fn blocks(&self) -> impl Iterator<Item = &BasicBlock> + '_ {
        self.graph.node_weights()
    }

    pub fn block_ids(&self) -> impl Iterator<Item = BlockId> + '_ {
        (0..self.graph.node_count() as u32).map(BlockId)
    }

    /// Edges entering `id`
    pub fn incoming_edges(&self, id: BlockId) -> impl Iterator<Item = &CfgEdge> + '_ {
        self.graph
            .edges_directed(NodeIndex::new(id.index()), Direction::Incoming)
            .map(|e| e.weight())
    }

    /// Edges leaving `id`
    pub fn outgoing_edges(&self, id: BlockId) -> impl Iterator<Item = &CfgEdge> + '_ {
        self.graph
            .edges_directed(NodeIndex::new(id.index()), Direction::Outgoing)
            .map(|e| e.weight())
    }

    pub fn predecessors(&self, id: BlockId) -> impl Iterator<Item = BlockId> + '_ {
        self.incoming_edges(id).map(|e| e.source)
    }

    pub fn successors(&self, id: BlockId) -> impl Iterator<Item = BlockId> + '_ {
        self.outgoing_edges(id).map(|e| e.target)
    }

    pub fn instruction_at(&self, location: Location) -> Option<&Instruction> {
        self.block(location.block)?.instructions.get(location.index)
    }

    pub fn instruction_count(&self) -> usize {
        self.blocks().map(BasicBlock::len).sum()
    }

    /// Every instruction location in block-id order
    pub fn locations(&self) -> impl Iterator<Item = (Location, &Instruction)> + '_ {
        self.blocks().flat_map(|b| b.located())
    }

    /// Null-check blocks with the location each one guards
    pub fn null_checks(&self) -> impl Iterator<Item = (BlockId, Location)> + '_ {
        self.blocks().filter_map(|b| match b.kind {
            BlockKind::NullCheck { thrower } => Some((b.id, thrower)),
            _ => None,
        })
    }

    /// Underlying petgraph graph (read-only)
    pub fn graph(&self) -> &DiGraph<BasicBlock, CfgEdge> {
        &self.graph
    }
}
