//! CFG Builder
//!
//! Assembles a [`ControlFlowGraph`] block by block. The logical entry (`B0`)
//! and exit (`B1`) blocks are created up front; `build()` validates edges and
//! null-check targets.
//!
//! ```rust,ignore
//! let mut b = CfgBuilder::new(MethodInfo::new("f", true, 1));
//! let body = b.block(vec![Instruction::LoadLocal(0), Instruction::Return { has_value: true }]);
//! b.fall_through(b.entry(), body);
//! b.return_edge(body);
//! let cfg = b.build()?;
//! ```

use super::errors::FlowGraphError;
use crate::features::flow_graph::domain::{
    BasicBlock, BlockId, BlockKind, CfgEdge, ControlFlowGraph, EdgeKind, Instruction, Location,
    MethodInfo,
};
use petgraph::graph::{DiGraph, NodeIndex};

/// Incremental CFG builder
#[derive(Debug, Clone)]
pub struct CfgBuilder {
    method: MethodInfo,
    blocks: Vec<BasicBlock>,
    edges: Vec<CfgEdge>,
}

impl CfgBuilder {
    pub fn new(method: MethodInfo) -> Self {
        let blocks = vec![
            BasicBlock::new(BlockId(0), BlockKind::Entry, Vec::new()),
            BasicBlock::new(BlockId(1), BlockKind::Exit, Vec::new()),
        ];
        Self {
            method,
            blocks,
            edges: Vec::new(),
        }
    }

    pub fn entry(&self) -> BlockId {
        BlockId(0)
    }

    pub fn exit(&self) -> BlockId {
        BlockId(1)
    }

    /// Next block id `block` / `null_check` will hand out
    pub fn next_id(&self) -> BlockId {
        BlockId(self.blocks.len() as u32)
    }

    /// Add a normal block
    pub fn block(&mut self, instructions: Vec<Instruction>) -> BlockId {
        self.push(BlockKind::Normal, instructions)
    }

    /// Add an empty null-check block guarding the dereference at `thrower`
    pub fn null_check(&mut self, thrower: Location) -> BlockId {
        self.push(BlockKind::NullCheck { thrower }, Vec::new())
    }

    fn push(&mut self, kind: BlockKind, instructions: Vec<Instruction>) -> BlockId {
        let id = self.next_id();
        self.blocks.push(BasicBlock::new(id, kind, instructions));
        id
    }

    /// Add an edge
    pub fn edge(&mut self, source: BlockId, target: BlockId, kind: EdgeKind) -> &mut Self {
        self.edges.push(CfgEdge {
            source,
            target,
            kind,
            taken: false,
        });
        self
    }

    pub fn fall_through(&mut self, source: BlockId, target: BlockId) -> &mut Self {
        self.edge(source, target, EdgeKind::FallThrough)
    }

    pub fn goto(&mut self, source: BlockId, target: BlockId) -> &mut Self {
        self.edge(source, target, EdgeKind::Goto)
    }

    pub fn branch(&mut self, source: BlockId, target: BlockId) -> &mut Self {
        self.edge(source, target, EdgeKind::BranchTaken)
    }

    /// Return / throw edge into the logical exit
    pub fn return_edge(&mut self, source: BlockId) -> &mut Self {
        let exit = self.exit();
        self.edge(source, exit, EdgeKind::Return)
    }

    /// Runtime exception edge (pruned by default during dataflow)
    pub fn implicit_exception(&mut self, source: BlockId, target: BlockId) -> &mut Self {
        self.edge(source, target, EdgeKind::Exception { explicit: false })
    }

    /// Runtime exception edge known to be taken
    pub fn taken_exception(&mut self, source: BlockId, target: BlockId) -> &mut Self {
        self.edges.push(CfgEdge {
            source,
            target,
            kind: EdgeKind::Exception { explicit: false },
            taken: true,
        });
        self
    }

    /// Exception edge from `throw` or a declared handler
    pub fn explicit_exception(&mut self, source: BlockId, target: BlockId) -> &mut Self {
        self.edge(source, target, EdgeKind::Exception { explicit: true })
    }

    /// Validate and freeze
    pub fn build(self) -> Result<ControlFlowGraph, FlowGraphError> {
        let block_count = self.blocks.len();
        let known = |id: BlockId| id.index() < block_count;

        for block in &self.blocks {
            match block.kind {
                BlockKind::Entry | BlockKind::Exit if !block.is_empty() => {
                    return Err(FlowGraphError::InstructionsInSyntheticBlock(block.id));
                }
                BlockKind::NullCheck { thrower } => {
                    let instruction = self
                        .blocks
                        .get(thrower.block.index())
                        .and_then(|b| b.instructions.get(thrower.index))
                        .ok_or(FlowGraphError::ThrowerOutOfRange {
                            check: block.id,
                            thrower,
                        })?;
                    if instruction.dereferenced_operand().is_none() {
                        return Err(FlowGraphError::ThrowerNotDereference {
                            check: block.id,
                            thrower,
                        });
                    }
                }
                _ => {}
            }
        }

        let mut graph = DiGraph::with_capacity(block_count, self.edges.len());
        for block in self.blocks {
            graph.add_node(block);
        }
        for edge in self.edges {
            for id in [edge.source, edge.target] {
                if !known(id) {
                    return Err(FlowGraphError::UnknownBlock(id));
                }
            }
            graph.update_edge(
                NodeIndex::new(edge.source.index()),
                NodeIndex::new(edge.target.index()),
                edge,
            );
        }

        Ok(ControlFlowGraph {
            method: self.method,
            graph,
            entry: BlockId(0),
            exit: BlockId(1),
        })
    }
}
