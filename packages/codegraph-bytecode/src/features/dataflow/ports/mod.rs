//! Dataflow analysis port
//!
//! An analysis supplies its lattice operations and transfer function; the
//! engine (`infrastructure::Dataflow`) owns iteration order and fact storage.
//!
//! # Obligations
//! - `meet_into` must be idempotent, commutative and associative on valid
//!   facts, with top as identity and bottom as absorbing element
//! - the lattice must have finite height and transfer must be monotone,
//!   otherwise the engine hits its iteration cap

use crate::features::dataflow::domain::Direction;
use crate::features::flow_graph::domain::{BasicBlock, CfgEdge, Instruction, Location};
use std::fmt::Debug;

/// A dataflow analysis instantiated by the generic engine
pub trait DataflowAnalysis {
    /// Per-program-point fact
    type Fact: Clone + Debug;

    fn direction(&self) -> Direction;

    /// Fresh fact (content unspecified until initialised)
    fn create_fact(&self) -> Self::Fact;

    /// Fact at the logical start: method entry (forward) or exit (backward)
    fn init_entry_fact(&self, fact: &mut Self::Fact);

    /// Initial result fact of every block
    fn init_result_fact(&self, fact: &mut Self::Fact) {
        self.make_top(fact);
    }

    fn make_top(&self, fact: &mut Self::Fact);

    fn is_top(&self, fact: &Self::Fact) -> bool;

    fn is_bottom(&self, fact: &Self::Fact) -> bool;

    fn copy(&self, source: &Self::Fact, dest: &mut Self::Fact) {
        dest.clone_from(source);
    }

    /// Fact equality used for convergence
    fn same(&self, a: &Self::Fact, b: &Self::Fact) -> bool;

    /// Merge `incoming` (the result fact across `edge`) into `accumulator`
    fn meet_into(&mut self, incoming: &Self::Fact, edge: &CfgEdge, accumulator: &mut Self::Fact);

    /// Apply one instruction to `fact` in place
    fn transfer_instruction(
        &mut self,
        location: Location,
        instruction: &Instruction,
        block: &BasicBlock,
        fact: &mut Self::Fact,
    );

    /// Apply a whole block, visiting instructions in analysis direction
    fn transfer_block(&mut self, block: &BasicBlock, start: &Self::Fact, result: &mut Self::Fact) {
        self.copy(start, result);
        match self.direction() {
            Direction::Forward => {
                for (location, instruction) in block.located() {
                    self.transfer_instruction(location, instruction, block, result);
                }
            }
            Direction::Backward => {
                for (location, instruction) in block.located().rev() {
                    self.transfer_instruction(location, instruction, block, result);
                }
            }
        }
    }

    /// Implicit exception edges are infeasible unless known to be taken
    fn is_edge_feasible(&self, edge: &CfgEdge) -> bool {
        !edge.is_implicit_exception() || edge.taken
    }
}
