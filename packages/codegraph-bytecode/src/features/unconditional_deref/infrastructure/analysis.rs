/*
 * Backward Unconditional Parameter Dereference
 *
 * A parameter is unconditionally dereferenced when every normal path from
 * a program point to the method exit dereferences its entry value.
 *
 * - Exit seed: valid, all clear
 * - Meet: intersection (pruned implicit exception edges never contribute)
 * - Transfer: at a dereference guarded by a null-check block, set the bit
 *   of the parameter the checked reference traces back to
 *
 * The reference → parameter mapping comes from a solved value-numbering
 * dataflow: the value number on the stack before the dereference is looked
 * up in `value_to_parameter`.
 */

use crate::features::dataflow::domain::Direction;
use crate::features::dataflow::infrastructure::DataflowError;
use crate::features::dataflow::ports::DataflowAnalysis;
use crate::features::flow_graph::domain::{
    BasicBlock, CfgEdge, ControlFlowGraph, Instruction, Location,
};
use crate::features::unconditional_deref::domain::UnconditionalDerefSet;
use crate::features::value_numbering::infrastructure::ValueNumberDataflow;
use rustc_hash::FxHashMap;

/// Guarded dereference sites and the parameter each one dereferences
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThrowerMap {
    params: FxHashMap<Location, usize>,
}

impl ThrowerMap {
    /// Resolve every null-check thrower of `cfg` through value numbering
    pub fn resolve(
        cfg: &ControlFlowGraph,
        value_numbers: &mut ValueNumberDataflow<'_>,
    ) -> Result<Self, DataflowError> {
        let mut params = FxHashMap::default();

        for (check, thrower) in cfg.null_checks() {
            if !cfg.predecessors(thrower.block).any(|pred| pred == check) {
                tracing::debug!(%check, %thrower, "null check does not guard its thrower");
                continue;
            }
            let Some(depth) = cfg
                .instruction_at(thrower)
                .and_then(Instruction::dereferenced_operand)
            else {
                continue;
            };

            let frame = value_numbers.fact_before(thrower)?;
            let Some(reference) = frame.stack_value(depth) else {
                continue;
            };
            if let Some(param) = value_numbers.analysis().parameter_of(reference) {
                params.insert(thrower, param);
            }
        }

        Ok(Self { params })
    }

    pub fn from_sites(sites: impl IntoIterator<Item = (Location, usize)>) -> Self {
        Self {
            params: sites.into_iter().collect(),
        }
    }

    pub fn param_at(&self, location: Location) -> Option<usize> {
        self.params.get(&location).copied()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

pub struct UnconditionalDerefAnalysis {
    param_count: usize,
    throwers: ThrowerMap,
}

impl UnconditionalDerefAnalysis {
    pub fn new(param_count: usize, throwers: ThrowerMap) -> Self {
        Self {
            param_count,
            throwers,
        }
    }

    pub fn throwers(&self) -> &ThrowerMap {
        &self.throwers
    }
}

impl DataflowAnalysis for UnconditionalDerefAnalysis {
    type Fact = UnconditionalDerefSet;

    fn direction(&self) -> Direction {
        Direction::Backward
    }

    fn create_fact(&self) -> UnconditionalDerefSet {
        UnconditionalDerefSet::top()
    }

    fn init_entry_fact(&self, fact: &mut UnconditionalDerefSet) {
        *fact = UnconditionalDerefSet::empty(self.param_count);
    }

    fn make_top(&self, fact: &mut UnconditionalDerefSet) {
        fact.set_top();
    }

    fn is_top(&self, fact: &UnconditionalDerefSet) -> bool {
        fact.is_top()
    }

    fn is_bottom(&self, fact: &UnconditionalDerefSet) -> bool {
        fact.is_bottom()
    }

    fn same(&self, a: &UnconditionalDerefSet, b: &UnconditionalDerefSet) -> bool {
        a == b
    }

    fn meet_into(
        &mut self,
        incoming: &UnconditionalDerefSet,
        _edge: &CfgEdge,
        acc: &mut UnconditionalDerefSet,
    ) {
        acc.meet_with(incoming);
    }

    fn transfer_instruction(
        &mut self,
        location: Location,
        _instruction: &Instruction,
        _block: &BasicBlock,
        fact: &mut UnconditionalDerefSet,
    ) {
        if !fact.is_valid() {
            return;
        }
        if let Some(param) = self.throwers.param_at(location) {
            fact.set_dereferenced(param);
        }
    }
}
