/*
 * Forward Value Numbering
 *
 * Assigns every stack / local slot a value number such that equal numbers
 * denote equal runtime values, and performs redundant-load elimination:
 *
 * - Entry: each local slot gets a fresh number (`this` in slot 0 for
 *   instance methods, then the parameters); parameter numbers feed
 *   `value_to_parameter`
 * - Loads: reuse an available `(reference, field)` load, otherwise mint via
 *   the cache keyed by `(location, inputs)` and make the result available
 * - Stores: kill every available load of the field, then make the stored
 *   value available (forward substitution)
 * - Calls: kill all available loads (`kill_loads_on_invoke`)
 * - Merge: a slot whose incoming values disagree gets one stable merged
 *   number per `(block, slot)`; available loads meet by intersection
 *
 * Only profitable fields (reference-typed, loaded at more than one site)
 * are tracked when `profitable_fields_only` is set.
 */

use super::cache::ValueNumberCache;
use crate::config::{DataflowConfig, ValueNumberConfig};
use crate::features::dataflow::domain::Direction;
use crate::features::dataflow::infrastructure::{Dataflow, DataflowError};
use crate::features::dataflow::ports::DataflowAnalysis;
use crate::features::flow_graph::domain::{
    BasicBlock, BlockId, CfgEdge, ControlFlowGraph, FieldRef, Instruction, Location, MethodInfo,
};
use crate::features::value_numbering::domain::{
    AvailableLoad, LoadedFieldSet, ValueNumber, ValueNumberFactory, ValueNumberFrame,
};
use rustc_hash::FxHashMap;

/// Solved value-numbering dataflow for one method
pub type ValueNumberDataflow<'a> = Dataflow<'a, ValueNumberAnalysis>;

/// Run value numbering over `cfg` to the fixed point
pub fn run_value_numbering<'a>(
    cfg: &'a ControlFlowGraph,
    dataflow: DataflowConfig,
    config: ValueNumberConfig,
) -> Result<ValueNumberDataflow<'a>, DataflowError> {
    let analysis = ValueNumberAnalysis::new(cfg, config);
    Dataflow::run(cfg, analysis, dataflow)
}

pub struct ValueNumberAnalysis {
    method: MethodInfo,
    config: ValueNumberConfig,
    factory: ValueNumberFactory,
    cache: ValueNumberCache,
    loaded_fields: LoadedFieldSet,
    entry_locals: Vec<ValueNumber>,
    this_value: Option<ValueNumber>,
    value_to_parameter: FxHashMap<ValueNumber, usize>,
    merged_values: FxHashMap<(BlockId, usize), ValueNumber>,
}

impl ValueNumberAnalysis {
    pub fn new(cfg: &ControlFlowGraph, config: ValueNumberConfig) -> Self {
        let method = cfg.method().clone();
        let mut factory = ValueNumberFactory::new();
        let entry_locals: Vec<ValueNumber> =
            (0..method.max_locals).map(|_| factory.create()).collect();

        let this_value = if method.is_static {
            None
        } else {
            entry_locals.first().copied()
        };
        let value_to_parameter = (0..method.param_count)
            .filter_map(|param| {
                entry_locals
                    .get(method.param_slot(param))
                    .map(|vn| (*vn, param))
            })
            .collect();

        let capacity = config.capacity_for(cfg.instruction_count());
        Self {
            method,
            config,
            factory,
            cache: ValueNumberCache::new(capacity),
            loaded_fields: LoadedFieldSet::from_cfg(cfg),
            entry_locals,
            this_value,
            value_to_parameter,
            merged_values: FxHashMap::default(),
        }
    }

    pub fn method(&self) -> &MethodInfo {
        &self.method
    }

    /// Value of `this` at entry (instance methods)
    pub fn this_value(&self) -> Option<ValueNumber> {
        self.this_value
    }

    /// Entry value of formal parameter `param` (excluding `this`)
    pub fn parameter_value(&self, param: usize) -> Option<ValueNumber> {
        if param >= self.method.param_count {
            return None;
        }
        self.entry_locals.get(self.method.param_slot(param)).copied()
    }

    pub fn value_to_parameter(&self) -> &FxHashMap<ValueNumber, usize> {
        &self.value_to_parameter
    }

    /// Formal parameter whose entry value is `value`
    pub fn parameter_of(&self, value: ValueNumber) -> Option<usize> {
        self.value_to_parameter.get(&value).copied()
    }

    pub fn loaded_fields(&self) -> &LoadedFieldSet {
        &self.loaded_fields
    }

    pub fn cache(&self) -> &ValueNumberCache {
        &self.cache
    }

    /// Value numbers minted so far
    pub fn value_count(&self) -> usize {
        self.factory.count()
    }

    /// Loads of `field` take part in redundant-load elimination
    pub fn is_tracked(&self, field: &FieldRef) -> bool {
        self.config.redundant_load_elimination
            && (!self.config.profitable_fields_only || self.loaded_fields.is_profitable(field))
    }

    fn push_outputs(
        &mut self,
        location: Location,
        inputs: &[ValueNumber],
        count: usize,
        frame: &mut ValueNumberFrame,
    ) {
        if count == 0 {
            return;
        }
        for vn in self
            .cache
            .outputs(location, inputs, count, &mut self.factory)
        {
            frame.push(vn);
        }
    }

    fn load(
        &mut self,
        location: Location,
        load: AvailableLoad,
        inputs: &[ValueNumber],
        frame: &mut ValueNumberFrame,
    ) {
        let tracked = self.is_tracked(&load.field);
        if tracked {
            if let Some(value) = frame.available_load(&load) {
                tracing::trace!(%location, field = %load.field, %value, "redundant load");
                frame.push(value);
                return;
            }
        }

        let outputs = self.cache.outputs(location, inputs, 1, &mut self.factory);
        if let Some(&value) = outputs.first() {
            if tracked {
                frame.make_available(load, value);
            }
            frame.push(value);
        }
    }

    fn store(&self, load: AvailableLoad, value: ValueNumber, frame: &mut ValueNumberFrame) {
        frame.kill_loads_of(&load.field);
        if self.is_tracked(&load.field) {
            frame.make_available(load, value);
        }
    }

    fn malformed(&self, location: Location, reason: &str, frame: &mut ValueNumberFrame) {
        tracing::warn!(method = %self.method.name, %location, reason, "malformed frame");
        frame.set_bottom();
    }
}

impl DataflowAnalysis for ValueNumberAnalysis {
    type Fact = ValueNumberFrame;

    fn direction(&self) -> Direction {
        Direction::Forward
    }

    fn create_fact(&self) -> ValueNumberFrame {
        ValueNumberFrame::top()
    }

    fn init_entry_fact(&self, fact: &mut ValueNumberFrame) {
        *fact = ValueNumberFrame::with_locals(self.entry_locals.clone());
    }

    fn make_top(&self, fact: &mut ValueNumberFrame) {
        fact.set_top();
    }

    fn is_top(&self, fact: &ValueNumberFrame) -> bool {
        fact.is_top()
    }

    fn is_bottom(&self, fact: &ValueNumberFrame) -> bool {
        fact.is_bottom()
    }

    fn same(&self, a: &ValueNumberFrame, b: &ValueNumberFrame) -> bool {
        a == b
    }

    fn meet_into(&mut self, incoming: &ValueNumberFrame, edge: &CfgEdge, acc: &mut ValueNumberFrame) {
        if incoming.is_top() || acc.is_bottom() {
            return;
        }
        if incoming.is_bottom() {
            acc.set_bottom();
            return;
        }
        if acc.is_top() {
            acc.clone_from(incoming);
            return;
        }

        if acc.locals.len() != incoming.locals.len() || acc.stack_depth() != incoming.stack_depth()
        {
            tracing::warn!(
                method = %self.method.name,
                block = %edge.target,
                "frame shapes differ at merge"
            );
            acc.set_bottom();
            return;
        }

        for slot in 0..acc.slot_count() {
            if acc.slot(slot) == incoming.slot(slot) {
                continue;
            }
            let factory = &mut self.factory;
            let merged = *self
                .merged_values
                .entry((edge.target, slot))
                .or_insert_with(|| factory.create());
            acc.set_slot(slot, merged);
        }
        acc.intersect_loads(incoming);
    }

    fn transfer_instruction(
        &mut self,
        location: Location,
        instruction: &Instruction,
        _block: &BasicBlock,
        fact: &mut ValueNumberFrame,
    ) {
        if !fact.is_valid() {
            return;
        }
        let Some(inputs) = fact.pop_operands(instruction.stack_pops()) else {
            self.malformed(location, "operand stack underflow", fact);
            return;
        };

        match instruction {
            Instruction::LoadLocal(slot) => match fact.local(usize::from(*slot)) {
                Some(value) => fact.push(value),
                None => self.malformed(location, "local slot out of range", fact),
            },
            Instruction::StoreLocal(slot) => {
                let slot = usize::from(*slot);
                if slot < fact.locals.len() {
                    fact.locals[slot] = inputs[0];
                } else {
                    self.malformed(location, "local slot out of range", fact);
                }
            }
            Instruction::Dup => {
                fact.push(inputs[0]);
                fact.push(inputs[0]);
            }
            Instruction::GetField(field) => {
                let load = AvailableLoad::instance(inputs[0], field.clone());
                self.load(location, load, &inputs, fact);
            }
            Instruction::GetStatic(field) => {
                let load = AvailableLoad::static_field(field.clone());
                self.load(location, load, &inputs, fact);
            }
            Instruction::PutField(field) => {
                let load = AvailableLoad::instance(inputs[0], field.clone());
                self.store(load, inputs[1], fact);
            }
            Instruction::PutStatic(field) => {
                let load = AvailableLoad::static_field(field.clone());
                self.store(load, inputs[0], fact);
            }
            Instruction::Invoke(_) => {
                if self.config.kill_loads_on_invoke {
                    fact.kill_all_loads();
                }
                self.push_outputs(location, &inputs, instruction.stack_pushes(), fact);
            }
            _ => self.push_outputs(location, &inputs, instruction.stack_pushes(), fact),
        }
    }
}
