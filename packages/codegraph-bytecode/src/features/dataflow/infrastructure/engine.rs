/*
 * Generic Worklist Dataflow Engine
 *
 * Kildall-style fixed point over a per-method CFG, instantiated per analysis.
 *
 * Algorithm:
 * 1. Order reachable blocks by reverse postorder (of the reversed CFG for
 *    backward analyses); the worklist is keyed by position in that order
 * 2. Pop the lowest position:
 *    a. start fact = top (logical start block: init_entry_fact), then meet
 *       the result facts across every feasible upstream edge
 *    b. top / bottom start: copy to result (dead code is not transferred);
 *       otherwise apply transfer_block
 *    c. result changed (per `same`): store it and enqueue downstream blocks
 * 3. Stop when the worklist is empty, or fail once block visits exceed
 *    max_iterations × block_count
 *
 * Blocks unreachable in the analysis direction keep top facts.
 *
 * Results are kept per block; per-instruction facts are recomputed on demand
 * by replaying transfer_instruction from the block's start fact.
 */

use super::errors::DataflowError;
use crate::config::DataflowConfig;
use crate::features::dataflow::domain::Direction;
use crate::features::dataflow::ports::DataflowAnalysis;
use crate::features::flow_graph::domain::{BlockId, CfgEdge, ControlFlowGraph, Location};
use crate::features::flow_graph::infrastructure::{reverse_postorder, reverse_postorder_backward};
use std::collections::BTreeSet;

/// Convergence statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DataflowStats {
    /// Blocks in analysis order (reachable in the analysis direction)
    pub ordered_blocks: usize,
    /// Total block visits until the fixed point
    pub block_visits: usize,
    /// Block visits whose result changed
    pub changed_visits: usize,
}

/// Solver state and results for one analysis over one CFG
pub struct Dataflow<'a, A: DataflowAnalysis> {
    cfg: &'a ControlFlowGraph,
    analysis: A,
    config: DataflowConfig,
    start_facts: Vec<A::Fact>,
    result_facts: Vec<A::Fact>,
    stats: DataflowStats,
}

impl<'a, A: DataflowAnalysis> Dataflow<'a, A> {
    /// Prepare the solver; every block starts with top start and initial result facts
    pub fn new(cfg: &'a ControlFlowGraph, analysis: A, config: DataflowConfig) -> Self {
        let block_count = cfg.block_count();
        let mut start_facts = Vec::with_capacity(block_count);
        let mut result_facts = Vec::with_capacity(block_count);
        for _ in 0..block_count {
            let mut start = analysis.create_fact();
            analysis.make_top(&mut start);
            start_facts.push(start);

            let mut result = analysis.create_fact();
            analysis.init_result_fact(&mut result);
            result_facts.push(result);
        }

        Self {
            cfg,
            analysis,
            config,
            start_facts,
            result_facts,
            stats: DataflowStats::default(),
        }
    }

    /// Build and solve in one step
    pub fn run(
        cfg: &'a ControlFlowGraph,
        analysis: A,
        config: DataflowConfig,
    ) -> Result<Self, DataflowError> {
        let mut dataflow = Self::new(cfg, analysis, config);
        dataflow.execute()?;
        Ok(dataflow)
    }

    /// Iterate to the fixed point
    pub fn execute(&mut self) -> Result<(), DataflowError> {
        let direction = self.analysis.direction();
        let order = match direction {
            Direction::Forward => reverse_postorder(self.cfg),
            Direction::Backward => reverse_postorder_backward(self.cfg),
        };
        let logical_start = match direction {
            Direction::Forward => self.cfg.entry(),
            Direction::Backward => self.cfg.exit(),
        };

        let mut position = vec![usize::MAX; self.cfg.block_count()];
        for (pos, block) in order.iter().enumerate() {
            position[block.index()] = pos;
        }

        let limit = self
            .config
            .max_iterations
            .saturating_mul(order.len().max(1));
        let mut worklist: BTreeSet<usize> = (0..order.len()).collect();
        let mut stats = DataflowStats {
            ordered_blocks: order.len(),
            ..DataflowStats::default()
        };

        while let Some(pos) = worklist.pop_first() {
            stats.block_visits += 1;
            if stats.block_visits > limit {
                tracing::warn!(
                    method = %self.cfg.method().name,
                    limit,
                    "dataflow iteration cap reached"
                );
                self.stats = stats;
                return Err(DataflowError::TooManyIterations {
                    method: self.cfg.method().name.clone(),
                    limit,
                });
            }

            let block_id = order[pos];
            let start = self.compute_start_fact(block_id, block_id == logical_start, direction);

            let mut result = self.analysis.create_fact();
            if self.analysis.is_top(&start) || self.analysis.is_bottom(&start) {
                self.analysis.copy(&start, &mut result);
            } else if let Some(block) = self.cfg.block(block_id) {
                self.analysis.transfer_block(block, &start, &mut result);
            }
            self.start_facts[block_id.index()] = start;

            if self
                .analysis
                .same(&result, &self.result_facts[block_id.index()])
            {
                continue;
            }
            stats.changed_visits += 1;
            self.result_facts[block_id.index()] = result;

            for next in self.downstream(block_id, direction) {
                let next_pos = position[next.index()];
                if next_pos != usize::MAX {
                    worklist.insert(next_pos);
                }
            }
        }

        tracing::debug!(
            method = %self.cfg.method().name,
            ?direction,
            blocks = stats.ordered_blocks,
            visits = stats.block_visits,
            "dataflow converged"
        );
        self.stats = stats;
        Ok(())
    }

    /// Meet of all feasible upstream results, seeded with top or the entry fact
    fn compute_start_fact(
        &mut self,
        block_id: BlockId,
        is_logical_start: bool,
        direction: Direction,
    ) -> A::Fact {
        let mut start = self.analysis.create_fact();
        if is_logical_start {
            self.analysis.init_entry_fact(&mut start);
        } else {
            self.analysis.make_top(&mut start);
        }

        let upstream: Vec<CfgEdge> = match direction {
            Direction::Forward => self.cfg.incoming_edges(block_id).copied().collect(),
            Direction::Backward => self.cfg.outgoing_edges(block_id).copied().collect(),
        };
        for edge in upstream.iter().rev() {
            if !self.is_feasible(edge) {
                continue;
            }
            let neighbour = match direction {
                Direction::Forward => edge.source,
                Direction::Backward => edge.target,
            };
            self.analysis
                .meet_into(&self.result_facts[neighbour.index()], edge, &mut start);
        }
        start
    }

    fn downstream(&self, block_id: BlockId, direction: Direction) -> Vec<BlockId> {
        match direction {
            Direction::Forward => self.cfg.successors(block_id).collect(),
            Direction::Backward => self.cfg.predecessors(block_id).collect(),
        }
    }

    fn is_feasible(&self, edge: &CfgEdge) -> bool {
        !self.config.prune_implicit_exceptions || self.analysis.is_edge_feasible(edge)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Results
    // ═══════════════════════════════════════════════════════════════════════

    /// Fact on entry to the block in analysis direction
    pub fn start_fact(&self, block: BlockId) -> Result<&A::Fact, DataflowError> {
        self.start_facts
            .get(block.index())
            .ok_or(DataflowError::UnknownBlock(block))
    }

    /// Fact after transferring the block in analysis direction
    pub fn result_fact(&self, block: BlockId) -> Result<&A::Fact, DataflowError> {
        self.result_facts
            .get(block.index())
            .ok_or(DataflowError::UnknownBlock(block))
    }

    /// Fact at method entry in program order
    pub fn entry_fact(&self) -> &A::Fact {
        let entry = self.cfg.entry().index();
        match self.analysis.direction() {
            Direction::Forward => &self.start_facts[entry],
            Direction::Backward => &self.result_facts[entry],
        }
    }

    /// Fact immediately before the instruction at `location` in program order
    pub fn fact_before(&mut self, location: Location) -> Result<A::Fact, DataflowError> {
        self.replay(location, location.index)
    }

    /// Fact immediately after the instruction at `location` in program order
    pub fn fact_after(&mut self, location: Location) -> Result<A::Fact, DataflowError> {
        self.replay(location, location.index + 1)
    }

    /// Program-order fact at the boundary before instruction `boundary` of the block
    ///
    /// Forward analyses replay instructions `0..boundary` from the start fact;
    /// backward analyses replay `boundary..len` in reverse.
    fn replay(&mut self, location: Location, boundary: usize) -> Result<A::Fact, DataflowError> {
        let block = self
            .cfg
            .block(location.block)
            .ok_or(DataflowError::UnknownBlock(location.block))?;
        if location.index >= block.len() {
            return Err(DataflowError::LocationOutOfRange(location));
        }

        let start = &self.start_facts[location.block.index()];
        let mut fact = self.analysis.create_fact();
        self.analysis.copy(start, &mut fact);
        if self.analysis.is_top(&fact) || self.analysis.is_bottom(&fact) {
            return Ok(fact);
        }

        match self.analysis.direction() {
            Direction::Forward => {
                for (loc, instruction) in block.located().take(boundary) {
                    self.analysis
                        .transfer_instruction(loc, instruction, block, &mut fact);
                }
            }
            Direction::Backward => {
                for (loc, instruction) in block.located().skip(boundary).rev() {
                    self.analysis
                        .transfer_instruction(loc, instruction, block, &mut fact);
                }
            }
        }
        Ok(fact)
    }

    pub fn stats(&self) -> DataflowStats {
        self.stats
    }

    /// Total block visits of the last `execute`
    pub fn iterations(&self) -> usize {
        self.stats.block_visits
    }

    pub fn cfg(&self) -> &'a ControlFlowGraph {
        self.cfg
    }

    pub fn analysis(&self) -> &A {
        &self.analysis
    }

    pub fn analysis_mut(&mut self) -> &mut A {
        &mut self.analysis
    }

    pub fn into_analysis(self) -> A {
        self.analysis
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::dataflow::domain::FactState;
    use crate::features::flow_graph::domain::{BasicBlock, Instruction, MethodInfo};
    use crate::features::flow_graph::infrastructure::CfgBuilder;

    /// Dominators: fact = set of blocks on every path (None = top)
    struct Dominators;

    impl DataflowAnalysis for Dominators {
        type Fact = Option<BTreeSet<BlockId>>;

        fn direction(&self) -> Direction {
            Direction::Forward
        }
        fn create_fact(&self) -> Self::Fact {
            None
        }
        fn init_entry_fact(&self, fact: &mut Self::Fact) {
            *fact = Some(BTreeSet::new());
        }
        fn make_top(&self, fact: &mut Self::Fact) {
            *fact = None;
        }
        fn is_top(&self, fact: &Self::Fact) -> bool {
            fact.is_none()
        }
        fn is_bottom(&self, _fact: &Self::Fact) -> bool {
            false
        }
        fn same(&self, a: &Self::Fact, b: &Self::Fact) -> bool {
            a == b
        }
        fn meet_into(&mut self, incoming: &Self::Fact, _edge: &CfgEdge, acc: &mut Self::Fact) {
            match (incoming, acc.as_mut()) {
                (None, _) => {}
                (Some(inc), None) => *acc = Some(inc.clone()),
                (Some(inc), Some(a)) => a.retain(|b| inc.contains(b)),
            }
        }
        fn transfer_instruction(
            &mut self,
            _location: Location,
            _instruction: &Instruction,
            _block: &BasicBlock,
            _fact: &mut Self::Fact,
        ) {
        }
        fn transfer_block(&mut self, block: &BasicBlock, start: &Self::Fact, result: &mut Self::Fact) {
            *result = start.clone();
            if let Some(set) = result.as_mut() {
                set.insert(block.id);
            }
        }
    }

    /// Counts instructions seen backward; `same` never settles in a loop
    struct Diverging;

    impl DataflowAnalysis for Diverging {
        type Fact = (FactState, u64);

        fn direction(&self) -> Direction {
            Direction::Backward
        }
        fn create_fact(&self) -> Self::Fact {
            (FactState::Top, 0)
        }
        fn init_entry_fact(&self, fact: &mut Self::Fact) {
            *fact = (FactState::Valid, 0);
        }
        fn make_top(&self, fact: &mut Self::Fact) {
            *fact = (FactState::Top, 0);
        }
        fn is_top(&self, fact: &Self::Fact) -> bool {
            fact.0 == FactState::Top
        }
        fn is_bottom(&self, fact: &Self::Fact) -> bool {
            fact.0 == FactState::Bottom
        }
        fn same(&self, a: &Self::Fact, b: &Self::Fact) -> bool {
            a == b
        }
        fn meet_into(&mut self, incoming: &Self::Fact, _edge: &CfgEdge, acc: &mut Self::Fact) {
            match (incoming.0, acc.0) {
                (FactState::Top, _) => {}
                (_, FactState::Top) => *acc = *incoming,
                (FactState::Bottom, _) | (_, FactState::Bottom) => acc.0 = FactState::Bottom,
                (FactState::Valid, FactState::Valid) => acc.1 = incoming.1.max(acc.1),
            }
        }
        fn transfer_instruction(
            &mut self,
            _location: Location,
            _instruction: &Instruction,
            _block: &BasicBlock,
            fact: &mut Self::Fact,
        ) {
            fact.1 += 1;
        }
    }

    /// entry → a → {b, c} → d → exit; handler reached only by an implicit exception edge
    fn diamond() -> (ControlFlowGraph, [BlockId; 5]) {
        let mut builder = CfgBuilder::new(MethodInfo::new("diamond", true, 0));
        let a = builder.block(vec![Instruction::Branch { pops: 0 }]);
        let b = builder.block(vec![Instruction::Nop]);
        let c = builder.block(vec![Instruction::Nop]);
        let d = builder.block(vec![Instruction::Return { has_value: false }]);
        let handler = builder.block(vec![Instruction::Return { has_value: false }]);
        let entry = builder.entry();
        builder
            .fall_through(entry, a)
            .fall_through(a, b)
            .branch(a, c)
            .goto(b, d)
            .fall_through(c, d)
            .implicit_exception(b, handler)
            .return_edge(d)
            .return_edge(handler);
        (builder.build().unwrap(), [a, b, c, d, handler])
    }

    #[test]
    fn test_forward_dominators() {
        let (cfg, [a, b, _c, d, handler]) = diamond();
        let dataflow = Dataflow::run(&cfg, Dominators, DataflowConfig::default()).unwrap();

        let dom_d = dataflow.result_fact(d).unwrap().clone().unwrap();
        assert_eq!(dom_d, BTreeSet::from([cfg.entry(), a, d]));

        let dom_b = dataflow.start_fact(b).unwrap().clone().unwrap();
        assert_eq!(dom_b, BTreeSet::from([cfg.entry(), a]));

        // only reachable through a pruned implicit exception edge
        assert!(dataflow.start_fact(handler).unwrap().is_none());
        assert!(dataflow.iterations() >= cfg.block_count() - 1);
    }

    #[test]
    fn test_implicit_edges_kept_when_pruning_disabled() {
        let (cfg, [_a, b, _c, _d, handler]) = diamond();
        let config = DataflowConfig::default().prune_implicit_exceptions(false);
        let dataflow = Dataflow::run(&cfg, Dominators, config).unwrap();

        let dom = dataflow.start_fact(handler).unwrap().clone().unwrap();
        assert!(dom.contains(&b));
    }

    #[test]
    fn test_loop_converges() {
        let mut builder = CfgBuilder::new(MethodInfo::new("loop", true, 0));
        let head = builder.block(vec![Instruction::Branch { pops: 0 }]);
        let body = builder.block(vec![Instruction::Nop]);
        let tail = builder.block(vec![Instruction::Return { has_value: false }]);
        let entry = builder.entry();
        builder
            .fall_through(entry, head)
            .fall_through(head, body)
            .goto(body, head)
            .branch(head, tail)
            .return_edge(tail);
        let cfg = builder.build().unwrap();

        let dataflow = Dataflow::run(&cfg, Dominators, DataflowConfig::default()).unwrap();
        let dom_body = dataflow.result_fact(body).unwrap().clone().unwrap();
        assert_eq!(dom_body, BTreeSet::from([cfg.entry(), head, body]));
    }

    #[test]
    fn test_iteration_cap() {
        let mut builder = CfgBuilder::new(MethodInfo::new("spin", true, 0));
        let head = builder.block(vec![Instruction::Nop]);
        let body = builder.block(vec![Instruction::Nop]);
        let entry = builder.entry();
        builder
            .fall_through(entry, head)
            .fall_through(head, body)
            .goto(body, head)
            .return_edge(head);
        let cfg = builder.build().unwrap();

        let config = DataflowConfig::default().max_iterations(3);
        let err = Dataflow::run(&cfg, Diverging, config).err().unwrap();
        assert!(matches!(err, DataflowError::TooManyIterations { .. }));
    }

    #[test]
    fn test_backward_entry_fact_and_replay() {
        let mut builder = CfgBuilder::new(MethodInfo::new("straight", true, 0));
        let body = builder.block(vec![Instruction::Nop, Instruction::Nop, Instruction::Nop]);
        let entry = builder.entry();
        builder.fall_through(entry, body).return_edge(body);
        let cfg = builder.build().unwrap();

        let mut dataflow = Dataflow::run(&cfg, Diverging, DataflowConfig::default()).unwrap();
        assert_eq!(*dataflow.entry_fact(), (FactState::Valid, 3));

        // program order: before instruction 1 two instructions (1 and 2) remain
        let before = dataflow.fact_before(Location::new(body, 1)).unwrap();
        assert_eq!(before.1, 2);
        let after = dataflow.fact_after(Location::new(body, 1)).unwrap();
        assert_eq!(after.1, 1);

        assert_eq!(
            dataflow.fact_before(Location::new(body, 3)).unwrap_err(),
            DataflowError::LocationOutOfRange(Location::new(body, 3))
        );
        assert_eq!(
            dataflow.start_fact(BlockId(42)).unwrap_err(),
            DataflowError::UnknownBlock(BlockId(42))
        );
    }
}
