/*
 * Execution Plan Builder
 *
 * Schedules detectors from every registered plugin into ordered passes.
 *
 * Algorithm:
 * 1. Flatten registries; detectors are ranked by the secondary key
 *    (plugin id, declaration order). Duplicate ids are fatal.
 * 2. Resolve every selector; a selector matching nothing is fatal.
 * 3. Inter-pass: constraint graph over detectors named by inter-pass
 *    constraints; peel zero-in-degree layers, one pass per layer.
 * 4. Intra-pass (each pass in order): constraints selecting any member
 *    pull unassigned detectors they select into the pass; cycle check;
 *    topological sort with secondary-key tie-break; unconstrained members
 *    appended in secondary-key order.
 * 5. Detectors never assigned join the final pass (created when no pass
 *    exists) before that pass is sorted.
 */

use super::constraint_graph::ConstraintGraph;
use super::errors::OrderingConstraintError;
use crate::config::SchedulerConfig;
use crate::features::scheduler::domain::{
    AnalysisPass, DetectorFactory, DetectorRegistry, DetectorSelector, ExecutionPlan,
    OrderingConstraint,
};
use rustc_hash::{FxHashMap, FxHashSet};

/// Constraint with both selectors resolved to detector ranks
#[derive(Debug, Clone)]
struct ResolvedConstraint {
    earlier: Vec<usize>,
    later: Vec<usize>,
}

impl ResolvedConstraint {
    fn selects_any(&self, members: &FxHashSet<usize>) -> bool {
        self.earlier
            .iter()
            .chain(&self.later)
            .any(|d| members.contains(d))
    }

    fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.earlier.iter().chain(&self.later).copied()
    }
}

/// Collects plugin registries and builds the `ExecutionPlan`
#[derive(Debug, Clone, Default)]
pub struct ExecutionPlanBuilder {
    registries: Vec<DetectorRegistry>,
    config: SchedulerConfig,
}

impl ExecutionPlanBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SchedulerConfig) -> Self {
        Self {
            registries: Vec::new(),
            config,
        }
    }

    /// Builder: Register a plugin
    pub fn register(mut self, registry: DetectorRegistry) -> Self {
        self.registries.push(registry);
        self
    }

    pub fn add_registry(&mut self, registry: DetectorRegistry) {
        self.registries.push(registry);
    }

    pub fn registry_count(&self) -> usize {
        self.registries.len()
    }

    /// Build the plan; no partial plan is returned on error
    pub fn build(&self) -> Result<ExecutionPlan, OrderingConstraintError> {
        let detectors = self.collect_detectors()?;
        let inter = self.resolve_all(&detectors, |r| &r.inter_pass)?;
        let intra = self.resolve_all(&detectors, |r| &r.intra_pass)?;

        // Phase 1: inter-pass layering
        let mut inter_graph = ConstraintGraph::new();
        for constraint in &inter {
            inter_graph.add_constraint(&constraint.earlier, &constraint.later);
        }
        let mut passes = inter_graph
            .peel_layers()
            .map_err(|stuck| OrderingConstraintError::InterPassCycle {
                detectors: ids(&detectors, &stuck),
            })?;

        let mut assigned = vec![false; detectors.len()];
        for rank in passes.iter().flatten() {
            assigned[*rank] = true;
        }
        if passes.is_empty() {
            passes.push(Vec::new());
        }

        // Phase 2: intra-pass ordering
        let last = passes.len() - 1;
        let mut sorted = Vec::with_capacity(passes.len());
        for (index, mut members) in passes.into_iter().enumerate() {
            if index == last {
                for (rank, done) in assigned.iter_mut().enumerate() {
                    if !*done {
                        *done = true;
                        members.push(rank);
                    }
                }
            }
            let order = sort_pass(index, members, &intra, &mut assigned, &detectors)?;
            sorted.push(AnalysisPass::new(ids(&detectors, &order)));
        }

        let plan = ExecutionPlan::new(sorted);
        tracing::info!(
            plugins = self.registries.len(),
            detectors = plan.detector_count(),
            passes = plan.pass_count(),
            "execution plan built"
        );
        if self.config.log_passes {
            for (index, pass) in plan.passes().iter().enumerate() {
                tracing::info!(pass = index, detectors = ?pass.detectors(), "analysis pass");
            }
        }
        Ok(plan)
    }

    /// Every registered detector in secondary-key order
    fn collect_detectors(&self) -> Result<Vec<DetectorFactory>, OrderingConstraintError> {
        let mut owner: FxHashMap<&str, &str> = FxHashMap::default();
        let mut plugins: FxHashSet<&str> = FxHashSet::default();
        let mut detectors = Vec::new();

        for registry in &self.registries {
            // The secondary key is (plugin, declaration order); a repeated plugin would tie on it
            if !plugins.insert(&registry.plugin_id) {
                return Err(OrderingConstraintError::DuplicatePlugin {
                    plugin: registry.plugin_id.clone(),
                });
            }
            for (order, declaration) in registry.detectors.iter().enumerate() {
                if let Some(first) = owner.insert(&declaration.id, &registry.plugin_id) {
                    return Err(OrderingConstraintError::DuplicateDetector {
                        id: declaration.id.clone(),
                        first_plugin: first.to_string(),
                        second_plugin: registry.plugin_id.clone(),
                    });
                }
                detectors.push(DetectorFactory::from_declaration(
                    &registry.plugin_id,
                    order,
                    declaration,
                ));
            }
        }

        detectors.sort_by(DetectorFactory::cmp_secondary);
        Ok(detectors)
    }

    fn resolve_all<F>(
        &self,
        detectors: &[DetectorFactory],
        constraints_of: F,
    ) -> Result<Vec<ResolvedConstraint>, OrderingConstraintError>
    where
        F: Fn(&DetectorRegistry) -> &Vec<OrderingConstraint>,
    {
        let mut resolved = Vec::new();
        for registry in &self.registries {
            for constraint in constraints_of(registry) {
                let earlier = select(detectors, &constraint.earlier);
                let later = select(detectors, &constraint.later);
                if earlier.is_empty() || later.is_empty() {
                    return Err(OrderingConstraintError::EmptySelector {
                        plugin: registry.plugin_id.clone(),
                        constraint: constraint.to_string(),
                    });
                }
                resolved.push(ResolvedConstraint { earlier, later });
            }
        }
        Ok(resolved)
    }
}

fn select(detectors: &[DetectorFactory], selector: &DetectorSelector) -> Vec<usize> {
    detectors
        .iter()
        .enumerate()
        .filter(|(_, d)| selector.matches(d))
        .map(|(rank, _)| rank)
        .collect()
}

fn ids(detectors: &[DetectorFactory], ranks: &[usize]) -> Vec<String> {
    ranks.iter().map(|&r| detectors[r].id.clone()).collect()
}

/// Order one pass by the intra-pass constraints relevant to it
fn sort_pass(
    index: usize,
    mut members: Vec<usize>,
    intra: &[ResolvedConstraint],
    assigned: &mut [bool],
    detectors: &[DetectorFactory],
) -> Result<Vec<usize>, OrderingConstraintError> {
    let mut member_set: FxHashSet<usize> = members.iter().copied().collect();

    // pull until no relevant constraint selects an unassigned detector
    loop {
        let mut pulled = Vec::new();
        for constraint in intra.iter().filter(|c| c.selects_any(&member_set)) {
            for rank in constraint.selected() {
                if !assigned[rank] {
                    assigned[rank] = true;
                    pulled.push(rank);
                }
            }
        }
        if pulled.is_empty() {
            break;
        }
        member_set.extend(pulled.iter().copied());
        members.extend(pulled);
    }

    let mut graph = ConstraintGraph::new();
    for constraint in intra {
        let earlier: Vec<usize> = constraint
            .earlier
            .iter()
            .copied()
            .filter(|d| member_set.contains(d))
            .collect();
        let later: Vec<usize> = constraint
            .later
            .iter()
            .copied()
            .filter(|d| member_set.contains(d))
            .collect();
        if !earlier.is_empty() && !later.is_empty() {
            graph.add_constraint(&earlier, &later);
        }
    }

    if graph.has_cycle() {
        let stuck = graph
            .topological_order()
            .err()
            .unwrap_or_else(|| graph.detectors());
        return Err(OrderingConstraintError::IntraPassCycle {
            pass: index,
            detectors: ids(detectors, &stuck),
        });
    }
    let mut order = graph
        .topological_order()
        .map_err(|stuck| OrderingConstraintError::IntraPassCycle {
            pass: index,
            detectors: ids(detectors, &stuck),
        })?;

    let mut unconstrained: Vec<usize> = members
        .into_iter()
        .filter(|d| !graph.contains(*d))
        .collect();
    unconstrained.sort_unstable();
    order.extend(unconstrained);
    Ok(order)
}
