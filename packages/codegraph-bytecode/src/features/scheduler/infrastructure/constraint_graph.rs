//! Detector constraint graph
//!
//! Petgraph `DiGraph` over detector ranks (position in secondary-key order),
//! so "smallest rank first" is the deterministic tie-break everywhere.
//! An edge `a → b` means `a` must run before `b`.

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default)]
pub struct ConstraintGraph {
    graph: DiGraph<usize, ()>,
    nodes: FxHashMap<usize, NodeIndex>,
}

impl ConstraintGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_detector(&mut self, rank: usize) -> NodeIndex {
        let graph = &mut self.graph;
        *self
            .nodes
            .entry(rank)
            .or_insert_with(|| graph.add_node(rank))
    }

    /// One edge per `earlier × later` pair
    pub fn add_constraint(&mut self, earlier: &[usize], later: &[usize]) {
        for &e in earlier {
            let from = self.add_detector(e);
            for &l in later {
                let to = self.add_detector(l);
                self.graph.update_edge(from, to, ());
            }
        }
    }

    pub fn contains(&self, rank: usize) -> bool {
        self.nodes.contains_key(&rank)
    }

    /// Detector ranks in ascending order
    pub fn detectors(&self) -> Vec<usize> {
        let mut ranks: Vec<usize> = self.nodes.keys().copied().collect();
        ranks.sort_unstable();
        ranks
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth-first cycle check (self-loops count)
    pub fn has_cycle(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    fn in_degrees(&self) -> FxHashMap<usize, usize> {
        self.nodes
            .iter()
            .map(|(&rank, &node)| {
                let degree = self
                    .graph
                    .neighbors_directed(node, Direction::Incoming)
                    .count();
                (rank, degree)
            })
            .collect()
    }

    fn successors(&self, rank: usize) -> Vec<usize> {
        match self.nodes.get(&rank) {
            Some(&node) => self
                .graph
                .neighbors_directed(node, Direction::Outgoing)
                .map(|n| self.graph[n])
                .collect(),
            None => Vec::new(),
        }
    }

    /// Repeatedly peel every zero-in-degree vertex into a new layer
    ///
    /// `Err` carries the vertices left when no vertex has in-degree zero.
    pub fn peel_layers(&self) -> Result<Vec<Vec<usize>>, Vec<usize>> {
        let mut in_degree = self.in_degrees();
        let mut remaining: BTreeSet<usize> = self.nodes.keys().copied().collect();
        let mut layers = Vec::new();

        while !remaining.is_empty() {
            let layer: Vec<usize> = remaining
                .iter()
                .copied()
                .filter(|rank| in_degree.get(rank).copied().unwrap_or(0) == 0)
                .collect();
            if layer.is_empty() {
                return Err(remaining.into_iter().collect());
            }

            for &rank in &layer {
                remaining.remove(&rank);
                for next in self.successors(rank) {
                    if let Some(d) = in_degree.get_mut(&next) {
                        *d = d.saturating_sub(1);
                    }
                }
            }
            layers.push(layer);
        }
        Ok(layers)
    }

    /// Kahn's algorithm, always emitting the smallest ready rank
    ///
    /// `Err` carries the vertices on or behind a cycle.
    pub fn topological_order(&self) -> Result<Vec<usize>, Vec<usize>> {
        let mut in_degree = self.in_degrees();
        let mut ready: BTreeSet<usize> = in_degree
            .iter()
            .filter(|(_, d)| **d == 0)
            .map(|(&rank, _)| rank)
            .collect();
        let mut order = Vec::with_capacity(self.nodes.len());

        while let Some(rank) = ready.pop_first() {
            order.push(rank);
            for next in self.successors(rank) {
                if let Some(d) = in_degree.get_mut(&next) {
                    *d = d.saturating_sub(1);
                    if *d == 0 {
                        ready.insert(next);
                    }
                }
            }
        }

        if order.len() == self.nodes.len() {
            Ok(order)
        } else {
            let mut stuck: Vec<usize> = in_degree
                .into_iter()
                .filter(|(_, d)| *d > 0)
                .map(|(rank, _)| rank)
                .collect();
            stuck.sort_unstable();
            Err(stuck)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peel_layers() {
        let mut graph = ConstraintGraph::new();
        graph.add_constraint(&[0], &[1, 2]);
        graph.add_constraint(&[2], &[3]);
        graph.add_constraint(&[0], &[1]);

        assert_eq!(graph.edge_count(), 3);
        assert_eq!(
            graph.peel_layers().unwrap(),
            vec![vec![0], vec![1, 2], vec![3]]
        );
    }

    #[test]
    fn test_peel_reports_cycle() {
        let mut graph = ConstraintGraph::new();
        graph.add_constraint(&[0], &[1]);
        graph.add_constraint(&[1], &[2]);
        graph.add_constraint(&[2], &[1]);

        assert!(graph.has_cycle());
        assert_eq!(graph.peel_layers().unwrap_err(), vec![1, 2]);
    }

    #[test]
    fn test_topological_tie_break() {
        let mut graph = ConstraintGraph::new();
        graph.add_constraint(&[3], &[0]);
        graph.add_detector(2);
        graph.add_detector(1);

        assert_eq!(graph.topological_order().unwrap(), vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_self_loop_is_cycle() {
        let mut graph = ConstraintGraph::new();
        graph.add_constraint(&[4], &[4]);
        assert!(graph.has_cycle());
        assert_eq!(graph.topological_order().unwrap_err(), vec![4]);
    }
}
