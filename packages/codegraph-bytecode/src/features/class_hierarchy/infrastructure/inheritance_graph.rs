//! Inheritance Graph
//!
//! Directed graph over classes and interfaces built with Petgraph:
//! - Vertex: [`ClassVertex`] (resolved or missing placeholder)
//! - Edge: class → direct supertype, labelled superclass / interface
//!
//! The graph only grows. `add_class` pulls in a class and all of its
//! ancestors with an explicit worklist, so deep hierarchies never recurse.
//!
//! Queries:
//! - `compute_supertypes`: BFS over outgoing edges
//! - `compute_known_subtypes`: BFS over incoming edges ("known so far")
//! - `traverse_supertypes`: explicit-stack DFS with visitor pruning

use super::errors::ClassLookupFailure;
use crate::features::class_hierarchy::domain::{
    ClassId, ClassMetadata, ClassVertex, InheritanceEdgeKind, SubtypeSet, SupertypeQueryResult,
};
use crate::features::class_hierarchy::ports::{ClassMetadataProvider, MissingClassReporter};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// Visitor decision for [`InheritanceGraph::traverse_supertypes`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalControl {
    /// Descend into this vertex's supertypes
    Continue,
    /// Skip this vertex's supertypes
    Prune,
    /// Abort the whole traversal
    Stop,
}

/// Callback for supertype traversal
pub trait SupertypeVisitor {
    /// `edge` is the label of the edge used to reach `vertex` (None for the start)
    fn visit(&mut self, vertex: &ClassVertex, edge: Option<InheritanceEdgeKind>)
        -> TraversalControl;
}

impl<F> SupertypeVisitor for F
where
    F: FnMut(&ClassVertex, Option<InheritanceEdgeKind>) -> TraversalControl,
{
    fn visit(
        &mut self,
        vertex: &ClassVertex,
        edge: Option<InheritanceEdgeKind>,
    ) -> TraversalControl {
        self(vertex, edge)
    }
}

/// Outcome of a successful `add_class`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddClassOutcome {
    /// Vertices created by this call (resolved + missing)
    pub added_vertices: usize,
    /// Missing placeholders created by this call
    pub added_missing: usize,
}

/// Whole-program inheritance graph
#[derive(Debug, Default)]
pub struct InheritanceGraph {
    graph: DiGraph<ClassVertex, InheritanceEdgeKind>,
    index: FxHashMap<ClassId, NodeIndex>,
    /// Missing classes in discovery order
    missing: Vec<ClassId>,
}

impl InheritanceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize) -> Self {
        let mut index = FxHashMap::default();
        index.reserve(vertices);
        Self {
            graph: DiGraph::with_capacity(vertices, vertices.saturating_mul(2)),
            index,
            missing: Vec::new(),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Construction
    // ═══════════════════════════════════════════════════════════════════════

    /// Add `id` and, transitively, all of its supertypes
    ///
    /// Idempotent. Finished vertices are never reprocessed. Classes the
    /// provider cannot supply become finished missing placeholders and are
    /// passed to `reporter` once, at creation.
    ///
    /// # Errors
    /// `ClassLookupFailure::Unresolved` when `id` itself is missing. The
    /// placeholder is still recorded.
    pub fn add_class(
        &mut self,
        id: &ClassId,
        provider: &dyn ClassMetadataProvider,
        reporter: Option<&dyn MissingClassReporter>,
    ) -> Result<AddClassOutcome, ClassLookupFailure> {
        let mut outcome = AddClassOutcome::default();
        let mut pending: FxHashMap<NodeIndex, ClassMetadata> = FxHashMap::default();

        let start = self.vertex_or_insert(id, false, provider, reporter, &mut pending, &mut outcome);
        if self.graph[start].is_missing() {
            return Err(ClassLookupFailure::Unresolved(id.clone()));
        }

        let mut worklist = vec![start];
        while let Some(node) = worklist.pop() {
            if self.graph[node].finished {
                continue;
            }

            let metadata = match pending.remove(&node) {
                Some(metadata) => metadata,
                None => match provider.resolve(&self.graph[node].id) {
                    Some(metadata) => metadata,
                    None => {
                        // Provider changed its answer; freeze the vertex as-is.
                        self.graph[node].finished = true;
                        continue;
                    }
                },
            };

            for (super_id, kind) in metadata.direct_supertypes() {
                let is_interface_guess = kind == InheritanceEdgeKind::Interface;
                let super_node = self.vertex_or_insert(
                    super_id,
                    is_interface_guess,
                    provider,
                    reporter,
                    &mut pending,
                    &mut outcome,
                );
                self.graph.update_edge(node, super_node, kind);
                if !self.graph[super_node].finished {
                    worklist.push(super_node);
                }
            }

            self.graph[node].finished = true;
        }

        if outcome.added_vertices > 0 {
            tracing::debug!(
                class = %id,
                added = outcome.added_vertices,
                missing = outcome.added_missing,
                "inheritance graph grew"
            );
        }
        Ok(outcome)
    }

    /// Look up or create the vertex for `id`, resolving new classes through the provider
    fn vertex_or_insert(
        &mut self,
        id: &ClassId,
        is_interface_guess: bool,
        provider: &dyn ClassMetadataProvider,
        reporter: Option<&dyn MissingClassReporter>,
        pending: &mut FxHashMap<NodeIndex, ClassMetadata>,
        outcome: &mut AddClassOutcome,
    ) -> NodeIndex {
        if let Some(&node) = self.index.get(id) {
            return node;
        }

        outcome.added_vertices += 1;
        let node = match provider.resolve(id) {
            Some(metadata) => {
                let node = self
                    .graph
                    .add_node(ClassVertex::resolved(id.clone(), metadata.is_interface));
                pending.insert(node, metadata);
                node
            }
            None => {
                outcome.added_missing += 1;
                self.missing.push(id.clone());
                if let Some(reporter) = reporter {
                    reporter.report(id);
                }
                self.graph
                    .add_node(ClassVertex::missing(id.clone(), is_interface_guess))
            }
        };
        self.index.insert(id.clone(), node);
        node
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Lookups
    // ═══════════════════════════════════════════════════════════════════════

    pub fn contains(&self, id: &ClassId) -> bool {
        self.index.contains_key(id)
    }

    pub fn vertex(&self, id: &ClassId) -> Option<&ClassVertex> {
        self.index.get(id).map(|&n| &self.graph[n])
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Missing classes in discovery order
    pub fn missing_classes(&self) -> &[ClassId] {
        &self.missing
    }

    /// Direct supertypes with edge labels (empty for unknown or missing classes)
    pub fn direct_supertypes(&self, id: &ClassId) -> Vec<(ClassId, InheritanceEdgeKind)> {
        self.neighbours(id, Direction::Outgoing)
    }

    /// Direct subtypes known so far with edge labels
    pub fn direct_subtypes(&self, id: &ClassId) -> Vec<(ClassId, InheritanceEdgeKind)> {
        self.neighbours(id, Direction::Incoming)
    }

    fn neighbours(
        &self,
        id: &ClassId,
        direction: Direction,
    ) -> Vec<(ClassId, InheritanceEdgeKind)> {
        let Some(&node) = self.index.get(id) else {
            return Vec::new();
        };
        let mut result: Vec<_> = self
            .graph
            .edges_directed(node, direction)
            .map(|edge| {
                let other = match direction {
                    Direction::Outgoing => edge.target(),
                    Direction::Incoming => edge.source(),
                };
                (self.graph[other].id.clone(), *edge.weight())
            })
            .collect();
        // petgraph yields edges newest-first; report them in insertion order
        result.reverse();
        result
    }

    /// Direct superclass; None for the root and for unknown or missing classes
    pub fn superclass(&self, id: &ClassId) -> Option<ClassId> {
        self.direct_supertypes(id)
            .into_iter()
            .find(|(_, kind)| *kind == InheritanceEdgeKind::Superclass)
            .map(|(id, _)| id)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Closures
    // ═══════════════════════════════════════════════════════════════════════

    /// All known supertypes of `id` by BFS over outgoing edges
    ///
    /// Resolved vertices (including `id`) contribute their ids; missing
    /// vertices set `encountered_missing_classes` without aborting. Returns
    /// `None` when `id` is not in the graph.
    pub fn compute_supertypes(&self, id: &ClassId) -> Option<SupertypeQueryResult> {
        let &start = self.index.get(id)?;
        let mut result = SupertypeQueryResult::default();
        let mut seen: FxHashSet<NodeIndex> = FxHashSet::default();
        let mut queue = VecDeque::from([start]);
        seen.insert(start);

        while let Some(node) = queue.pop_front() {
            let vertex = &self.graph[node];
            if vertex.is_missing() {
                result.encountered_missing_classes = true;
                continue;
            }
            result.supertypes.insert(vertex.id.clone());
            for next in self.graph.neighbors_directed(node, Direction::Outgoing) {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        Some(result)
    }

    /// All subtypes of `id` known so far, including `id`, by BFS over incoming edges
    pub fn compute_known_subtypes(&self, id: &ClassId) -> Option<SubtypeSet> {
        let &start = self.index.get(id)?;
        let mut result = SubtypeSet::default();
        let mut queue = VecDeque::from([start]);
        result.insert(self.graph[start].id.clone());

        while let Some(node) = queue.pop_front() {
            for next in self.graph.neighbors_directed(node, Direction::Incoming) {
                if result.insert(self.graph[next].id.clone()) {
                    queue.push_back(next);
                }
            }
        }
        Some(result)
    }

    /// Depth-first walk from `start` up through its supertypes
    ///
    /// Each vertex is visited at most once. Returns false when the visitor stopped
    /// the walk, true otherwise (including an unknown `start`).
    pub fn traverse_supertypes<V: SupertypeVisitor + ?Sized>(
        &self,
        start: &ClassId,
        visitor: &mut V,
    ) -> bool {
        let Some(&start) = self.index.get(start) else {
            return true;
        };
        let mut seen: FxHashSet<NodeIndex> = FxHashSet::default();
        let mut stack: Vec<(NodeIndex, Option<InheritanceEdgeKind>)> = vec![(start, None)];

        while let Some((node, edge)) = stack.pop() {
            if !seen.insert(node) {
                continue;
            }
            match visitor.visit(&self.graph[node], edge) {
                TraversalControl::Stop => return false,
                TraversalControl::Prune => continue,
                TraversalControl::Continue => {}
            }
            // Edges come newest-first, so the superclass is pushed last and popped first
            for edge in self.graph.edges_directed(node, Direction::Outgoing) {
                stack.push((edge.target(), Some(*edge.weight())));
            }
        }
        true
    }

    /// Superclass chain from `id` upwards, `id` first
    ///
    /// The boolean is false when the chain ends at a missing vertex.
    pub fn superclass_chain(&self, id: &ClassId) -> (Vec<ClassId>, bool) {
        let mut chain = Vec::new();
        let mut current = self.index.get(id).copied();
        while let Some(node) = current {
            let vertex = &self.graph[node];
            if vertex.is_missing() {
                return (chain, false);
            }
            chain.push(vertex.id.clone());
            current = self
                .graph
                .edges_directed(node, Direction::Outgoing)
                .find(|e| *e.weight() == InheritanceEdgeKind::Superclass)
                .map(|e| e.target());
        }
        (chain, current.is_none() && self.contains(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    struct MapProvider(FxHashMap<ClassId, ClassMetadata>);

    impl MapProvider {
        fn new(classes: Vec<ClassMetadata>) -> Self {
            Self(classes.into_iter().map(|m| (m.id.clone(), m)).collect())
        }
    }

    impl ClassMetadataProvider for MapProvider {
        fn resolve(&self, id: &ClassId) -> Option<ClassMetadata> {
            self.0.get(id).cloned()
        }
    }

    #[derive(Default)]
    struct Recorder(Mutex<Vec<ClassId>>);

    impl MissingClassReporter for Recorder {
        fn report(&self, id: &ClassId) {
            self.0.lock().push(id.clone());
        }
    }

    fn abc() -> MapProvider {
        MapProvider::new(vec![
            ClassMetadata::class("C", None, &[]),
            ClassMetadata::class("B", Some("C"), &[]),
            ClassMetadata::class("A", Some("B"), &["I"]),
            ClassMetadata::interface("I", &[]),
        ])
    }

    #[test]
    fn test_add_class_pulls_in_ancestors() {
        let provider = abc();
        let recorder = Recorder::default();
        let mut graph = InheritanceGraph::new();

        let outcome = graph
            .add_class(&ClassId::new("A"), &provider, Some(&recorder))
            .unwrap();

        // A, B, C, I, plus java.lang.Object (I's superclass) as missing
        assert_eq!(outcome.added_vertices, 5);
        assert_eq!(outcome.added_missing, 1);
        assert!(graph.vertex(&ClassId::new("C")).unwrap().finished);
        assert_eq!(recorder.0.lock().as_slice(), &[ClassId::object()]);
    }

    #[test]
    fn test_add_class_is_idempotent() {
        let provider = abc();
        let mut graph = InheritanceGraph::new();
        graph.add_class(&ClassId::new("A"), &provider, None).unwrap();
        let (vertices, edges) = (graph.vertex_count(), graph.edge_count());

        let outcome = graph.add_class(&ClassId::new("A"), &provider, None).unwrap();
        assert_eq!(outcome.added_vertices, 0);
        assert_eq!(graph.vertex_count(), vertices);
        assert_eq!(graph.edge_count(), edges);
    }

    #[test]
    fn test_missing_start_is_recorded_and_fails() {
        let provider = abc();
        let recorder = Recorder::default();
        let mut graph = InheritanceGraph::new();

        let err = graph
            .add_class(&ClassId::new("Nope"), &provider, Some(&recorder))
            .unwrap_err();
        assert_eq!(err, ClassLookupFailure::Unresolved(ClassId::new("Nope")));
        assert!(graph.vertex(&ClassId::new("Nope")).unwrap().is_missing());

        // second attempt: same failure, no second report
        assert!(graph.add_class(&ClassId::new("Nope"), &provider, Some(&recorder)).is_err());
        assert_eq!(recorder.0.lock().len(), 1);
    }

    #[test]
    fn test_missing_interface_placeholder_guess() {
        let provider = MapProvider::new(vec![ClassMetadata::class("X", None, &["GoneI"])]);
        let mut graph = InheritanceGraph::new();
        graph.add_class(&ClassId::new("X"), &provider, None).unwrap();

        let vertex = graph.vertex(&ClassId::new("GoneI")).unwrap();
        assert!(vertex.is_missing());
        assert!(vertex.is_interface);
    }

    #[test]
    fn test_supertypes_and_subtypes() {
        let provider = abc();
        let mut graph = InheritanceGraph::new();
        graph.add_class(&ClassId::new("A"), &provider, None).unwrap();

        let supers = graph.compute_supertypes(&ClassId::new("A")).unwrap();
        for name in ["A", "B", "C", "I"] {
            assert!(supers.contains(&ClassId::new(name)), "missing {}", name);
        }
        // I → java.lang.Object is missing here
        assert!(supers.encountered_missing_classes);

        let c_supers = graph.compute_supertypes(&ClassId::new("C")).unwrap();
        assert!(!c_supers.encountered_missing_classes);

        let subs = graph.compute_known_subtypes(&ClassId::new("C")).unwrap();
        assert_eq!(subs.len(), 3);
        assert!(subs.contains(&ClassId::new("A")));
    }

    #[test]
    fn test_direct_neighbours_in_declaration_order() {
        let provider = abc();
        let mut graph = InheritanceGraph::new();
        graph.add_class(&ClassId::new("A"), &provider, None).unwrap();

        let direct = graph.direct_supertypes(&ClassId::new("A"));
        assert_eq!(
            direct,
            vec![
                (ClassId::new("B"), InheritanceEdgeKind::Superclass),
                (ClassId::new("I"), InheritanceEdgeKind::Interface),
            ]
        );
        assert_eq!(graph.superclass(&ClassId::new("A")), Some(ClassId::new("B")));
        assert_eq!(
            graph.direct_subtypes(&ClassId::new("B")),
            vec![(ClassId::new("A"), InheritanceEdgeKind::Superclass)]
        );
    }

    #[test]
    fn test_traverse_prunes_and_stops() {
        let provider = abc();
        let mut graph = InheritanceGraph::new();
        graph.add_class(&ClassId::new("A"), &provider, None).unwrap();

        let mut visited = Vec::new();
        let completed = graph.traverse_supertypes(
            &ClassId::new("A"),
            &mut |v: &ClassVertex, _edge: Option<InheritanceEdgeKind>| {
                visited.push(v.id.as_str().to_string());
                if v.id.as_str() == "B" {
                    TraversalControl::Prune
                } else {
                    TraversalControl::Continue
                }
            },
        );
        assert!(completed);
        assert!(visited.contains(&"I".to_string()));
        assert!(!visited.contains(&"C".to_string()));

        let stopped = graph.traverse_supertypes(
            &ClassId::new("A"),
            &mut |_: &ClassVertex, _: Option<InheritanceEdgeKind>| TraversalControl::Stop,
        );
        assert!(!stopped);
    }

    #[test]
    fn test_superclass_chain() {
        let provider = abc();
        let mut graph = InheritanceGraph::new();
        graph.add_class(&ClassId::new("A"), &provider, None).unwrap();

        let (chain, complete) = graph.superclass_chain(&ClassId::new("A"));
        assert_eq!(chain, vec![ClassId::new("A"), ClassId::new("B"), ClassId::new("C")]);
        assert!(complete);

        let (chain, complete) = graph.superclass_chain(&ClassId::new("I"));
        assert_eq!(chain, vec![ClassId::new("I")]);
        assert!(!complete);
    }
}
