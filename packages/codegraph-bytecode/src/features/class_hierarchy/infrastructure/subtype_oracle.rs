//! Subtype Oracle
//!
//! Session-scoped subtype engine over an [`InheritanceGraph`].
//!
//! # Concurrency
//! - Graph: `parking_lot::RwLock`. `add_class` holds the write lock for the
//!   whole worklist, so readers never see an unfinished vertex. Missing
//!   classes are reported once the lock is released.
//! - Caches: `DashMap`. Supertype sets are cached for the session lifetime
//!   (ancestors of a finished vertex never change). Subtype sets are "known so
//!   far" and are dropped whenever the graph grows; they are inserted while the
//!   read lock is still held so a concurrent growth cannot leave stale entries.
//!
//! # Array rules
//! | subtype | supertype | answer |
//! |---|---|---|
//! | `T[]…` | Object / Serializable / Cloneable | true |
//! | `T[]…` | any other non-array | false |
//! | `T` with d dims | `S` with e > d dims | false |
//! | any array | primitive-based array (not identical) | false |
//! | d > e dims | `S` with e dims | `T` with d-e dims <: `S` |
//! | d == e dims | `S` with e dims | `T <: S`, both reference types |

use super::errors::ClassLookupFailure;
use super::inheritance_graph::{InheritanceGraph, SupertypeVisitor};
use crate::config::HierarchyConfig;
use crate::features::class_hierarchy::domain::{
    BaseType, ClassId, InheritanceEdgeKind, SubtypeSet, SupertypeQueryResult, TypeDescriptor,
};
use crate::features::class_hierarchy::ports::{ClassMetadataProvider, MissingClassReporter};
use dashmap::DashMap;
use parking_lot::RwLock;
use rustc_hash::FxHashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Cache hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryStats {
    pub supertype_hits: usize,
    pub supertype_misses: usize,
    pub subtype_hits: usize,
    pub subtype_misses: usize,
}

#[derive(Debug, Default)]
struct Counters {
    supertype_hits: AtomicUsize,
    supertype_misses: AtomicUsize,
    subtype_hits: AtomicUsize,
    subtype_misses: AtomicUsize,
}

/// Memoizing subtype engine
pub struct SubtypeOracle {
    graph: RwLock<InheritanceGraph>,
    provider: Arc<dyn ClassMetadataProvider>,
    reporter: Arc<dyn MissingClassReporter>,
    config: HierarchyConfig,
    supertype_cache: DashMap<ClassId, Arc<SupertypeQueryResult>>,
    subtype_cache: DashMap<ClassId, Arc<SubtypeSet>>,
    counters: Counters,
}

impl SubtypeOracle {
    pub fn new(
        provider: Arc<dyn ClassMetadataProvider>,
        reporter: Arc<dyn MissingClassReporter>,
        config: HierarchyConfig,
    ) -> Self {
        Self {
            graph: RwLock::new(InheritanceGraph::with_capacity(config.initial_capacity)),
            provider,
            reporter,
            config,
            supertype_cache: DashMap::new(),
            subtype_cache: DashMap::new(),
            counters: Counters::default(),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Graph growth
    // ═══════════════════════════════════════════════════════════════════════

    /// Add a class and all of its ancestors
    ///
    /// # Errors
    /// `ClassLookupFailure::Unresolved` when the class itself cannot be loaded.
    pub fn add_class(&self, id: &ClassId) -> Result<(), ClassLookupFailure> {
        let (result, missing) = {
            let mut graph = self.graph.write();
            let before = graph.vertex_count();
            let missing_before = graph.missing_classes().len();

            let result = graph.add_class(id, self.provider.as_ref(), None);
            if graph.vertex_count() != before && !self.subtype_cache.is_empty() {
                tracing::debug!(class = %id, "graph grew, dropping subtype cache");
                self.subtype_cache.clear();
            }
            (result, graph.missing_classes()[missing_before..].to_vec())
        };

        // Reporters may query the oracle, so they run after the write lock is released
        if self.config.report_missing_classes {
            for class in &missing {
                self.reporter.report(class);
            }
        }
        result.map(|_| ())
    }

    /// Make sure `id` has a vertex; a missing class becomes a placeholder
    fn ensure_class(&self, id: &ClassId) {
        if self.graph.read().contains(id) {
            return;
        }
        // Unresolved is not an error for queries: the placeholder answers them.
        let _ = self.add_class(id);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Subtype queries
    // ═══════════════════════════════════════════════════════════════════════

    /// Is `ty` a subtype of `possible_supertype`?
    ///
    /// # Errors
    /// `ClassLookupFailure` when a negative answer would rest on an incomplete
    /// hierarchy.
    pub fn is_subtype(
        &self,
        ty: &TypeDescriptor,
        possible_supertype: &TypeDescriptor,
    ) -> Result<bool, ClassLookupFailure> {
        if ty == possible_supertype {
            return Ok(true);
        }

        match (ty, possible_supertype) {
            (_, TypeDescriptor::Object(sup)) if sup.is_object() && ty.is_reference() => Ok(true),
            (TypeDescriptor::Object(sub), TypeDescriptor::Object(sup)) => {
                self.is_class_subtype(sub, sup)
            }
            (TypeDescriptor::Array { base, dimensions }, _) => {
                self.is_array_subtype(base, *dimensions, possible_supertype)
            }
            _ => Ok(false),
        }
    }

    /// Subtype test between two ordinary classes
    pub fn is_class_subtype(
        &self,
        sub: &ClassId,
        sup: &ClassId,
    ) -> Result<bool, ClassLookupFailure> {
        if sub == sup || sup.is_object() {
            return Ok(true);
        }

        let supertypes = self.supertypes(sub);
        match supertypes.is_member(sup) {
            Some(answer) => Ok(answer),
            None if supertypes.is_empty() => Err(ClassLookupFailure::Unresolved(sub.clone())),
            None => Err(ClassLookupFailure::Indeterminate {
                subtype: sub.clone(),
                supertype: sup.clone(),
            }),
        }
    }

    fn is_array_subtype(
        &self,
        base: &BaseType,
        dimensions: u32,
        possible_supertype: &TypeDescriptor,
    ) -> Result<bool, ClassLookupFailure> {
        match possible_supertype {
            TypeDescriptor::Object(sup) => Ok(sup.is_array_supertype()),
            TypeDescriptor::Primitive(_) => Ok(false),
            TypeDescriptor::Array {
                base: sup_base,
                dimensions: sup_dimensions,
            } => {
                if dimensions < *sup_dimensions {
                    return Ok(false);
                }
                let BaseType::Class(sup_class) = sup_base else {
                    return Ok(false);
                };

                if dimensions > *sup_dimensions {
                    let reduced =
                        TypeDescriptor::with_dimensions(base.clone(), dimensions - sup_dimensions);
                    return self.is_subtype(&reduced, &TypeDescriptor::Object(sup_class.clone()));
                }

                match base {
                    BaseType::Class(sub_class) => self.is_class_subtype(sub_class, sup_class),
                    BaseType::Primitive(_) => Ok(false),
                }
            }
        }
    }

    /// Known supertypes of `id` (memoized for the session)
    pub fn supertypes(&self, id: &ClassId) -> Arc<SupertypeQueryResult> {
        if self.config.cache_queries {
            if let Some(hit) = self.supertype_cache.get(id) {
                self.counters.supertype_hits.fetch_add(1, Ordering::Relaxed);
                return Arc::clone(hit.value());
            }
        }
        self.counters.supertype_misses.fetch_add(1, Ordering::Relaxed);

        self.ensure_class(id);
        let graph = self.graph.read();
        let result = Arc::new(graph.compute_supertypes(id).unwrap_or_else(|| {
            SupertypeQueryResult {
                supertypes: FxHashSet::default(),
                encountered_missing_classes: true,
            }
        }));
        if self.config.cache_queries {
            self.supertype_cache.insert(id.clone(), Arc::clone(&result));
        }
        result
    }

    /// Subtypes of `id` known so far, including `id`
    pub fn known_subtypes(&self, id: &ClassId) -> Arc<SubtypeSet> {
        if self.config.cache_queries {
            if let Some(hit) = self.subtype_cache.get(id) {
                self.counters.subtype_hits.fetch_add(1, Ordering::Relaxed);
                return Arc::clone(hit.value());
            }
        }
        self.counters.subtype_misses.fetch_add(1, Ordering::Relaxed);

        self.ensure_class(id);
        let graph = self.graph.read();
        let result = Arc::new(graph.compute_known_subtypes(id).unwrap_or_else(|| {
            let mut set = SubtypeSet::default();
            set.insert(id.clone());
            set
        }));
        if self.config.cache_queries {
            self.subtype_cache.insert(id.clone(), Arc::clone(&result));
        }
        drop(graph);
        result
    }

    /// True when some class other than `id` is known to extend or implement it
    pub fn has_known_subtypes(&self, id: &ClassId) -> bool {
        self.known_subtypes(id).len() > 1
    }

    /// Nearest common class on the superclass chains of `a` and `b`
    ///
    /// Interfaces meet at `java.lang.Object`.
    pub fn first_common_superclass(
        &self,
        a: &ClassId,
        b: &ClassId,
    ) -> Result<ClassId, ClassLookupFailure> {
        if a == b {
            return Ok(a.clone());
        }
        self.ensure_class(a);
        self.ensure_class(b);

        let graph = self.graph.read();
        let is_interface = |id: &ClassId| graph.vertex(id).map_or(false, |v| v.is_interface);
        if is_interface(a) || is_interface(b) {
            return Ok(ClassId::object());
        }

        let (chain_a, complete_a) = graph.superclass_chain(a);
        let (chain_b, complete_b) = graph.superclass_chain(b);
        let ancestors_a: FxHashSet<&ClassId> = chain_a.iter().collect();
        if let Some(common) = chain_b.iter().find(|c| ancestors_a.contains(c)) {
            return Ok(common.clone());
        }

        if complete_a && complete_b {
            Ok(ClassId::object())
        } else {
            Err(ClassLookupFailure::NoCommonSuperclass(a.clone(), b.clone()))
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Graph inspection
    // ═══════════════════════════════════════════════════════════════════════

    pub fn direct_supertypes(&self, id: &ClassId) -> Vec<(ClassId, InheritanceEdgeKind)> {
        self.ensure_class(id);
        self.graph.read().direct_supertypes(id)
    }

    pub fn direct_subtypes(&self, id: &ClassId) -> Vec<(ClassId, InheritanceEdgeKind)> {
        self.graph.read().direct_subtypes(id)
    }

    /// `None` when the class has never been seen
    pub fn is_interface(&self, id: &ClassId) -> Option<bool> {
        self.graph.read().vertex(id).map(|v| v.is_interface)
    }

    pub fn contains(&self, id: &ClassId) -> bool {
        self.graph.read().contains(id)
    }

    /// Depth-first walk over the supertypes of `start`; see
    /// [`InheritanceGraph::traverse_supertypes`]
    pub fn traverse_supertypes<V: SupertypeVisitor + ?Sized>(
        &self,
        start: &ClassId,
        visitor: &mut V,
    ) -> bool {
        self.ensure_class(start);
        self.graph.read().traverse_supertypes(start, visitor)
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.read().vertex_count()
    }

    pub fn missing_classes(&self) -> Vec<ClassId> {
        self.graph.read().missing_classes().to_vec()
    }

    /// Run `f` with read access to the graph
    pub fn with_graph<R>(&self, f: impl FnOnce(&InheritanceGraph) -> R) -> R {
        f(&self.graph.read())
    }

    pub fn stats(&self) -> QueryStats {
        QueryStats {
            supertype_hits: self.counters.supertype_hits.load(Ordering::Relaxed),
            supertype_misses: self.counters.supertype_misses.load(Ordering::Relaxed),
            subtype_hits: self.counters.subtype_hits.load(Ordering::Relaxed),
            subtype_misses: self.counters.subtype_misses.load(Ordering::Relaxed),
        }
    }

    /// Drop the graph and every cache
    pub fn clear(&self) {
        let mut graph = self.graph.write();
        *graph = InheritanceGraph::with_capacity(self.config.initial_capacity);
        self.supertype_cache.clear();
        self.subtype_cache.clear();
    }
}
